use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Nom du fichier de configuration cherché dans le dossier de travail.
pub const CONFIG_FILE_NAME: &str = "filetoimage.toml";

/// Configuration de la conversion texte → image.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use lv_core::config::{ConvertConfig, OverflowPolicy};
/// let config = ConvertConfig::default();
/// assert_eq!(config.input_extension, "txt");
/// assert_eq!(config.overflow, OverflowPolicy::Saturate);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ConvertConfig {
    /// Extension des fichiers d'entrée, sans le point.
    pub input_extension: String,
    /// Extension des images produites, sans le point.
    pub output_extension: String,
    /// What to do with code points above 255.
    pub overflow: OverflowPolicy,
    /// Trier les entrées par nom (sinon ordre du listing).
    pub sort_inputs: bool,
    /// Print each file's content and shape to stdout.
    pub echo_content: bool,
    /// "error" | "warn" | "info" | "debug" | "trace"
    pub log_level: String,
}

/// Policy for characters whose code point exceeds the 8-bit pixel depth.
///
/// # Example
/// ```
/// use lv_core::config::OverflowPolicy;
/// assert_eq!(OverflowPolicy::default(), OverflowPolicy::Saturate);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Clamp to 255.
    #[default]
    Saturate,
    /// Keep the low byte (`cp & 0xFF`).
    Truncate,
    /// Fail the conversion.
    Reject,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input_extension: "txt".into(),
            output_extension: "png".into(),
            overflow: OverflowPolicy::Saturate,
            sort_inputs: true,
            echo_content: true,
            log_level: "info".into(),
        }
    }
}

impl ConvertConfig {
    /// Normalise et valide les champs après désérialisation.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] for an empty extension or an unknown
    /// log level.
    pub fn validate(&mut self) -> Result<(), CoreError> {
        for (key, ext) in [
            ("input_extension", &mut self.input_extension),
            ("output_extension", &mut self.output_extension),
        ] {
            let trimmed = ext.trim().trim_start_matches('.').to_string();
            if trimmed.is_empty() {
                return Err(CoreError::Config(format!("{key} vide")));
            }
            *ext = trimmed;
        }
        if self.input_extension == self.output_extension {
            return Err(CoreError::Config(format!(
                "input_extension et output_extension identiques ({})",
                self.input_extension
            )));
        }
        self.log_level = self.log_level.trim().to_lowercase();
        if self.log_level.parse::<log::LevelFilter>().is_err() {
            return Err(CoreError::Config(format!(
                "log_level inconnu : {}",
                self.log_level
            )));
        }
        Ok(())
    }

    /// Niveau de log résolu ; `Info` si la valeur est illisible.
    #[must_use]
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    convert: Option<ConvertSection>,
}

/// Convert section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct ConvertSection {
    input_extension: Option<String>,
    output_extension: Option<String>,
    overflow: Option<OverflowPolicy>,
    sort_inputs: Option<bool>,
    echo_content: Option<bool>,
    log_level: Option<String>,
}

/// Parse a TOML string and merge it over the defaults.
///
/// # Errors
/// Returns an error if the TOML is malformed or a value is invalid.
///
/// # Example
/// ```
/// use lv_core::config::{parse_config, OverflowPolicy};
/// let config = parse_config("[convert]\noverflow = \"Reject\"\n").unwrap();
/// assert_eq!(config.overflow, OverflowPolicy::Reject);
/// assert_eq!(config.output_extension, "png");
/// ```
pub fn parse_config(content: &str) -> Result<ConvertConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = ConvertConfig::default();

    if let Some(c) = file.convert {
        if let Some(v) = c.input_extension {
            config.input_extension = v;
        }
        if let Some(v) = c.output_extension {
            config.output_extension = v;
        }
        if let Some(v) = c.overflow {
            config.overflow = v;
        }
        if let Some(v) = c.sort_inputs {
            config.sort_inputs = v;
        }
        if let Some(v) = c.echo_content {
            config.echo_content = v;
        }
        if let Some(v) = c.log_level {
            config.log_level = v;
        }
    }

    config.validate()?;
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use lv_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("filetoimage.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ConvertConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Configuration invalide dans {}", path.display()))
}
