use anyhow::{Context, Result};
use lv_core::config::{CONFIG_FILE_NAME, ConvertConfig, load_config};

pub mod batch;

fn main() -> Result<()> {
    // 1. Dossier de travail = dossier courant
    let dir = std::env::current_dir().context("Dossier courant inaccessible")?;

    // 2. Charger la config (optionnelle)
    let config_path = dir.join(CONFIG_FILE_NAME);
    let has_config = config_path.is_file();
    let config = if has_config {
        load_config(&config_path)?
    } else {
        ConvertConfig::default()
    };

    // 3. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(config.level_filter())
        .init();

    if has_config {
        log::info!("Config chargée depuis {}", config_path.display());
    } else {
        log::debug!("Pas de {CONFIG_FILE_NAME}, utilisation des défauts.");
    }

    // 4. Conversion de tous les fichiers du dossier
    let report = batch::run_batch(&dir, &config)?;
    if report.converted.is_empty() {
        log::warn!(
            "Aucun fichier .{} converti dans {}",
            config.input_extension,
            dir.display()
        );
    }
    Ok(())
}
