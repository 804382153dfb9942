use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lv_core::config::ConvertConfig;
use lv_core::grid::{GridDims, TextLevel};
use lv_raster::Rasterizer;

/// Bilan d'un passage sur le dossier.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Images written, in processing order.
    pub converted: Vec<PathBuf>,
    /// Inputs skipped because their grid was degenerate.
    pub skipped: Vec<PathBuf>,
}

/// Issue de la conversion d'un seul fichier.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Image written at this path.
    Converted(PathBuf),
    /// Nothing written: the grid had no cell.
    Skipped(GridDims),
}

/// Liste les fichiers `*.{extension}` de `dir`, sans récursion.
///
/// Only regular files whose name ends with `.{extension}` are kept.
/// With `sort = false` the directory-listing order is preserved.
///
/// # Errors
/// Returns an error if the directory or one of its entries cannot be read.
pub fn scan_dir(dir: &Path, extension: &str, sort: bool) -> Result<Vec<PathBuf>> {
    let suffix = format!(".{extension}");
    let mut files = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("Impossible de lister {}", dir.display()))?
    {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            log::debug!("Nom non UTF-8 ignoré : {}", path.display());
            continue;
        };
        if name.ends_with(&suffix) && path.is_file() {
            files.push(path);
        }
    }
    if sort {
        files.sort();
    }
    log::debug!("{} fichier(s) {suffix} dans {}", files.len(), dir.display());
    Ok(files)
}

/// Chemin de sortie : même dossier, extension d'entrée remplacée.
///
/// Returns `None` if `input` has no file name ending with `.{input_ext}`.
/// Only the last suffix is replaced: `a.txt.txt` becomes `a.txt.png`.
#[must_use]
pub fn output_path(input: &Path, input_ext: &str, output_ext: &str) -> Option<PathBuf> {
    let name = input.file_name()?.to_str()?;
    let stem = name.strip_suffix(&format!(".{input_ext}"))?;
    Some(input.with_file_name(format!("{stem}.{output_ext}")))
}

/// Convertit un fichier texte en image.
///
/// # Errors
/// Fails on unreadable or non-UTF-8 input, on a rejected overflow, and on
/// any write failure. A degenerate grid is not an error.
pub fn convert_file(
    path: &Path,
    config: &ConvertConfig,
    rasterizer: &Rasterizer,
) -> Result<Outcome> {
    let out = output_path(path, &config.input_extension, &config.output_extension)
        .with_context(|| format!("Nom d'entrée inattendu : {}", path.display()))?;

    let level = TextLevel::read(path)?;
    let dims = level.dimensions();
    let name = path.file_name().map_or_else(
        || path.display().to_string(),
        |n| n.to_string_lossy().into_owned(),
    );

    if config.echo_content {
        println!("{}", level.lines().join("\n"));
        println!("{name} ({}, {})", dims.rows, dims.cols);
    }

    if dims.is_degenerate() {
        log::warn!(
            "{name} : grille {}×{} sans cellule, aucune image écrite",
            dims.rows,
            dims.cols
        );
        return Ok(Outcome::Skipped(dims));
    }

    let grid = rasterizer
        .rasterize(&level)
        .with_context(|| format!("Rasterisation de {name}"))?;
    lv_export::write_png(&grid, &out)?;

    log::info!("{name} → {} ({}×{})", out.display(), grid.width, grid.height);
    Ok(Outcome::Converted(out))
}

/// Point d'entrée du traitement par lots.
///
/// Files are processed one after another; the first failure aborts the run.
///
/// # Errors
/// Returns the first scan or conversion error, with the file in context.
pub fn run_batch(dir: &Path, config: &ConvertConfig) -> Result<BatchReport> {
    let files = scan_dir(dir, &config.input_extension, config.sort_inputs)?;
    let rasterizer = Rasterizer::new(config.overflow);

    let mut report = BatchReport::default();
    for path in files {
        let outcome = convert_file(&path, config, &rasterizer)
            .with_context(|| format!("Échec de conversion de {}", path.display()))?;
        match outcome {
            Outcome::Converted(out) => report.converted.push(out),
            Outcome::Skipped(dims) => {
                log::debug!("Ignoré : {} ({}×{})", path.display(), dims.rows, dims.cols);
                report.skipped.push(path);
            }
        }
    }

    log::info!(
        "Terminé : {} image(s) écrite(s), {} fichier(s) ignoré(s)",
        report.converted.len(),
        report.skipped.len()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lv_core::config::OverflowPolicy;

    fn quiet() -> ConvertConfig {
        ConvertConfig {
            echo_content: false,
            ..ConvertConfig::default()
        }
    }

    fn pixels(path: &Path) -> (u32, u32, Vec<u8>) {
        let img = image::open(path).unwrap().to_luma8();
        let (w, h) = img.dimensions();
        (w, h, img.into_raw())
    }

    #[test]
    fn output_path_swaps_extension() {
        assert_eq!(
            output_path(Path::new("lv/cave.txt"), "txt", "png"),
            Some(PathBuf::from("lv/cave.png"))
        );
        assert_eq!(
            output_path(Path::new("a.txt.txt"), "txt", "png"),
            Some(PathBuf::from("a.txt.png"))
        );
        assert_eq!(output_path(Path::new("notes.md"), "txt", "png"), None);
    }

    #[test]
    fn walls_and_platforms_scenario() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("level1.txt"), "111\n555\n").unwrap();

        let report = run_batch(dir.path(), &quiet()).unwrap();

        let out = dir.path().join("level1.png");
        assert_eq!(report.converted, vec![out.clone()]);
        let (w, h, data) = pixels(&out);
        assert_eq!((h, w), (3, 3));
        assert_eq!(data, vec![255, 255, 255, 128, 128, 128, 0, 0, 0]);
    }

    #[test]
    fn short_line_scenario() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.txt"), "ab\nc\n").unwrap();

        run_batch(dir.path(), &quiet()).unwrap();

        let (w, h, data) = pixels(&dir.path().join("b.png"));
        assert_eq!((h, w), (3, 2));
        assert_eq!(data, vec![97, 98, 99, 0, 0, 0]);
    }

    #[test]
    fn empty_file_is_skipped_without_image() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("empty.txt"), "").unwrap();
        fs::write(dir.path().join("blank.txt"), "\n\n").unwrap();
        fs::write(dir.path().join("ok.txt"), "1").unwrap();

        let report = run_batch(dir.path(), &quiet()).unwrap();

        assert_eq!(report.converted, vec![dir.path().join("ok.png")]);
        assert_eq!(
            report.skipped,
            vec![dir.path().join("blank.txt"), dir.path().join("empty.txt")]
        );
        assert!(!dir.path().join("empty.png").exists());
        assert!(!dir.path().join("blank.png").exists());
    }

    #[test]
    fn other_extensions_are_never_touched() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.md"), "111").unwrap();
        fs::write(dir.path().join("level.txt.bak"), "111").unwrap();
        fs::write(dir.path().join("LEVEL.TXT"), "111").unwrap();
        // invalid UTF-8: would abort the run if it were read
        fs::write(dir.path().join("data.bin"), [0xFF, 0xFE]).unwrap();
        fs::create_dir(dir.path().join("folder.txt")).unwrap();

        let report = run_batch(dir.path(), &quiet()).unwrap();

        assert!(report.converted.is_empty());
        assert!(report.skipped.is_empty());
        let pngs = scan_dir(dir.path(), "png", true).unwrap();
        assert!(pngs.is_empty(), "aucune image attendue : {pngs:?}");
    }

    #[test]
    fn scan_is_sorted_and_non_recursive() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["c.txt", "a.txt", "b.txt"] {
            fs::write(dir.path().join(name), "1").unwrap();
        }
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("d.txt"), "1").unwrap();

        let files = scan_dir(dir.path(), "txt", true).unwrap();

        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, ["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn rerun_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("lvl.txt"), "1 5\nG<>\n  r\n").unwrap();

        run_batch(dir.path(), &quiet()).unwrap();
        let first = fs::read(dir.path().join("lvl.png")).unwrap();
        run_batch(dir.path(), &quiet()).unwrap();
        let second = fs::read(dir.path().join("lvl.png")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn first_failure_aborts_the_run() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), [b'1', 0xFF]).unwrap();
        fs::write(dir.path().join("b.txt"), "111").unwrap();

        let err = run_batch(dir.path(), &quiet()).unwrap_err();

        assert!(format!("{err:#}").contains("a.txt"), "{err:#}");
        assert!(!dir.path().join("b.png").exists());
    }

    #[test]
    fn reject_policy_fails_on_wide_char() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("euro.txt"), "1€").unwrap();
        let config = ConvertConfig {
            overflow: OverflowPolicy::Reject,
            ..quiet()
        };

        assert!(run_batch(dir.path(), &config).is_err());
        assert!(!dir.path().join("euro.png").exists());
    }

    #[test]
    fn saturate_policy_clamps_wide_char() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("euro.txt"), "a€").unwrap();

        run_batch(dir.path(), &quiet()).unwrap();

        let (_, _, data) = pixels(&dir.path().join("euro.png"));
        assert_eq!(data, vec![97, 255]);
    }

    #[test]
    fn custom_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("map.lvl"), "15").unwrap();
        fs::write(dir.path().join("map.txt"), "15").unwrap();
        let config = ConvertConfig {
            input_extension: "lvl".into(),
            ..quiet()
        };

        let report = run_batch(dir.path(), &config).unwrap();

        assert_eq!(report.converted, vec![dir.path().join("map.png")]);
        let (_, _, data) = pixels(&dir.path().join("map.png"));
        assert_eq!(data, vec![255, 128]);
    }
}
