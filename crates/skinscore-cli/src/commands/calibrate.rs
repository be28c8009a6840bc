use std::path::PathBuf;
use std::time::Instant;

use skinscore_core::fitter::fit_and_save;
use skinscore_core::load_analysis_config;

/// Fit a calibration table from labeled reference folders and write it.
pub fn cmd_calibrate(
    data_root: PathBuf,
    out: PathBuf,
    config: Option<PathBuf>,
    silent: bool,
) -> Result<(), String> {
    let start = Instant::now();
    let config = load_analysis_config(config.as_deref());

    if !silent {
        println!("Fitting calibration from {}...", data_root.display());
    }

    let report = fit_and_save(&data_root, &out, &config.options).map_err(|e| e.to_string())?;

    if !silent {
        for entry in &report.entries {
            println!(
                "  {:<14} low={:<10.5} high={:<10.5} mild {}/{} severe {}/{}  [{}]",
                entry.metric.as_str(),
                entry.range.low,
                entry.range.high,
                entry.mild.used,
                entry.mild.used + entry.mild.skipped,
                entry.severe.used,
                entry.severe.used + entry.severe.skipped,
                entry.rule
            );
        }
        if !report.warnings.is_empty() {
            println!("\n{} warning(s):", report.warnings.len());
            for warning in &report.warnings {
                println!("  {}", warning);
            }
        }
        println!(
            "\nCalibration written to {} in {:.2}s",
            out.display(),
            start.elapsed().as_secs_f32()
        );
    }

    Ok(())
}
