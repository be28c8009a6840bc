use std::path::PathBuf;

use skinscore_core::{load_calibration, CalibrationSource};

/// Print the effective calibration table and where it came from.
pub fn cmd_show_calibration(calibration: Option<PathBuf>, json_output: bool) -> Result<(), String> {
    let handle = load_calibration(calibration.as_deref());

    if json_output {
        let json = handle.table.to_json_string().map_err(|e| e.to_string())?;
        println!("{}", json);
        return Ok(());
    }

    match &handle.source {
        CalibrationSource::Persisted(path) => println!("Calibration: {}", path.display()),
        CalibrationSource::BuiltIn => println!("Calibration: built-in defaults"),
    }
    for (metric, range) in handle.table.iter() {
        let note = if range.is_degenerate() {
            "  (degenerate: always 0)"
        } else {
            ""
        };
        println!(
            "  {:<14} low={:<10.5} high={:<10.5}{}",
            metric.as_str(),
            range.low,
            range.high,
            note
        );
    }
    for warning in &handle.warnings {
        println!("  warning: {}", warning);
    }

    Ok(())
}
