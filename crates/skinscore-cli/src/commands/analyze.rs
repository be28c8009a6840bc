use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use rayon::prelude::*;

use skinscore_cli::input::supported_extensions_hint;
use skinscore_cli::{expand_inputs, format_report, AnalysisOutput};
use skinscore_core::{load_analysis_config, load_calibration, SkinAnalyzer};

/// Analyze one or more images and print their scores.
///
/// Inputs are processed in parallel. A file that fails to decode is reported
/// and skipped; the command fails at the end if any input failed.
pub fn cmd_analyze(
    inputs: Vec<PathBuf>,
    recursive: bool,
    calibration: Option<PathBuf>,
    config: Option<PathBuf>,
    json_output: bool,
    show_raw: bool,
    threads: Option<usize>,
) -> Result<(), String> {
    if inputs.is_empty() {
        return Err("No input files or directories specified".to_string());
    }

    let files = expand_inputs(&inputs, recursive)?;
    if files.is_empty() {
        return Err(format!(
            "No supported image files found (supported: {})",
            supported_extensions_hint()
        ));
    }

    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
    }

    let calibration = load_calibration(calibration.as_deref());
    if calibration.used_defaults() {
        log::info!("Using built-in calibration ranges");
    }
    let config = load_analysis_config(config.as_deref());
    let analyzer = SkinAnalyzer::from_handles(&calibration, &config);

    let failures = AtomicUsize::new(0);
    let outputs: Vec<AnalysisOutput> = files
        .par_iter()
        .filter_map(|path| {
            let image = match skinscore_core::decoders::decode_path(path) {
                Ok(image) => image,
                Err(err) => {
                    let kind = if err.is_input_error() {
                        "invalid image"
                    } else {
                        "error"
                    };
                    eprintln!("{} ({}): {}", path.display(), kind, err);
                    failures.fetch_add(1, Ordering::Relaxed);
                    return None;
                }
            };

            let raw = analyzer.raw_metrics(&image);
            let report = analyzer.score_raw(&raw);
            let raw = show_raw.then(|| raw.to_map());
            Some(AnalysisOutput::new(path.display().to_string(), report, raw))
        })
        .collect();

    if json_output {
        let json = if outputs.len() == 1 {
            serde_json::to_string_pretty(&outputs[0])
        } else {
            serde_json::to_string_pretty(&outputs)
        }
        .map_err(|e| format!("Failed to serialize analysis: {}", e))?;
        println!("{}", json);
    } else {
        for (i, output) in outputs.iter().enumerate() {
            if i > 0 {
                println!();
            }
            println!("{}", format_report(output));
        }
    }

    match failures.load(Ordering::Relaxed) {
        0 => Ok(()),
        n => Err(format!("{} of {} input(s) could not be analyzed", n, files.len())),
    }
}
