//! Input file handling.

use std::path::{Path, PathBuf};

use skinscore_core::decoders::{has_supported_extension, SUPPORTED_EXTENSIONS};

/// Expand a list of inputs (files and directories) into a list of image files.
///
/// Directories are scanned for supported image files. If `recursive` is true,
/// subdirectories are also scanned. Explicit file arguments are kept even
/// when their extension is unknown; decoding decides whether they are usable.
pub fn expand_inputs(inputs: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>, String> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            collect_images_from_dir(input, recursive, &mut files)?;
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            return Err(format!("Path not found: {}", input.display()));
        }
    }

    // Sort for consistent ordering
    files.sort();
    files.dedup();
    Ok(files)
}

/// Human-readable list of accepted extensions for error messages.
pub fn supported_extensions_hint() -> String {
    SUPPORTED_EXTENSIONS
        .iter()
        .map(|e| format!(".{}", e))
        .collect::<Vec<_>>()
        .join(", ")
}

fn collect_images_from_dir(
    dir: &Path,
    recursive: bool,
    files: &mut Vec<PathBuf>,
) -> Result<(), String> {
    let entries = std::fs::read_dir(dir)
        .map_err(|e| format!("Failed to read directory {}: {}", dir.display(), e))?;

    for entry in entries {
        let entry = entry.map_err(|e| format!("Error reading directory entry: {}", e))?;
        let path = entry.path();

        if path.is_dir() && recursive {
            collect_images_from_dir(&path, recursive, files)?;
        } else if path.is_file() && has_supported_extension(&path) {
            files.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_inputs_filters_and_recurses() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("b.jpg"), b"").unwrap();
        std::fs::write(dir.path().join("a.PNG"), b"").unwrap();
        std::fs::write(dir.path().join("readme.md"), b"").unwrap();
        std::fs::write(nested.join("c.webp"), b"").unwrap();

        let flat = expand_inputs(&[dir.path().to_path_buf()], false).unwrap();
        assert_eq!(flat.len(), 2);
        assert!(flat[0].ends_with("a.PNG"));

        let deep = expand_inputs(&[dir.path().to_path_buf()], true).unwrap();
        assert_eq!(deep.len(), 3);
    }

    #[test]
    fn test_expand_inputs_missing_path() {
        let err = expand_inputs(&[PathBuf::from("/nonexistent/face.jpg")], false).unwrap_err();
        assert!(err.contains("Path not found"));
    }

    #[test]
    fn test_hint_lists_extensions() {
        assert!(supported_extensions_hint().contains(".jpg"));
    }
}
