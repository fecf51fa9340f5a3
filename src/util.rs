use std::fs::File;
use std::io;
use std::path::Path;

pub fn open_file(path: &Path) -> io::Result<File> {
    File::open(path)
}

/// Basename used to attribute diagnostics; falls back to the full path.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
