use log::warn;
use std::{fs, io};

/// Returns `true` only if `path` exists and is a regular file.
///
/// `NotFound` is the expected negative and stays silent. Any other probe
/// failure (permissions, I/O) is logged and treated as "does not exist",
/// which means "leave the specifier alone" for the caller.
pub fn file_exists(path: &str) -> bool {
    match fs::metadata(path) {
        Ok(meta) => meta.is_file(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => false,
        Err(e) => {
            warn!("Error checking file status for path \"{}\": {}", path, e);
            false
        }
    }
}
