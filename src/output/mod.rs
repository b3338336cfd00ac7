use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Filename used when the list output path is empty or a directory.
pub const DEFAULT_LIST_FILENAME: &str = "earth-view.json";

/// Serializes asset ids as a JSON array of integers. Callers hand in the
/// finalized list, already ascending.
pub fn json_id_list(ids: &[u32]) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(ids)
}

/// Resolves the absolute path a write would land on: an empty path means
/// `default_filename` in the current directory, an existing directory gets
/// `default_filename` inside it.
pub fn resolve_out_path(path: &Path, default_filename: &str) -> io::Result<PathBuf> {
    let target = if path.as_os_str().is_empty() {
        PathBuf::from(default_filename)
    } else if path.is_dir() {
        path.join(default_filename)
    } else {
        path.to_path_buf()
    };

    std::path::absolute(target)
}

pub fn write_file(content: &[u8], path: &Path) -> io::Result<()> {
    fs::write(path, content)
}
