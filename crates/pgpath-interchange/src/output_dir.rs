//! Fresh output directories

use std::io;
use std::path::{Path, PathBuf};

/// Creates and returns a directory that did not exist before.
///
/// Returns `base` itself when it is free, otherwise `base_N` for the
/// smallest free `N >= 1`. Parents are created as needed.
pub fn make_unique_dir(base: &Path) -> io::Result<PathBuf> {
    if !base.exists() {
        std::fs::create_dir_all(base)?;
        return Ok(base.to_path_buf());
    }

    let mut n = 1usize;
    loop {
        let candidate = suffixed(base, n);
        if !candidate.exists() {
            std::fs::create_dir_all(&candidate)?;
            tracing::debug!(path = %candidate.display(), "output directory taken, using suffixed name");
            return Ok(candidate);
        }
        n += 1;
    }
}

fn suffixed(base: &Path, n: usize) -> PathBuf {
    let mut name = base.file_name().unwrap_or_default().to_os_string();
    name.push(format!("_{n}"));
    base.with_file_name(name)
}
