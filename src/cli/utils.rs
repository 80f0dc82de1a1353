//! Convenience helpers shared across command handlers.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Persist bytes either to a file or stdout when `-` is provided.
pub fn write_output(path: &Path, content: &[u8]) -> Result<()> {
    if is_stdout(path) {
        io::stdout()
            .write_all(content)
            .context("failed to write to stdout")?;
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}

pub fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}
