//! Source listing plus manifest: the dashboard's `main.rs` and its
//! `Cargo.toml`, zipped under a single project folder. The archive is for
//! reading or sharing the code, not a buildable project on its own.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const PROJECT_FOLDER: &str = "youtube-analytics-seguro";
pub const DEFAULT_BUNDLE_NAME: &str = "youtube_analytics_completo.zip";

const SOURCE_LISTING: &str = include_str!("main.rs");
const DEPENDENCY_MANIFEST: &str = include_str!("../Cargo.toml");

/// Files written into the bundle, relative to [`PROJECT_FOLDER`].
#[must_use]
pub fn bundle_entries() -> [(&'static str, &'static str); 2] {
    [
        ("main.rs", SOURCE_LISTING),
        ("Cargo.toml", DEPENDENCY_MANIFEST),
    ]
}

/// Write the bundle zip to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn write_bundle(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create bundle file: {}", path.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, contents) in bundle_entries() {
        let entry = format!("{PROJECT_FOLDER}/{name}");
        zip.start_file(entry.as_str(), options)
            .with_context(|| format!("Failed to add {entry} to bundle"))?;
        zip.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write {entry} to bundle"))?;
    }

    zip.finish().context("Failed to finalize bundle")?;
    info!(path = %path.display(), "Bundle written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_embedded() {
        let entries = bundle_entries();
        assert!(entries[0].1.contains("fn main"));
        assert!(entries[1].1.contains("[package]"));
    }
}
