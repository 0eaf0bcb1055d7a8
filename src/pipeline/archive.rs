//! Writes a directory tree into a zip archive.

use anyhow::{Context, Result};
use std::fs::File;
use std::io;
use std::path::Path;
use tempfile::NamedTempFile;
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Zips the contents of `source` into `destination`, rooted under `root_name/`.
///
/// The archive is assembled in a temporary file next to `destination` and only
/// moved into place once complete, replacing any existing file. Returns the
/// number of files added.
pub(crate) fn write_zip_archive(source: &Path, root_name: &str, destination: &Path) -> Result<u64> {
    let parent = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let temp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create a temporary file in '{}'", parent.display()))?;

    let mut writer = ZipWriter::new(temp);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut files = 0;

    writer
        .add_directory(format!("{}/", root_name), options)
        .context("Failed to add the root directory to the archive")?;

    for entry in WalkDir::new(source)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.with_context(|| format!("Failed to walk '{}'", source.display()))?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .context("Walked entry outside of the source directory")?;
        let name = entry_name(root_name, relative);
        let file_type = entry.file_type();

        if file_type.is_dir() {
            writer
                .add_directory(format!("{}/", name), options)
                .with_context(|| format!("Failed to add directory '{}'", name))?;
        } else if file_type.is_symlink() {
            let target = std::fs::read_link(entry.path())
                .with_context(|| format!("Failed to read link '{}'", entry.path().display()))?;
            writer
                .add_symlink(name.clone(), target.to_string_lossy(), options)
                .with_context(|| format!("Failed to add link '{}'", name))?;
        } else {
            writer
                .start_file(name.clone(), options)
                .with_context(|| format!("Failed to add file '{}'", name))?;
            let mut input = File::open(entry.path())
                .with_context(|| format!("Failed to open '{}'", entry.path().display()))?;
            io::copy(&mut input, &mut writer)
                .with_context(|| format!("Failed to compress '{}'", entry.path().display()))?;
            files += 1;
        }
    }

    let temp = writer.finish().context("Failed to finish the archive")?;
    temp.persist(destination)
        .with_context(|| format!("Failed to write archive '{}'", destination.display()))?;
    log::debug!("Wrote {} files to {}", files, destination.display());
    Ok(files)
}

/// Zip entry names always use `/`, whatever the platform separator.
fn entry_name(root_name: &str, relative: &Path) -> String {
    std::iter::once(root_name.to_string())
        .chain(
            relative
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned()),
        )
        .collect::<Vec<_>>()
        .join("/")
}
