use crate::error::{ExtractError, Result};
use std::collections::HashSet;
use std::ffi::OsString;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Suffix replacing the input's extension on the companion archive.
pub const OUTPUT_SUFFIX: &str = "_images.zip";

/// In-memory zip collecting the extracted images of one book.
pub struct ImageArchive {
    zip: ZipWriter<Cursor<Vec<u8>>>,
    options: SimpleFileOptions,
    names: HashSet<String>,
}

impl Default for ImageArchive {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageArchive {
    pub fn new() -> Self {
        // Fixed timestamps keep repeated runs byte-identical.
        let options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .last_modified_time(DateTime::default());

        Self {
            zip: ZipWriter::new(Cursor::new(Vec::new())),
            options,
            names: HashSet::new(),
        }
    }

    /// Store `data` under `name`. Returns `false` without writing when the
    /// name is already taken; the first image under a name is kept.
    pub fn add(&mut self, name: &str, data: &[u8]) -> Result<bool> {
        if self.names.contains(name) {
            return Ok(false);
        }

        self.zip
            .start_file(name, self.options)
            .map_err(|e| ExtractError::write(name, e))?;
        self.zip
            .write_all(data)
            .map_err(|e| ExtractError::write(name, e))?;
        self.names.insert(name.to_string());
        Ok(true)
    }

    pub fn entry_count(&self) -> usize {
        self.names.len()
    }

    /// Write the central directory and return the finished archive bytes.
    pub fn finish(self) -> Result<Vec<u8>> {
        let cursor = self
            .zip
            .finish()
            .map_err(|e| ExtractError::write("central directory", e))?;
        Ok(cursor.into_inner())
    }

    /// Finish the archive and store it at `path`, replacing any previous file.
    pub fn persist(self, path: &Path) -> Result<()> {
        let bytes = self.finish()?;
        std::fs::write(path, bytes)
            .map_err(|e| ExtractError::write(path.display().to_string(), e))
    }
}

/// `dir/book.epub` -> `dir/book_images.zip`.
///
/// Everything from the last `.` of the file name is dropped, so a file named
/// just `.epub` becomes `_images.zip`.
pub fn output_path(input: &Path) -> PathBuf {
    if let Some(name) = input.file_name().and_then(|n| n.to_str()) {
        let stem = name.rfind('.').map_or(name, |dot| &name[..dot]);
        return input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}"));
    }

    let mut name: OsString = input.with_extension("").into_os_string();
    name.push(OUTPUT_SUFFIX);
    PathBuf::from(name)
}
