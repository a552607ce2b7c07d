use std::fmt;

/// Output file name for one extracted image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageName {
    pub stem: String,
    /// Extension of the source entry including its leading dot, or empty.
    pub extension: String,
}

impl fmt::Display for ImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem, self.extension)
    }
}

/// Assigns names to images in reading order for a single book.
///
/// Cover and credits pages are pulled out under fixed names; everything
/// else is numbered `0001`, `0002`, ...
#[derive(Debug)]
pub struct ImageNamer {
    next: u32,
}

impl Default for ImageNamer {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageNamer {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn assign(&mut self, entry: &str) -> ImageName {
        let stem = if entry.contains("cover") {
            "cover".to_string()
        } else if entry.contains("createby") {
            "createby".to_string()
        } else {
            let stem = format!("{:04}", self.next);
            self.next += 1;
            stem
        };

        ImageName {
            stem,
            extension: extension(entry).to_string(),
        }
    }
}

/// Everything from the last `.` of the final path segment.
fn extension(entry: &str) -> &str {
    let file_name = entry.rsplit('/').next().unwrap_or(entry);
    match file_name.rfind('.') {
        Some(dot) => &file_name[dot..],
        None => "",
    }
}
