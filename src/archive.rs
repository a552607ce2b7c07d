use crate::error::{ExtractError, Result};
use std::borrow::Cow;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use zip::ZipArchive;

/// Number of leading bytes dropped from `src` attributes to turn them into
/// entry names. EPUB documents reference siblings as `../Images/x.png`.
pub const RELATIVE_PREFIX_LEN: usize = 3;

/// Read-only view of an EPUB container.
///
/// The underlying file handle lives as long as the value; dropping it on any
/// return path closes the archive.
pub struct EpubArchive {
    zip: ZipArchive<BufReader<File>>,
    names: Vec<String>,
}

impl EpubArchive {
    pub fn open(path: &Path) -> Result<Self> {
        let open_error = |source| ExtractError::Open {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(|e| open_error(e.into()))?;
        let mut zip = ZipArchive::new(BufReader::new(file)).map_err(open_error)?;

        let mut names = Vec::with_capacity(zip.len());
        for index in 0..zip.len() {
            let entry = zip.by_index_raw(index).map_err(open_error)?;
            names.push(entry.name().to_string());
        }

        Ok(Self { zip, names })
    }

    /// Entry names in central directory order.
    pub fn entry_names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Last entry whose name ends with `suffix`.
    pub fn find_by_suffix(&self, suffix: &str) -> Option<&str> {
        self.names
            .iter()
            .rev()
            .find(|n| n.ends_with(suffix))
            .map(String::as_str)
    }

    pub fn read(&mut self, name: &str) -> Result<Vec<u8>> {
        let read_error = |source| ExtractError::Read {
            entry: name.to_string(),
            source,
        };

        let mut entry = self
            .zip
            .by_name(name)
            .map_err(|e| read_error(e.into()))?;
        let mut data = Vec::new();
        entry.read_to_end(&mut data).map_err(read_error)?;
        Ok(data)
    }
}

/// Map a document-relative `src` value onto an archive entry name.
///
/// Returns `None` when the value is too short to carry the prefix.
pub fn strip_relative_prefix(src: &str) -> Option<&str> {
    src.get(RELATIVE_PREFIX_LEN..)
}

/// Decode a markup entry.
///
/// UTF-8 is tried first (a BOM is honoured), then the encoding named in the
/// `<?xml ... encoding="..."?>` declaration, then Windows-1252. Decoding
/// never fails; unmappable bytes become U+FFFD.
pub fn entry_text(data: &[u8]) -> Cow<'_, str> {
    let (text, _, malformed) = encoding_rs::UTF_8.decode(data);
    if !malformed {
        return text;
    }

    if let Some(encoding) = xml_encoding(data).and_then(encoding_rs::Encoding::for_label) {
        let (text, _, _) = encoding.decode(data);
        return text;
    }

    let (text, _, _) = encoding_rs::WINDOWS_1252.decode(data);
    text
}

/// Label from the XML declaration, looked up in the first 100 bytes.
fn xml_encoding(data: &[u8]) -> Option<&[u8]> {
    let head = &data[..data.len().min(100)];
    let decl = head.windows(5).position(|w| w == b"<?xml")?;
    let head = &head[decl..];
    let attr = head
        .windows(9)
        .position(|w| w.eq_ignore_ascii_case(b"encoding="))?;
    let value = &head[attr + 9..];

    let quote = *value.first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let end = value[1..].iter().position(|&b| b == quote)?;
    Some(&value[1..1 + end])
}
