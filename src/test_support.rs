//! Fixture builders shared by the unit tests.

use std::io::Write;
use std::path::Path;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// Write a zip container with the given entries, in order.
pub fn write_epub(path: &Path, entries: &[(&str, &[u8])]) {
    let file = std::fs::File::create(path).unwrap();
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();
    for (name, data) in entries {
        zip.start_file(*name, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap();
}

/// Minimal NCX pointing at each `src` in reading order.
pub fn ncx(sources: &[&str]) -> String {
    let mut points = String::new();
    for (i, src) in sources.iter().enumerate() {
        points.push_str(&format!(
            "    <navPoint id=\"p{n}\" playOrder=\"{n}\">\n      \
             <navLabel><text>Part {n}</text></navLabel>\n      \
             <content src=\"{src}\"/>\n    </navPoint>\n",
            n = i + 1,
        ));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <ncx xmlns=\"http://www.daisy.org/z3986/2005/ncx/\" version=\"2005-1\">\n  \
         <navMap>\n{points}  </navMap>\n</ncx>\n"
    )
}

/// XHTML chapter embedding a single image, or none.
pub fn chapter(image: Option<&str>) -> String {
    let body = match image {
        Some(src) => format!("<div class=\"illus\"><img src=\"{src}\" alt=\"\"/></div>"),
        None => "<p>Text only.</p>".to_string(),
    };
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
         <html xmlns=\"http://www.w3.org/1999/xhtml\"><head><title>c</title></head>\
         <body>{body}</body></html>"
    )
}

/// Entry names of a zip file, in order.
pub fn zip_entry_names(path: &Path) -> Vec<String> {
    let file = std::fs::File::open(path).unwrap();
    let mut zip = zip::ZipArchive::new(file).unwrap();
    (0..zip.len())
        .map(|i| zip.by_index_raw(i).unwrap().name().to_string())
        .collect()
}

pub fn zip_entry(path: &Path, name: &str) -> Vec<u8> {
    use std::io::Read;

    let file = std::fs::File::open(path).unwrap();
    let mut zip = zip::ZipArchive::new(file).unwrap();
    let mut entry = zip.by_name(name).unwrap();
    let mut data = Vec::new();
    entry.read_to_end(&mut data).unwrap();
    data
}
