//! Reading order from the NCX navigation document.

use crate::archive::{entry_text, strip_relative_prefix};
use crate::error::{ExtractError, Result};
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Suffix identifying the navigation document among archive entries.
pub const NCX_SUFFIX: &str = ".ncx";

/// Collect the `src` of every `<content>` element in document order.
///
/// Any XML error fails the whole document; callers get either the complete
/// list or an error, never a partial list.
pub fn parse_navigation(document: &str, data: &[u8]) -> Result<Vec<String>> {
    let text = entry_text(data);
    let mut reader = Reader::from_str(&text);
    let mut references = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                depth += 1;
                collect_source(document, &e, &mut references)?;
            }
            Ok(Event::Empty(e)) => collect_source(document, &e, &mut references)?,
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractError::parse(
                    document,
                    format!("{e} at byte {}", reader.error_position()),
                ))
            }
            _ => {}
        }
    }

    if depth > 0 {
        return Err(ExtractError::parse(
            document,
            format!("{depth} element(s) left unclosed"),
        ));
    }

    Ok(references)
}

fn collect_source(
    document: &str,
    element: &BytesStart,
    references: &mut Vec<String>,
) -> Result<()> {
    if element.local_name().as_ref() != b"content" {
        return Ok(());
    }

    for attr in element.attributes() {
        let attr = attr.map_err(|e| ExtractError::parse(document, e))?;
        if attr.key.as_ref() != b"src" {
            continue;
        }
        let raw =
            std::str::from_utf8(&attr.value).map_err(|e| ExtractError::parse(document, e))?;
        let src = unescape(raw).map_err(|e| ExtractError::parse(document, e))?;
        if let Some(entry) = strip_relative_prefix(&src) {
            references.push(entry.to_string());
        }
    }

    Ok(())
}
