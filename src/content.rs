//! First-illustration lookup inside a chapter document.

use crate::archive::{entry_text, strip_relative_prefix};
use scraper::node::Element;
use scraper::{ElementRef, Html};

/// Return the entry name of the first `<img>` in `data`, if any.
///
/// The HTML parser recovers from malformed markup, so broken documents
/// simply yield whatever image survives recovery, or none.
pub fn first_image(data: &[u8]) -> Option<String> {
    let text = entry_text(data);
    let html = Html::parse_document(&text);

    find_first(&html, |el| el.name() == "img")
        .and_then(|img| img.value().attr("src"))
        .and_then(strip_relative_prefix)
        .map(str::to_string)
}

/// Pre-order walk returning the first element accepted by `matches`.
fn find_first<'a, F>(html: &'a Html, matches: F) -> Option<ElementRef<'a>>
where
    F: Fn(&Element) -> bool,
{
    html.tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| matches(el.value()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::chapter;

    #[test]
    fn test_single_image() {
        let doc = chapter(Some("../Images/pic.png"));
        assert_eq!(
            first_image(doc.as_bytes()),
            Some("Images/pic.png".to_string())
        );
    }

    #[test]
    fn test_first_image_wins() {
        let doc = r#"<html><body>
<div><p><img src="../img/first.jpg"/></p></div>
<img src="../img/second.jpg"/>
</body></html>"#;
        assert_eq!(
            first_image(doc.as_bytes()),
            Some("img/first.jpg".to_string())
        );
    }

    #[test]
    fn test_no_image() {
        let doc = chapter(None);
        assert_eq!(first_image(doc.as_bytes()), None);
    }

    #[test]
    fn test_img_without_src_does_not_fall_through() {
        let doc = r#"<html><body><img alt="x"/><img src="../b.png"/></body></html>"#;
        assert_eq!(first_image(doc.as_bytes()), None);
    }

    #[test]
    fn test_svg_image_is_not_an_img() {
        let doc = r#"<html><body><svg><image href="../cover.jpg"/></svg></body></html>"#;
        assert_eq!(first_image(doc.as_bytes()), None);
    }

    #[test]
    fn test_sloppy_markup_still_resolves() {
        let doc = "<html><body><p>unclosed <b>tags<img src='../x/y.gif'>";
        assert_eq!(
            first_image(doc.as_bytes()),
            Some("x/y.gif".to_string())
        );
    }

    #[test]
    fn test_declared_legacy_encoding() {
        let source = "<?xml version=\"1.0\" encoding=\"Shift_JIS\"?>\
<html><body><p>挿絵</p><img src=\"../img/a.png\"/></body></html>";
        let (bytes, _, _) = encoding_rs::SHIFT_JIS.encode(source);
        assert!(std::str::from_utf8(&bytes).is_err());

        assert_eq!(first_image(&bytes), Some("img/a.png".to_string()));
    }

    #[test]
    fn test_binary_garbage_has_no_image() {
        assert_eq!(first_image(b"\x00\xFF\xFE<<<>>\x89PNG\r\n"), None);
    }
}
