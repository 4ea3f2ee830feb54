//! Byte-level decoding of scenario XML files.
//!
//! Scenario dumps come out of different tools in different encodings, so
//! the text encoding is picked from the byte-order mark before the markup
//! is parsed:
//!
//! - `FF FE` - UTF-16 LE
//! - `FE FF` - UTF-16 BE
//! - `EF BB BF` - UTF-8 with BOM
//! - anything else - UTF-8

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE, UTF_8};
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use thiserror::Error;

use super::document::{XmlDocument, XmlNode};

/// UTF-16 LE BOM: FF FE
const UTF16_LE_BOM: &[u8] = &[0xFF, 0xFE];
/// UTF-16 BE BOM: FE FF
const UTF16_BE_BOM: &[u8] = &[0xFE, 0xFF];
/// UTF-8 BOM: EF BB BF
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Errors that can occur while turning bytes into an XML tree.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Malformed {encoding} byte sequence")]
    MalformedText { encoding: &'static str },

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Invalid attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("Unclosed element <{0}>")]
    UnclosedElement(String),

    #[error("Unexpected closing tag </{0}>")]
    UnexpectedClose(String),

    #[error("Closing tag </{found}> does not match <{expected}>")]
    MismatchedClose { expected: String, found: String },

    #[error("Document has no root element")]
    NoRootElement,

    #[error("Document has more than one root element (second is <{0}>)")]
    MultipleRootElements(String),
}

/// Result type for decoding operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Pick the text encoding from the byte-order mark.
///
/// Returns the encoding and the length of the mark to strip.
pub fn detect_encoding(bytes: &[u8]) -> (&'static Encoding, usize) {
    if bytes.starts_with(UTF16_LE_BOM) {
        (UTF_16LE, UTF16_LE_BOM.len())
    } else if bytes.starts_with(UTF16_BE_BOM) {
        (UTF_16BE, UTF16_BE_BOM.len())
    } else if bytes.starts_with(UTF8_BOM) {
        (UTF_8, UTF8_BOM.len())
    } else {
        (UTF_8, 0)
    }
}

/// Decode raw file bytes to text, stripping any byte-order mark.
///
/// Malformed sequences are an error rather than being replaced.
pub fn decode_text(bytes: &[u8]) -> DecodeResult<Cow<'_, str>> {
    let (encoding, bom_len) = detect_encoding(bytes);
    log::debug!("Decoding scenario text as {}", encoding.name());

    encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
        .ok_or(DecodeError::MalformedText {
            encoding: encoding.name(),
        })
}

/// Decode raw file bytes into an XML tree.
pub fn decode(bytes: &[u8]) -> DecodeResult<XmlDocument> {
    let text = decode_text(bytes)?;
    parse_xml(&text)
}

/// Parse XML text into an element tree.
pub fn parse_xml(text: &str) -> DecodeResult<XmlDocument> {
    let mut reader = Reader::from_str(text);
    reader.trim_text(true);
    // Close tags are matched against the open-element stack below
    reader.check_end_names(false);

    // Open elements, innermost last
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                stack.push(read_element(&reader, &start)?);
            }
            Event::Empty(start) => {
                let node = read_element(&reader, &start)?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::End(end) => {
                let name = reader.decoder().decode(end.name().as_ref())?.into_owned();
                let node = stack
                    .pop()
                    .ok_or_else(|| DecodeError::UnexpectedClose(name.clone()))?;
                if node.tag != name {
                    return Err(DecodeError::MismatchedClose {
                        expected: node.tag,
                        found: name,
                    });
                }
                attach(&mut stack, &mut root, node)?;
            }
            Event::Eof => break,
            // Declarations, comments, text: nothing the scenario format uses
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(DecodeError::UnclosedElement(open.tag));
    }

    root.map(|root| XmlDocument { root })
        .ok_or(DecodeError::NoRootElement)
}

/// Build a childless node from a start tag.
fn read_element(reader: &Reader<&[u8]>, start: &BytesStart<'_>) -> DecodeResult<XmlNode> {
    let decoder = reader.decoder();
    let mut node = XmlNode::new(decoder.decode(start.name().as_ref())?.into_owned());

    for attr in start.attributes() {
        let attr = attr?;
        let key = decoder.decode(attr.key.as_ref())?.into_owned();
        let value = attr.unescape_value()?.into_owned();
        node.attributes.push((key, value));
    }

    Ok(node)
}

/// Attach a finished node to its parent, or make it the document root.
fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) -> DecodeResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else if root.is_some() {
        return Err(DecodeError::MultipleRootElements(node.tag));
    } else {
        *root = Some(node);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Root>
  <BymlRoot>
    <T192>
      <T160 N="Id" V="obj&amp;1" />
      <T193 N="Translate">
        <T210 N="X" V="1.5" />
      </T193>
    </T192>
  </BymlRoot>
</Root>
"#;

    fn utf16le(text: &str) -> Vec<u8> {
        let mut bytes = UTF16_LE_BOM.to_vec();
        bytes.extend(text.encode_utf16().flat_map(|u| u.to_le_bytes()));
        bytes
    }

    fn utf16be(text: &str) -> Vec<u8> {
        let mut bytes = UTF16_BE_BOM.to_vec();
        bytes.extend(text.encode_utf16().flat_map(|u| u.to_be_bytes()));
        bytes
    }

    fn utf8_bom(text: &str) -> Vec<u8> {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(text.as_bytes());
        bytes
    }

    #[test]
    fn test_detect_encoding() {
        assert_eq!(detect_encoding(&[0xFF, 0xFE, b'<']), (UTF_16LE, 2));
        assert_eq!(detect_encoding(&[0xFE, 0xFF, 0, b'<']), (UTF_16BE, 2));
        assert_eq!(detect_encoding(&[0xEF, 0xBB, 0xBF, b'<']), (UTF_8, 3));
        assert_eq!(detect_encoding(b"<Root/>"), (UTF_8, 0));
        assert_eq!(detect_encoding(b""), (UTF_8, 0));
    }

    #[test]
    fn test_all_encodings_produce_same_tree() {
        let plain = decode(SAMPLE.as_bytes()).unwrap();

        assert_eq!(decode(&utf16le(SAMPLE)).unwrap(), plain);
        assert_eq!(decode(&utf16be(SAMPLE)).unwrap(), plain);
        assert_eq!(decode(&utf8_bom(SAMPLE)).unwrap(), plain);
    }

    #[test]
    fn test_parse_structure() {
        let doc = decode(SAMPLE.as_bytes()).unwrap();

        assert_eq!(doc.root.tag, "Root");
        let scenario = doc.root.child("BymlRoot").unwrap().child("T192").unwrap();
        assert_eq!(scenario.children.len(), 2);

        let id = scenario.find_keyed("T160", "N", "Id").unwrap();
        assert_eq!(id.attr("V"), Some("obj&1"));

        let translate = scenario.find_keyed("T193", "N", "Translate").unwrap();
        assert_eq!(translate.children[0].attr("V"), Some("1.5"));
    }

    #[test]
    fn test_malformed_utf8_is_an_error() {
        let bytes = b"<Root N=\"\xC3\x28\"/>";
        match decode(bytes) {
            Err(DecodeError::MalformedText { encoding }) => assert_eq!(encoding, "UTF-8"),
            other => panic!("Expected MalformedText, got {:?}", other),
        }
    }

    #[test]
    fn test_truncated_utf16_is_an_error() {
        let mut bytes = utf16le("<Root/>");
        bytes.push(b'<');
        assert!(matches!(
            decode(&bytes),
            Err(DecodeError::MalformedText { .. })
        ));
    }

    #[test]
    fn test_unclosed_element_is_an_error() {
        assert!(decode(b"<Root><BymlRoot>").is_err());
    }

    #[test]
    fn test_mismatched_close_is_an_error() {
        match decode(b"<Root><A></B></Root>") {
            Err(DecodeError::MismatchedClose { expected, found }) => {
                assert_eq!(expected, "A");
                assert_eq!(found, "B");
            }
            other => panic!("Expected MismatchedClose, got {:?}", other),
        }
    }

    #[test]
    fn test_stray_close_is_an_error() {
        match decode(b"<A/></B>") {
            Err(DecodeError::UnexpectedClose(name)) => assert_eq!(name, "B"),
            other => panic!("Expected UnexpectedClose, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_document_is_an_error() {
        assert!(matches!(decode(b""), Err(DecodeError::NoRootElement)));
        assert!(matches!(
            decode(b"<?xml version=\"1.0\"?>"),
            Err(DecodeError::NoRootElement)
        ));
    }

    #[test]
    fn test_multiple_roots_is_an_error() {
        assert!(matches!(
            decode(b"<A/><B/>"),
            Err(DecodeError::MultipleRootElements(tag)) if tag == "B"
        ));
    }
}
