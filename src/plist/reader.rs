//! Property-list tree reader
//!
//! Reads a plist XML document into an in-memory value tree. The five
//! scalar tags the importer decodes (`<integer>`, `<string>`, `<date>`,
//! `<true/>`, `<false/>`) and dict nesting are understood; any other
//! value element is skipped wholesale and recorded as ignored, which
//! keeps key/value pairing intact without failing on fields newer
//! export versions add.
//!
//! Text is deliberately not trimmed: string values keep their literal
//! content. Whitespace between structural elements is skipped where it
//! occurs instead.

use super::error::MalformedDocument;
use chrono::{DateTime, NaiveDateTime, Utc};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::BufRead;

/// Timestamp layout used by library exports (always UTC).
const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// One node of the parsed property-list tree.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PlistValue {
    /// Associative node: key/value entries in document order.
    Dict(Vec<(String, PlistValue)>),
    Integer(i64),
    Text(String),
    Date(DateTime<Utc>),
    Flag(bool),
    /// A value tag outside the supported set, skipped without decoding.
    Ignored,
}

/// Read a whole plist document and return the value under its root.
pub(crate) fn read_document<R: BufRead>(input: R) -> Result<PlistValue, MalformedDocument> {
    let mut reader = Reader::from_reader(input);
    let mut buf = Vec::new();

    // Locate the document root, skipping the declaration, the doctype
    // and any comments.
    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(_) => {
                buf.clear();
                return read_root_value(&mut reader);
            }
            Event::Empty(_) | Event::Eof => return Err(MalformedDocument::MissingTrackTable),
            _ => {}
        }
        buf.clear();
    }
}

/// Read the root element's single value child, then drain the rest of
/// the document so ill-formed trailing markup still fails.
fn read_root_value<R: BufRead>(reader: &mut Reader<R>) -> Result<PlistValue, MalformedDocument> {
    let mut buf = Vec::new();
    let mut value: Option<PlistValue> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                if value.is_some() {
                    return Err(MalformedDocument::UnexpectedStructure(
                        "multiple values under the document root".to_string(),
                    ));
                }
                let tag = e.name().as_ref().to_vec();
                buf.clear();
                value = Some(read_value(reader, &tag, "")?);
                continue;
            }
            Event::Empty(e) => {
                if value.is_some() {
                    return Err(MalformedDocument::UnexpectedStructure(
                        "multiple values under the document root".to_string(),
                    ));
                }
                value = Some(empty_value(e.name().as_ref(), "")?);
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(MalformedDocument::UnexpectedStructure(
                    "unexpected end of document".to_string(),
                ))
            }
            _ => {}
        }
        buf.clear();
    }

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    value.ok_or(MalformedDocument::MissingTrackTable)
}

/// Parse one value element whose start tag was just consumed.
///
/// `key` is the preceding dict key, used only for error context.
fn read_value<R: BufRead>(
    reader: &mut Reader<R>,
    tag: &[u8],
    key: &str,
) -> Result<PlistValue, MalformedDocument> {
    match tag {
        b"dict" => read_dict(reader),
        b"integer" => {
            let text = read_text(reader, "integer")?;
            parse_integer(&text, key)
        }
        b"string" => Ok(PlistValue::Text(read_text(reader, "string")?)),
        b"date" => {
            let text = read_text(reader, "date")?;
            parse_date(&text, key)
        }
        b"true" => {
            skip_element(reader)?;
            Ok(PlistValue::Flag(true))
        }
        b"false" => {
            skip_element(reader)?;
            Ok(PlistValue::Flag(false))
        }
        _ => {
            skip_element(reader)?;
            Ok(PlistValue::Ignored)
        }
    }
}

/// Decode a self-closing value element.
fn empty_value(tag: &[u8], key: &str) -> Result<PlistValue, MalformedDocument> {
    match tag {
        b"true" => Ok(PlistValue::Flag(true)),
        b"false" => Ok(PlistValue::Flag(false)),
        b"dict" => Ok(PlistValue::Dict(Vec::new())),
        b"string" => Ok(PlistValue::Text(String::new())),
        b"integer" => parse_integer("", key),
        b"date" => parse_date("", key),
        _ => Ok(PlistValue::Ignored),
    }
}

/// Read a dict body: alternating `<key>` and value elements.
///
/// A key with no following value, or a value with no preceding key,
/// is a pairing defect and fails the whole parse.
fn read_dict<R: BufRead>(reader: &mut Reader<R>) -> Result<PlistValue, MalformedDocument> {
    let mut buf = Vec::new();
    let mut entries: Vec<(String, PlistValue)> = Vec::new();
    let mut pending_key: Option<String> = None;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let tag = e.name().as_ref().to_vec();
                buf.clear();
                match tag.as_slice() {
                    b"key" => {
                        if let Some(key) = pending_key.take() {
                            return Err(MalformedDocument::DanglingKey { key });
                        }
                        pending_key = Some(read_text(reader, "key")?);
                    }
                    value_tag => match pending_key.take() {
                        Some(key) => {
                            let value = read_value(reader, value_tag, &key)?;
                            entries.push((key, value));
                        }
                        None => {
                            return Err(MalformedDocument::ValueWithoutKey {
                                tag: String::from_utf8_lossy(value_tag).into_owned(),
                            })
                        }
                    },
                }
                continue;
            }
            Event::Empty(e) => {
                let tag = e.name().as_ref().to_vec();
                match tag.as_slice() {
                    b"key" => {
                        if let Some(key) = pending_key.take() {
                            return Err(MalformedDocument::DanglingKey { key });
                        }
                        pending_key = Some(String::new());
                    }
                    value_tag => match pending_key.take() {
                        Some(key) => {
                            let value = empty_value(value_tag, &key)?;
                            entries.push((key, value));
                        }
                        None => {
                            return Err(MalformedDocument::ValueWithoutKey {
                                tag: String::from_utf8_lossy(value_tag).into_owned(),
                            })
                        }
                    },
                }
            }
            Event::End(_) => {
                if let Some(key) = pending_key.take() {
                    return Err(MalformedDocument::DanglingKey { key });
                }
                return Ok(PlistValue::Dict(entries));
            }
            Event::Eof => {
                return Err(MalformedDocument::UnexpectedStructure(
                    "unexpected end of document inside dict".to_string(),
                ))
            }
            _ => {}
        }
        buf.clear();
    }
}

/// Accumulate the literal text content of a scalar element.
fn read_text<R: BufRead>(
    reader: &mut Reader<R>,
    element: &str,
) -> Result<String, MalformedDocument> {
    let mut buf = Vec::new();
    let mut content = String::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Text(t) => {
                let text = t.unescape().map_err(quick_xml::Error::from)?;
                content.push_str(&text);
            }
            Event::CData(t) => content.push_str(&String::from_utf8_lossy(&t.into_inner())),
            Event::End(_) => return Ok(content),
            Event::Start(_) | Event::Empty(_) => {
                return Err(MalformedDocument::UnexpectedStructure(format!(
                    "nested element inside <{}>",
                    element
                )))
            }
            Event::Eof => {
                return Err(MalformedDocument::UnexpectedStructure(
                    "unexpected end of document".to_string(),
                ))
            }
            _ => {}
        }
        buf.clear();
    }
}

/// Skip an element whose contents we do not decode.
fn skip_element<R: BufRead>(reader: &mut Reader<R>) -> Result<(), MalformedDocument> {
    let mut buf = Vec::new();
    let mut depth = 0usize;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                if depth == 0 {
                    return Ok(());
                }
                depth -= 1;
            }
            Event::Eof => {
                return Err(MalformedDocument::UnexpectedStructure(
                    "unexpected end of document".to_string(),
                ))
            }
            _ => {}
        }
        buf.clear();
    }
}

fn parse_integer(text: &str, field: &str) -> Result<PlistValue, MalformedDocument> {
    text.trim()
        .parse::<i64>()
        .map(PlistValue::Integer)
        .map_err(|_| MalformedDocument::BadInteger {
            field: field.to_string(),
            value: text.to_string(),
        })
}

fn parse_date(text: &str, field: &str) -> Result<PlistValue, MalformedDocument> {
    NaiveDateTime::parse_from_str(text.trim(), DATE_FORMAT)
        .map(|naive| PlistValue::Date(naive.and_utc()))
        .map_err(|_| MalformedDocument::BadDate {
            field: field.to_string(),
            value: text.to_string(),
        })
}
