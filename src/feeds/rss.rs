//! Minimal RSS 2.0 item reader built on `quick-xml`.
//!
//! Only `item/title`, `item/link` and `item/pubDate` are read. Text, CDATA
//! sections and entity references inside those elements are concatenated;
//! everything else in the document is skipped.

use crate::error::FetchError;
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;

/// An `<item>` exactly as the feed published it, before any cleaning.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RawItem {
    pub title: String,
    pub link: String,
    pub pub_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Link,
    PubDate,
}

impl Field {
    fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"title" => Some(Field::Title),
            b"link" => Some(Field::Link),
            b"pubDate" => Some(Field::PubDate),
            _ => None,
        }
    }

    fn slot<'a>(&self, item: &'a mut RawItem) -> &'a mut String {
        match self {
            Field::Title => &mut item.title,
            Field::Link => &mut item.link,
            Field::PubDate => &mut item.pub_date,
        }
    }
}

/// Read every `<item>` of an RSS document, in document order.
///
/// Field values are trimmed. Items missing a field simply carry an empty
/// string for it; the caller decides what to skip.
pub fn parse_items(xml: &str) -> Result<Vec<RawItem>, FetchError> {
    let mut reader = Reader::from_str(xml);
    let mut items = Vec::new();
    let mut current: Option<RawItem> = None;
    let mut field: Option<Field> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| xml_error(&reader, e))?;

        match event {
            Event::Start(start) => {
                let tag = start.name();
                if tag.as_ref() == b"item" {
                    current = Some(RawItem::default());
                    field = None;
                } else if current.is_some() && field.is_none() {
                    field = Field::from_tag(tag.as_ref());
                }
            }
            Event::End(end) => {
                let tag = end.name();
                if tag.as_ref() == b"item" {
                    if let Some(mut item) = current.take() {
                        item.title = item.title.trim().to_string();
                        item.link = item.link.trim().to_string();
                        item.pub_date = item.pub_date.trim().to_string();
                        items.push(item);
                    }
                    field = None;
                } else if field.is_some() && Field::from_tag(tag.as_ref()) == field {
                    field = None;
                }
            }
            Event::Text(text) => {
                if let (Some(item), Some(f)) = (current.as_mut(), field) {
                    let decoded = text.decode().map_err(|e| xml_error(&reader, e))?;
                    f.slot(item).push_str(&decoded);
                }
            }
            Event::CData(data) => {
                if let (Some(item), Some(f)) = (current.as_mut(), field) {
                    let decoded = data.decode().map_err(|e| xml_error(&reader, e))?;
                    f.slot(item).push_str(&decoded);
                }
            }
            Event::GeneralRef(reference) => {
                if let (Some(item), Some(f)) = (current.as_mut(), field) {
                    let slot = f.slot(item);
                    let name = reference.decode().map_err(|e| xml_error(&reader, e))?;
                    match reference.resolve_char_ref() {
                        Ok(Some(ch)) => slot.push(ch),
                        _ => match resolve_predefined_entity(&name) {
                            Some(value) => slot.push_str(value),
                            // HTML entities such as &nbsp; are left for the title cleaner
                            None => {
                                slot.push('&');
                                slot.push_str(&name);
                                slot.push(';');
                            }
                        },
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(items)
}

fn xml_error(reader: &Reader<&[u8]>, e: impl std::fmt::Display) -> FetchError {
    FetchError::Xml {
        position: reader.error_position() as u64,
        message: e.to_string(),
    }
}
