//! XML to canonical tree parsing
//!
//! Element mapping rules:
//! - the document becomes a single-entry mapping keyed by the root tag;
//! - an element with neither attributes nor child elements becomes its
//!   trimmed text, or null when it has none;
//! - otherwise it becomes a mapping of `@attr` entries, then child elements,
//!   then any remaining text under `#text`;
//! - a child tag seen once maps to its value directly, a tag repeated among
//!   siblings collapses into a sequence in document order.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{ParseError, ParseResult};
use crate::parser::document::{CanonicalDocument, Mapping};
use crate::parser::FormatTag;

const TEXT_KEY: &str = "#text";
const ATTRIBUTE_PREFIX: char = '@';

/// An element whose closing tag has not been read yet
#[derive(Debug)]
struct OpenElement {
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Mapping,
}

impl OpenElement {
    fn new(name: String, attributes: Vec<(String, String)>) -> Self {
        Self {
            name,
            attributes,
            text: String::new(),
            children: Mapping::new(),
        }
    }

    /// Attach a finished child, collapsing repeated tags into a sequence
    fn add_child(&mut self, name: String, value: CanonicalDocument) {
        match self.children.get_mut(&name) {
            // Element values are never sequences, so an existing sequence
            // can only be an earlier collapse of this tag.
            Some(CanonicalDocument::Sequence(items)) => items.push(value),
            Some(existing) => {
                let first = std::mem::replace(existing, CanonicalDocument::null());
                *existing = CanonicalDocument::Sequence(vec![first, value]);
            }
            None => self.children.insert(name, value),
        }
    }

    fn finish(self) -> (String, CanonicalDocument) {
        let text = self.text.trim();

        if self.attributes.is_empty() && self.children.is_empty() {
            let value = if text.is_empty() {
                CanonicalDocument::null()
            } else {
                CanonicalDocument::string(text)
            };
            return (self.name, value);
        }

        let mut mapping = Mapping::new();
        for (key, value) in self.attributes {
            mapping.insert(format!("{}{}", ATTRIBUTE_PREFIX, key), CanonicalDocument::string(value));
        }
        for (key, value) in self.children {
            mapping.insert(key, value);
        }
        if !text.is_empty() {
            mapping.insert(TEXT_KEY, CanonicalDocument::string(text));
        }
        (self.name, CanonicalDocument::Mapping(mapping))
    }
}

/// Parse an XML document into a canonical tree.
///
/// `max_depth` bounds element nesting; `None` disables the check.
pub fn parse_xml(input: &str, max_depth: Option<usize>) -> ParseResult<CanonicalDocument> {
    let mut reader = Reader::from_str(input);
    reader.trim_text(true);
    reader.check_end_names(false);

    let mut stack: Vec<OpenElement> = Vec::new();
    let mut root: Option<(String, CanonicalDocument)> = None;

    let fail = |message: String, offset: usize| {
        ParseError::new(FormatTag::Xml, message, None).at_offset(input, offset)
    };

    loop {
        let event = reader
            .read_event()
            .map_err(|e| fail(e.to_string(), reader.buffer_position()))?;
        let position = reader.buffer_position();

        match event {
            Event::Start(start) => {
                let element = open_element(&start, &stack, &root, max_depth)
                    .map_err(|message| fail(message, position))?;
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = open_element(&start, &stack, &root, max_depth)
                    .map_err(|message| fail(message, position))?;
                close_element(element, &mut stack, &mut root);
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                let element = match stack.pop() {
                    Some(element) => element,
                    None => return Err(fail(format!("unexpected closing tag </{}>", name), position)),
                };
                if element.name != name {
                    return Err(fail(
                        format!(
                            "mismatched closing tag: expected </{}>, found </{}>",
                            element.name, name
                        ),
                        position,
                    ));
                }
                close_element(element, &mut stack, &mut root);
            }
            Event::Text(text) => {
                let content = text
                    .unescape()
                    .map_err(|e| fail(e.to_string(), position))?;
                append_text(&mut stack, &content).map_err(|message| fail(message, position))?;
            }
            Event::CData(cdata) => {
                let content = String::from_utf8_lossy(&cdata).into_owned();
                append_text(&mut stack, &content).map_err(|message| fail(message, position))?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            // carry no structure.
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(fail(format!("unclosed element <{}>", open.name), input.len()));
    }

    match root {
        Some((name, value)) => {
            let mut document = Mapping::new();
            document.insert(name, value);
            Ok(CanonicalDocument::Mapping(document))
        }
        None => Err(fail("no root element found".to_string(), input.len())),
    }
}

fn open_element(
    start: &BytesStart<'_>,
    stack: &[OpenElement],
    root: &Option<(String, CanonicalDocument)>,
    max_depth: Option<usize>,
) -> Result<OpenElement, String> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    if stack.is_empty() {
        if let Some((existing, _)) = root {
            return Err(format!(
                "multiple root elements: <{}> follows <{}>",
                name, existing
            ));
        }
    }

    if let Some(limit) = max_depth {
        if stack.len() >= limit {
            return Err(format!("maximum nesting depth exceeded: {}", limit));
        }
    }

    let attributes = read_attributes(start)?;
    Ok(OpenElement::new(name, attributes))
}

fn read_attributes(start: &BytesStart<'_>) -> Result<Vec<(String, String)>, String> {
    start
        .attributes()
        .map(|attribute| {
            let attribute = attribute.map_err(|e| e.to_string())?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(|e| e.to_string())?
                .into_owned();
            Ok((key, value))
        })
        .collect()
}

fn close_element(
    element: OpenElement,
    stack: &mut [OpenElement],
    root: &mut Option<(String, CanonicalDocument)>,
) {
    let (name, value) = element.finish();
    match stack.last_mut() {
        Some(parent) => parent.add_child(name, value),
        None => *root = Some((name, value)),
    }
}

fn append_text(stack: &mut [OpenElement], content: &str) -> Result<(), String> {
    match stack.last_mut() {
        Some(current) => {
            current.text.push_str(content);
            Ok(())
        }
        None if content.trim().is_empty() => Ok(()),
        None => Err(format!(
            "text outside the root element: {:?}",
            preview(content.trim())
        )),
    }
}

fn preview(content: &str) -> String {
    const LIMIT: usize = 32;
    if content.chars().count() <= LIMIT {
        content.to_string()
    } else {
        let head: String = content.chars().take(LIMIT).collect();
        format!("{}...", head)
    }
}
