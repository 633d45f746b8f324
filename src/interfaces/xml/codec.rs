use crate::domain::envelope::Envelope;
use crate::error::{GatewayError, Result};
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::collections::BTreeMap;

const ROOT: &str = "xml";

fn xml_err(e: impl std::fmt::Display) -> GatewayError {
    GatewayError::Xml(e.to_string())
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// Serializes flat fields as `<xml><key>value</key>...</xml>`.
///
/// Values are escaped; keys must be plain XML names.
pub fn encode<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str)>) -> Result<String> {
    let mut writer = Writer::new(Vec::new());
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(xml_err)?;
    writer
        .write_event(Event::Start(BytesStart::new(ROOT)))
        .map_err(xml_err)?;

    for (key, value) in fields {
        if !is_valid_name(key) {
            return Err(GatewayError::Xml(format!("invalid field name `{key}`")));
        }
        writer
            .write_event(Event::Start(BytesStart::new(key)))
            .map_err(xml_err)?;
        writer
            .write_event(Event::Text(BytesText::new(value)))
            .map_err(xml_err)?;
        writer
            .write_event(Event::End(BytesEnd::new(key)))
            .map_err(xml_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(ROOT)))
        .map_err(xml_err)?;
    String::from_utf8(writer.into_inner()).map_err(xml_err)
}

/// Parses a gateway document into its top-level fields.
///
/// Text and CDATA content are both accepted and trimmed; anything nested
/// deeper than one level below the root is ignored. An empty document yields
/// an empty envelope.
pub fn decode(xml: &str) -> Result<Envelope> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut fields = BTreeMap::new();
    let mut depth = 0usize;
    let mut current: Option<(String, String)> = None;

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(e) => {
                depth += 1;
                if depth == 2 {
                    let name = String::from_utf8(e.name().as_ref().to_vec()).map_err(xml_err)?;
                    current = Some((name, String::new()));
                }
            }
            Event::Empty(e) if depth == 1 => {
                let name = String::from_utf8(e.name().as_ref().to_vec()).map_err(xml_err)?;
                fields.insert(name, String::new());
            }
            Event::Text(t) if depth == 2 => {
                if let Some((_, value)) = current.as_mut() {
                    value.push_str(&t.unescape().map_err(xml_err)?);
                }
            }
            Event::CData(c) if depth == 2 => {
                if let Some((_, value)) = current.as_mut() {
                    value.push_str(std::str::from_utf8(&c).map_err(xml_err)?);
                }
            }
            Event::End(_) => {
                if depth == 2
                    && let Some((name, value)) = current.take()
                {
                    fields.insert(name, value.trim().to_owned());
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(Envelope::new(fields))
}

/// [`decode`] over raw response bytes.
pub fn decode_bytes(bytes: &[u8]) -> Result<Envelope> {
    let text = std::str::from_utf8(bytes).map_err(xml_err)?;
    decode(text)
}
