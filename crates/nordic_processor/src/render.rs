/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

//! XML serialization.
//!
//! Element-only content is indented two spaces per level. Elements that hold
//! text are written on one line, children included, so pretty-printing never
//! adds whitespace to text content.

use std::io::Write;

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::document::{Element, Node};
use crate::ProcessorError;

const INDENT: &str = "  ";

/// Write `root` as a UTF-8 document with an XML declaration.
pub fn write_xml<W: Write>(root: &Element, out: W) -> Result<(), ProcessorError> {
    let mut writer = Writer::new(out);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.get_mut().write_all(b"\n")?;
    write_block(&mut writer, root, 0)?;
    writer.get_mut().write_all(b"\n")?;
    Ok(())
}

/// Serialize `root` into a string.
pub fn to_xml_string(root: &Element) -> Result<String, ProcessorError> {
    let mut buffer = Vec::new();
    write_xml(root, &mut buffer)?;
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}

fn write_block<W: Write>(
    writer: &mut Writer<W>,
    element: &Element,
    depth: usize,
) -> std::io::Result<()> {
    if element.children.is_empty() || element.has_text() {
        return write_inline(writer, element);
    }

    writer.write_event(Event::Start(BytesStart::new(element.name.as_str())))?;
    for child in element.elements() {
        newline(writer, depth + 1)?;
        write_block(writer, child, depth + 1)?;
    }
    newline(writer, depth)?;
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))
}

fn write_inline<W: Write>(writer: &mut Writer<W>, element: &Element) -> std::io::Result<()> {
    if element.children.is_empty() {
        return writer.write_event(Event::Empty(BytesStart::new(element.name.as_str())));
    }
    writer.write_event(Event::Start(BytesStart::new(element.name.as_str())))?;
    for child in &element.children {
        match child {
            Node::Text(text) => {
                writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?
            }
            Node::Element(inner) => write_inline(writer, inner)?,
        }
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))
}

fn newline<W: Write>(writer: &mut Writer<W>, depth: usize) -> std::io::Result<()> {
    let out = writer.get_mut();
    out.write_all(b"\n")?;
    for _ in 0..depth {
        out.write_all(INDENT.as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pretty_prints_element_content() {
        let root = Element::new("nordic_headwords").with_child(
            Element::new("nordic_headword")
                .with_child(Element::text_element("name", "hus"))
                .with_child(Element::new("translations")),
        );
        let xml = to_xml_string(&root).unwrap();
        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
                        <nordic_headwords>\n  \
                        <nordic_headword>\n    \
                        <name>hus</name>\n    \
                        <translations/>\n  \
                        </nordic_headword>\n\
                        </nordic_headwords>\n";
        assert_eq!(xml, expected);
    }

    #[test]
    fn test_mixed_content_stays_inline() {
        let root = Element::new("english")
            .with_child("see ")
            .with_child(Element::text_element("untranslatable", "foo"))
            .with_child(Element::text_element("untranslatable", "bar"))
            .with_child(" also");
        let xml = to_xml_string(&root).unwrap();
        assert!(xml.contains(
            "<english>see <untranslatable>foo</untranslatable><untranslatable>bar</untranslatable> also</english>"
        ));
    }

    #[test]
    fn test_text_is_escaped() {
        let root = Element::text_element("article", "Smith & <Sons>");
        let xml = to_xml_string(&root).unwrap();
        assert!(xml.contains("<article>Smith &amp; &lt;Sons&gt;</article>"));

        let root = Element::text_element("article", "don't \"quote\"");
        let xml = to_xml_string(&root).unwrap();
        assert!(xml.contains("<article>don't \"quote\"</article>"));
    }

    #[test]
    fn test_non_ascii_is_written_as_utf8() {
        let root = Element::text_element("name", "blåbærsyltetøy");
        let xml = to_xml_string(&root).unwrap();
        assert!(xml.contains("<name>blåbærsyltetøy</name>"));
    }
}
