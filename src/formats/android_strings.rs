//! Support for Android `strings.xml` resource files.
//!
//! Only `<string>` elements that are direct children of the root container are
//! read; `<plurals>` and `<string-array>` content is skipped. The text of a
//! string is every text node below it, inline markup flattened away, exactly
//! as found in the file (entities decoded, nothing trimmed, Android escapes
//! such as `\'` left alone). Line endings are normalized to `\n` as XML
//! requires.

use quick_xml::{
    Reader, Writer,
    escape::unescape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use std::io::{BufRead, Write};
use tracing::trace;

use crate::{
    error::Error,
    traits::Parser,
    types::{AllowList, StringTable},
};

#[derive(Debug, Default)]
pub struct Format {
    pub strings: Vec<StringResource>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringResource {
    pub name: String,
    pub value: String,
}

impl Format {
    /// Keeps the allow-listed strings. A name defined twice takes the later value.
    pub fn to_table(&self, allow_list: &AllowList) -> StringTable {
        let mut table = StringTable::new();
        for sr in &self.strings {
            if allow_list.contains(&sr.name) {
                table.insert(sr.name.as_str(), sr.value.as_str());
            } else {
                trace!(name = %sr.name, "skipping string outside allow-list");
            }
        }
        table
    }
}

impl Parser for Format {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut xml_reader = Reader::from_reader(reader);

        let mut buf = Vec::new();
        let mut strings = Vec::new();
        let mut depth = 0usize;
        let mut saw_root = false;

        loop {
            match xml_reader.read_event_into(&mut buf)? {
                Event::Start(_) | Event::Empty(_) if depth == 0 && saw_root => {
                    return Err(Error::invalid_resource("junk after document element"));
                }
                Event::Start(ref e) if depth == 1 && e.name().as_ref() == b"string" => {
                    let name = string_name(e)?;
                    let value = read_inner_text(&mut xml_reader)?;
                    strings.push(StringResource { name, value });
                }
                Event::Empty(ref e) if depth == 1 && e.name().as_ref() == b"string" => {
                    strings.push(StringResource {
                        name: string_name(e)?,
                        value: String::new(),
                    });
                }
                Event::Start(_) => {
                    saw_root = true;
                    depth += 1;
                }
                Event::Empty(_) if depth == 0 => saw_root = true,
                Event::End(_) => depth = depth.saturating_sub(1),
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !saw_root {
            return Err(Error::invalid_resource("no root element found"));
        }
        if depth != 0 {
            return Err(Error::invalid_resource(
                "unexpected end of document inside an open element",
            ));
        }
        Ok(Format { strings })
    }

    /// Write to any writer (file, memory, etc.).
    fn to_writer<W: Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut xml_writer = Writer::new(&mut writer);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

        xml_writer.write_event(Event::Start(BytesStart::new("resources")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;

        for sr in &self.strings {
            let mut elem = BytesStart::new("string");
            elem.push_attribute(("name", sr.name.as_str()));

            xml_writer.write_event(Event::Text(BytesText::new("    ")))?;
            xml_writer.write_event(Event::Start(elem))?;
            xml_writer.write_event(Event::Text(BytesText::new(&sr.value)))?;
            xml_writer.write_event(Event::End(BytesEnd::new("string")))?;
            xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        }

        xml_writer.write_event(Event::End(BytesEnd::new("resources")))?;
        xml_writer.write_event(Event::Text(BytesText::new("\n")))?;
        Ok(())
    }
}

fn string_name(e: &BytesStart) -> Result<String, Error> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"name" {
            return Ok(attr.unescape_value()?.into_owned());
        }
    }
    Err(Error::invalid_resource("string tag missing 'name'"))
}

/// Reads up to and including the end tag of the element just opened,
/// concatenating every text node in between.
fn read_inner_text<R: BufRead>(xml_reader: &mut Reader<R>) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut depth = 0usize;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Text(e) => {
                let raw = std::str::from_utf8(&e)
                    .map_err(|err| Error::invalid_resource(format!("text is not UTF-8: {err}")))?;
                // Character references such as `&#13;` survive normalization.
                let normalized = normalize_newlines(raw);
                text.push_str(&unescape(&normalized).map_err(quick_xml::Error::from)?);
            }
            Event::CData(e) => {
                let raw = std::str::from_utf8(&e)
                    .map_err(|err| Error::invalid_resource(format!("CDATA is not UTF-8: {err}")))?;
                text.push_str(&normalize_newlines(raw));
            }
            Event::Start(_) => depth += 1,
            Event::End(_) if depth == 0 => break,
            Event::End(_) => depth -= 1,
            Event::Eof => return Err(Error::invalid_resource("Unexpected EOF")),
            _ => {}
        }
        buf.clear();
    }
    Ok(text)
}

/// Turns `\r\n` and lone `\r` into `\n`.
fn normalize_newlines(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\r' {
            chars.next_if_eq(&'\n');
            out.push('\n');
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::fs;
    use tempfile::TempDir;

    fn names(format: &Format) -> Vec<&str> {
        format.strings.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_parse_basic_strings_xml() {
        let xml = indoc! {r#"
            <?xml version="1.0" encoding="utf-8"?>
            <resources>
                <string name="app_name">Curling Timer</string>
                <string name="reset">Reset</string>
                <string name="empty"></string>
                <string name="self_closed"/>
            </resources>
        "#};
        let format = Format::from_str(xml).unwrap();
        assert_eq!(names(&format), vec!["app_name", "reset", "empty", "self_closed"]);
        assert_eq!(format.strings[0].value, "Curling Timer");
        assert_eq!(format.strings[2].value, "");
        assert_eq!(format.strings[3].value, "");
    }

    #[test]
    fn test_inline_markup_is_flattened() {
        let xml = indoc! {r#"
            <resources xmlns:xliff="urn:oasis:names:tc:xliff:document:1.2">
                <string name="styled">Press <b>start</b> to <i>begin <u>now</u></i>!</string>
                <string name="placeholder">Version <xliff:g id="v">%1$s</xliff:g> ready</string>
                <string name="br">one<br/>two</string>
            </resources>
        "#};
        let format = Format::from_str(xml).unwrap();
        assert_eq!(format.strings[0].value, "Press start to begin now!");
        assert_eq!(format.strings[1].value, "Version %1$s ready");
        assert_eq!(format.strings[2].value, "onetwo");
    }

    #[test]
    fn test_text_is_kept_raw() {
        let xml = indoc! {r#"
            <resources>
                <string name="spaced">  padded  </string>
                <string name="escaped">Don\'t &amp; won&#8217;t &lt;stop&gt;</string>
                <string name="cdata"><![CDATA[<b>bold</b>]]> tail</string>
                <string name="unicode">Einstellungen zurücksetzen</string>
            </resources>
        "#};
        let format = Format::from_str(xml).unwrap();
        assert_eq!(format.strings[0].value, "  padded  ");
        assert_eq!(format.strings[1].value, "Don\\'t & won\u{2019}t <stop>");
        assert_eq!(format.strings[2].value, "<b>bold</b> tail");
        assert_eq!(format.strings[3].value, "Einstellungen zurücksetzen");
    }

    #[test]
    fn test_only_direct_children_are_collected() {
        let xml = indoc! {r#"
            <resources>
                <string name="hello">Hello</string>
                <plurals name="stones">
                    <item quantity="one">One stone</item>
                    <item quantity="other">%d stones</item>
                </plurals>
                <string-array name="modes">
                    <item>50</item>
                </string-array>
                <group>
                    <string name="nested">Nested</string>
                </group>
            </resources>
        "#};
        let format = Format::from_str(xml).unwrap();
        assert_eq!(names(&format), vec!["hello"]);
    }

    #[test]
    fn test_missing_name_attribute() {
        let xml = r#"<resources><string>No name attr</string></resources>"#;
        let err = Format::from_str(xml).unwrap_err();
        assert!(err.to_string().contains("missing 'name'"));
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        let mismatched = r#"<resources><string name="a">text</strin></resources>"#;
        assert!(matches!(
            Format::from_str(mismatched),
            Err(Error::XmlParse(_))
        ));

        let truncated = r#"<resources><string name="a">text</string>"#;
        assert!(Format::from_str(truncated).is_err());

        assert!(Format::from_str("").is_err());

        let second_root = r#"<resources><string name="a">x</string></resources><resources><string name="a">y</string></resources>"#;
        let err = Format::from_str(second_root).unwrap_err();
        assert!(err.to_string().contains("junk after document element"));

        let trailing_empty = r#"<resources/><extra/>"#;
        assert!(Format::from_str(trailing_empty).is_err());
    }

    #[test]
    fn test_line_endings_are_normalized() {
        let xml = "<resources>\r\n    <string name=\"multi\">line one\r\nline two\rline three</string>\r\n    <string name=\"cdata\"><![CDATA[a\r\nb]]></string>\r\n</resources>\r\n";
        let format = Format::from_str(xml).unwrap();
        assert_eq!(format.strings[0].value, "line one\nline two\nline three");
        assert_eq!(format.strings[1].value, "a\nb");

        let char_ref = "<resources><string name=\"cr\">a&#13;b</string></resources>";
        assert_eq!(Format::from_str(char_ref).unwrap().strings[0].value, "a\rb");
    }

    #[test]
    fn test_to_table_filters_and_last_duplicate_wins() {
        let xml = indoc! {r#"
            <resources>
                <string name="settings">Settings</string>
                <string name="unlisted">Ignored</string>
                <string name="reset">Reset</string>
                <string name="settings">Preferences</string>
            </resources>
        "#};
        let format = Format::from_str(xml).unwrap();
        let allow_list = AllowList::new(["settings", "reset", "app_name"]);
        let table = format.to_table(&allow_list);
        let pairs: Vec<_> = table.iter().collect();
        assert_eq!(pairs, vec![("settings", "Preferences"), ("reset", "Reset")]);
    }

    #[test]
    fn test_read_from_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("values-de/strings.xml");
        match Format::read_from(&path) {
            Err(Error::MissingSource { path: missing }) => assert_eq!(missing, path),
            other => panic!("expected MissingSource, got {:?}", other),
        }
    }

    #[test]
    fn test_read_from_decodes_bom() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("strings.xml");

        let xml = r#"<resources><string name="language">Idioma</string></resources>"#;
        let mut bytes = vec![0xFF, 0xFE];
        for unit in xml.encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        fs::write(&path, bytes).unwrap();

        let format = Format::read_from(&path).unwrap();
        assert_eq!(format.strings[0].value, "Idioma");
    }

    #[test]
    fn test_written_file_reads_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("res/values/strings.xml");
        let format = Format {
            strings: vec![
                StringResource {
                    name: "pref_mode".to_string(),
                    value: "Mode <50 & 100>".to_string(),
                },
                StringResource {
                    name: "language_german".to_string(),
                    value: "Deutsch".to_string(),
                },
            ],
        };
        format.write_to(&path).unwrap();

        let reparsed = Format::read_from(&path).unwrap();
        assert_eq!(reparsed.strings, format.strings);
    }
}
