//! Diagnostic log: analysis results as XML.
//!
//! ```xml
//! <Diagnostics>
//!   <Diagnostic Id="PROJECT_TYPE_NO_COMMENT_BLOCK">
//!     <Message>Class 'Foo' has no XML documentation comment block</Message>
//!     <FilePath>src/Foo.cs</FilePath>
//!     <Location Line="3" Character="14"/>
//!   </Diagnostic>
//! </Diagnostics>
//! ```
//!
//! Logs may come from other analyzers too; reading keeps only diagnostics
//! whose id is one of ours. Damage is contained to one record: an entry
//! without `<FilePath>` or `<Location>` is skipped, and a missing or
//! unparseable `Line`/`Character` reads as 0.

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

use super::{DocumentFormat, InterchangeError};
use crate::fix::DiagnosticRecord;
use crate::hir::{RULE_ID_PREFIX, RuleId};

/// The XML diagnostic log format.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiagnosticLog;

impl DocumentFormat for DiagnosticLog {
    type Document = Vec<DiagnosticRecord>;

    fn name(&self) -> &'static str {
        "diagnostic-log"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["xml"]
    }

    fn read(&self, input: &[u8]) -> Result<Vec<DiagnosticRecord>, InterchangeError> {
        LogReader::default().read(input)
    }

    fn write(&self, records: &Vec<DiagnosticRecord>) -> Result<Vec<u8>, InterchangeError> {
        write_log(records)
    }
}

fn is_known_id(id: &str) -> bool {
    id.starts_with(RULE_ID_PREFIX) && RuleId::parse(id).is_some()
}

// ============================================================================
// Reading
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Message,
    FilePath,
}

/// A `<Diagnostic>` being read, with which required children were seen.
struct Pending {
    record: DiagnosticRecord,
    has_file_path: bool,
    has_location: bool,
}

#[derive(Default)]
struct LogReader {
    records: Vec<DiagnosticRecord>,
    current: Option<Pending>,
    field: Option<Field>,
}

impl LogReader {
    fn read(mut self, input: &[u8]) -> Result<Vec<DiagnosticRecord>, InterchangeError> {
        let mut reader = Reader::from_reader(input);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) => self.handle_start(e)?,
                Ok(Event::Empty(ref e)) => {
                    self.handle_start(e)?;
                    self.handle_end(e.name().as_ref());
                }
                Ok(Event::Text(ref t)) => {
                    let text = t.unescape().map_err(|e| {
                        InterchangeError::xml(format!(
                            "XML text error at position {}: {e}",
                            reader.buffer_position()
                        ))
                    })?;
                    self.handle_text(&text);
                }
                Ok(Event::End(ref e)) => self.handle_end(e.name().as_ref()),
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(InterchangeError::xml(format!(
                        "XML parse error at position {}: {e}",
                        reader.error_position()
                    )));
                }
                _ => {}
            }
            buf.clear();
        }
        Ok(self.records)
    }

    fn handle_start(&mut self, e: &BytesStart<'_>) -> Result<(), InterchangeError> {
        match e.name().as_ref() {
            b"Diagnostic" => {
                self.current = Some(Pending {
                    record: DiagnosticRecord {
                        rule_id: attribute(e, b"Id")?.unwrap_or_default(),
                        message: String::new(),
                        file_path: String::new(),
                        line: 0,
                        character: 0,
                    },
                    has_file_path: false,
                    has_location: false,
                });
            }
            b"Message" => self.field = Some(Field::Message),
            b"FilePath" => {
                self.field = Some(Field::FilePath);
                if let Some(pending) = self.current.as_mut() {
                    pending.has_file_path = true;
                }
            }
            b"Location" => {
                let line = number(e, b"Line")?;
                let character = number(e, b"Character")?;
                if let Some(pending) = self.current.as_mut() {
                    pending.record.line = line;
                    pending.record.character = character;
                    pending.has_location = true;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_text(&mut self, text: &str) {
        let (Some(field), Some(pending)) = (self.field, self.current.as_mut()) else {
            return;
        };
        match field {
            Field::Message => pending.record.message.push_str(text),
            Field::FilePath => pending.record.file_path.push_str(text),
        }
    }

    fn handle_end(&mut self, name: &[u8]) {
        match name {
            b"Message" | b"FilePath" => self.field = None,
            b"Diagnostic" => {
                let Some(pending) = self.current.take() else {
                    return;
                };
                if !is_known_id(&pending.record.rule_id) {
                    return;
                }
                if pending.has_file_path && pending.has_location {
                    self.records.push(pending.record);
                } else {
                    tracing::debug!(
                        rule_id = %pending.record.rule_id,
                        "skipping diagnostic without file path or location"
                    );
                }
            }
            _ => {}
        }
    }
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, InterchangeError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| InterchangeError::xml(format!("Attribute error: {err}")))?;
        if attr.key.as_ref() == key {
            let value = attr
                .unescape_value()
                .map_err(|err| InterchangeError::xml(format!("Attribute error: {err}")))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// A location coordinate; anything but a non-negative integer reads as 0.
fn number(e: &BytesStart<'_>, key: &[u8]) -> Result<u32, InterchangeError> {
    Ok(attribute(e, key)?
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0))
}

// ============================================================================
// Writing
// ============================================================================

fn write_err(e: impl std::fmt::Display) -> InterchangeError {
    InterchangeError::xml(format!("Write error: {e}"))
}

fn write_log(records: &[DiagnosticRecord]) -> Result<Vec<u8>, InterchangeError> {
    let mut buffer = Cursor::new(Vec::new());
    let mut writer = Writer::new_with_indent(&mut buffer, b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(write_err)?;
    writer
        .write_event(Event::Start(BytesStart::new("Diagnostics")))
        .map_err(write_err)?;

    for record in records {
        let mut diagnostic = BytesStart::new("Diagnostic");
        diagnostic.push_attribute(("Id", record.rule_id.as_str()));
        writer
            .write_event(Event::Start(diagnostic))
            .map_err(write_err)?;

        for (name, text) in [("Message", &record.message), ("FilePath", &record.file_path)] {
            writer
                .write_event(Event::Start(BytesStart::new(name)))
                .map_err(write_err)?;
            writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(write_err)?;
            writer
                .write_event(Event::End(BytesEnd::new(name)))
                .map_err(write_err)?;
        }

        let mut location = BytesStart::new("Location");
        location.push_attribute(("Line", record.line.to_string().as_str()));
        location.push_attribute(("Character", record.character.to_string().as_str()));
        writer
            .write_event(Event::Empty(location))
            .map_err(write_err)?;

        writer
            .write_event(Event::End(BytesEnd::new("Diagnostic")))
            .map_err(write_err)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("Diagnostics")))
        .map_err(write_err)?;

    let mut output = buffer.into_inner();
    output.push(b'\n');
    Ok(output)
}
