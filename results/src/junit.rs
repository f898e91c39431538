//! JUnit XML reader.
//!
//! Yields one [`RawTestCase`] per `<testcase>` element, in document order.
//! Only the parts the classifier needs are kept: the `classname`, `name` and
//! `time` attributes, `<failure>`/`<error>`/`<skipped>` children with their
//! text, and `<property name=".." value=".."/>` entries.

use std::path::{Path, PathBuf};

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, ResultsError};
use crate::record::{Marker, RawTestCase};

#[derive(Clone, Copy)]
enum Capture {
    Failure,
    Error,
    Skipped,
}

/// Lists the JUnit files under `path`.
///
/// A file path is returned as is; a directory is walked recursively for
/// `*.xml` files in file-name order. A missing path yields nothing.
///
/// # Errors
///
/// Returns an error if directory traversal fails.
pub fn list_xml_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        debug!(path = %path.display(), "result path does not exist");
        return Ok(Vec::new());
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry.map_err(|source| ResultsError::Walk {
            path: path.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file()
            && entry
                .path()
                .extension()
                .map(|x| x == "xml")
                .unwrap_or(false)
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Reads every test case from all JUnit files under `path`.
///
/// # Errors
///
/// Returns an error if a file cannot be listed, read, or parsed.
pub fn read_test_cases(path: &Path) -> Result<Vec<RawTestCase>> {
    let mut cases = Vec::new();
    for file in list_xml_files(path)? {
        let content = std::fs::read_to_string(&file).map_err(|source| ResultsError::Io {
            path: file.clone(),
            source,
        })?;
        let parsed = parse_test_cases(&content).map_err(|source| ResultsError::Xml {
            path: file.clone(),
            source,
        })?;
        debug!(file = %file.display(), cases = parsed.len(), "read junit file");
        cases.extend(parsed);
    }
    Ok(cases)
}

/// Parses the test cases of one JUnit document.
///
/// # Errors
///
/// Returns an error if the document is not well-formed.
pub fn parse_test_cases(xml: &str) -> std::result::Result<Vec<RawTestCase>, quick_xml::Error> {
    // Marker bodies keep their spacing: text and CDATA pieces are joined as is.
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut cases = Vec::new();
    let mut current: Option<RawTestCase> = None;
    let mut capture: Option<Capture> = None;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"testcase" => current = Some(start_test_case(&e)?),
                b"failure" | b"error" | b"skipped" => {
                    if let Some(case) = current.as_mut() {
                        capture = open_marker(case, e.name().as_ref());
                    }
                }
                b"property" => add_property(current.as_mut(), &e)?,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"testcase" => cases.push(start_test_case(&e)?),
                b"failure" | b"error" | b"skipped" => {
                    if let Some(case) = current.as_mut() {
                        open_marker(case, e.name().as_ref());
                    }
                }
                b"property" => add_property(current.as_mut(), &e)?,
                _ => {}
            },
            Event::Text(t) => {
                if let (Some(kind), Some(case)) = (capture, current.as_mut()) {
                    append_text(case, kind, &t.unescape()?);
                }
            }
            Event::CData(c) => {
                if let (Some(kind), Some(case)) = (capture, current.as_mut()) {
                    append_text(case, kind, &String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"testcase" => {
                    capture = None;
                    if let Some(case) = current.take() {
                        cases.push(case);
                    }
                }
                b"failure" | b"error" | b"skipped" => capture = None,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(cases)
}

fn start_test_case(e: &BytesStart<'_>) -> std::result::Result<RawTestCase, quick_xml::Error> {
    let mut case = RawTestCase::default();
    for attr in e.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?.into_owned();
        match attr.key.as_ref() {
            b"classname" => case.classname = value,
            b"name" => case.name = value,
            b"time" => case.time = Some(value),
            _ => {}
        }
    }
    Ok(case)
}

fn open_marker(case: &mut RawTestCase, tag: &[u8]) -> Option<Capture> {
    let (slot, kind) = match tag {
        b"failure" => (&mut case.failure, Capture::Failure),
        b"error" => (&mut case.error, Capture::Error),
        b"skipped" => (&mut case.skipped, Capture::Skipped),
        _ => return None,
    };
    slot.get_or_insert_with(Marker::default);
    Some(kind)
}

fn append_text(case: &mut RawTestCase, kind: Capture, text: &str) {
    let marker = match kind {
        Capture::Failure => case.failure.as_mut(),
        Capture::Error => case.error.as_mut(),
        Capture::Skipped => case.skipped.as_mut(),
    };
    if let Some(marker) = marker {
        marker.text.get_or_insert_with(String::new).push_str(text);
    }
}

fn add_property(
    case: Option<&mut RawTestCase>,
    e: &BytesStart<'_>,
) -> std::result::Result<(), quick_xml::Error> {
    let Some(case) = case else {
        // suite-level property
        return Ok(());
    };
    let mut name = None;
    let mut value = String::new();
    for attr in e.attributes() {
        let attr = attr?;
        match attr.key.as_ref() {
            b"name" => name = Some(attr.unescape_value()?.into_owned()),
            b"value" => value = attr.unescape_value()?.into_owned(),
            _ => {}
        }
    }
    if let Some(name) = name {
        case.properties.push((name, value));
    }
    Ok(())
}
