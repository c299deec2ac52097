//! XLSX writer functionality for forcing worksheet visibility

use crate::error::ProcessError;
use calamine::open_workbook_auto;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Reader, Writer};
use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;
use zip::{ZipArchive, ZipWriter, write::FileOptions};

/// Rewrite `input_path` so every worksheet is in the visible state, saving
/// to `output_path` (or over the input when `None`).
///
/// The workbook container is copied entry by entry; only `xl/workbook.xml`
/// is touched, where each `<sheet>` element loses its `state` attribute.
/// An absent `state` means visible, which covers both `hidden` and
/// `veryHidden` sheets.
pub fn unhide_all_sheets(input_path: &Path, output_path: Option<&Path>) -> Result<(), ProcessError> {
    // calamine parse acts as the load check: a corrupt or misnamed file
    // must fail here before any output file is created.
    open_workbook_auto(input_path).map_err(|e| ProcessError::load(input_path, e))?;

    if input_path.extension().and_then(|s| s.to_str()) != Some("xlsx") {
        return Err(ProcessError::load(
            input_path,
            anyhow::anyhow!("only .xlsx workbooks can be rewritten; legacy .xls is read-only"),
        ));
    }

    // Buffer the whole input so the destination may be the input itself
    let bytes = fs::read(input_path).map_err(|e| ProcessError::load(input_path, e))?;
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ProcessError::load(input_path, e))?;

    let dest = output_path.unwrap_or(input_path);
    let out_file = fs::File::create(dest).map_err(|e| ProcessError::io("cannot write", dest, e))?;
    let mut zip_writer = ZipWriter::new(out_file);

    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|e| ProcessError::load(input_path, e))?;
        let name = entry.name().to_string();

        if name == "xl/workbook.xml" {
            let mut content = String::new();
            entry
                .read_to_string(&mut content)
                .map_err(|e| ProcessError::load(input_path, e))?;
            let content =
                force_sheets_visible(&content).map_err(|e| ProcessError::load(input_path, e))?;

            zip_writer
                .start_file(&name, FileOptions::<()>::default())
                .map_err(|e| ProcessError::io("cannot write", dest, e))?;
            zip_writer
                .write_all(content.as_bytes())
                .map_err(|e| ProcessError::io("cannot write", dest, e))?;
        } else {
            // Copy entry as is
            zip_writer
                .start_file(&name, FileOptions::<()>::default())
                .map_err(|e| ProcessError::io("cannot write", dest, e))?;
            let mut buffer = Vec::new();
            entry
                .read_to_end(&mut buffer)
                .map_err(|e| ProcessError::load(input_path, e))?;
            zip_writer
                .write_all(&buffer)
                .map_err(|e| ProcessError::io("cannot write", dest, e))?;
        }
    }

    zip_writer
        .finish()
        .map_err(|e| ProcessError::io("cannot write", dest, e))?;
    Ok(())
}

/// Drop the `state` attribute from every `<sheet>` element of workbook.xml.
fn force_sheets_visible(xml: &str) -> anyhow::Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"sheet" => {
                writer.write_event(Event::Start(without_state_attribute(&e)?))?;
            }
            Ok(Event::Empty(e)) if e.name().as_ref() == b"sheet" => {
                writer.write_event(Event::Empty(without_state_attribute(&e)?))?;
            }
            Ok(Event::Eof) => break,
            Ok(e) => writer.write_event(e)?,
            Err(e) => return Err(anyhow::anyhow!("Error parsing XML: {}", e)),
        }
        buf.clear();
    }

    let result = writer.into_inner().into_inner();
    Ok(String::from_utf8(result)?)
}

fn without_state_attribute(e: &BytesStart<'_>) -> anyhow::Result<BytesStart<'static>> {
    let mut out = BytesStart::new("sheet");
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == b"state" {
            continue;
        }
        let key = String::from_utf8(attr.key.as_ref().to_vec())?;
        let value = attr.unescape_value()?;
        out.push_attribute((key.as_str(), value.as_ref()));
    }
    Ok(out)
}
