use calamine::{Reader, SheetVisible, Xlsx, open_workbook};
use chrono::NaiveDate;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use weekroll_core::{BatchConfig, BatchProcessor, Clock, writer};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

struct FixedClock(NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

// Helper to create a minimal valid XLSX file for testing; each sheet is
// (name, visibility state) where None means visible.
fn create_mock_xlsx(path: &Path, sheets: &[(&str, Option<&str>)]) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);

    // 1. [Content_Types].xml
    zip.start_file("[Content_Types].xml", options)?;
    let mut content_types = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
"#,
    );
    for (i, _) in sheets.iter().enumerate() {
        content_types.push_str(&format!(
            r#"<Override PartName="/xl/worksheets/sheet{}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#,
            i + 1
        ));
    }
    content_types.push_str("</Types>");
    zip.write_all(content_types.as_bytes())?;

    // 2. _rels/.rels
    zip.start_file("_rels/.rels", options)?;
    zip.write_all(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#.as_bytes())?;

    // 3. xl/workbook.xml
    zip.start_file("xl/workbook.xml", options)?;
    let mut workbook_xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets>
"#,
    );
    for (i, (name, state)) in sheets.iter().enumerate() {
        let state_attr = match state {
            Some(s) => format!(r#" state="{}""#, s),
            None => String::new(),
        };
        workbook_xml.push_str(&format!(
            r#"<sheet name="{}" sheetId="{}"{} r:id="rId{}"/>"#,
            name,
            i + 1,
            state_attr,
            i + 1
        ));
    }
    workbook_xml.push_str("</sheets></workbook>");
    zip.write_all(workbook_xml.as_bytes())?;

    // 4. xl/_rels/workbook.xml.rels
    zip.start_file("xl/_rels/workbook.xml.rels", options)?;
    let mut rels_xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
"#,
    );
    for (i, _) in sheets.iter().enumerate() {
        rels_xml.push_str(&format!(
            r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{}.xml"/>"#,
            i + 1,
            i + 1
        ));
    }
    rels_xml.push_str("</Relationships>");
    zip.write_all(rels_xml.as_bytes())?;

    // 5. sheets
    for (i, _) in sheets.iter().enumerate() {
        zip.start_file(format!("xl/worksheets/sheet{}.xml", i + 1), options)?;
        zip.write_all(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData/></worksheet>"#.as_bytes())?;
    }

    zip.finish()?;
    Ok(())
}

fn sheet_states(path: &Path) -> anyhow::Result<Vec<(String, SheetVisible)>> {
    let workbook: Xlsx<_> = open_workbook(path)?;
    Ok(workbook
        .sheets_metadata()
        .iter()
        .map(|s| (s.name.clone(), s.visible))
        .collect())
}

#[test]
fn unhide_makes_every_sheet_visible() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("input.xlsx");
    let output = dir.path().join("output.xlsx");

    create_mock_xlsx(
        &input,
        &[
            ("Summary", None),
            ("Raw", Some("hidden")),
            ("Pivot", Some("veryHidden")),
        ],
    )?;

    writer::unhide_all_sheets(&input, Some(&output))?;

    let states = sheet_states(&output)?;
    assert_eq!(states.len(), 3);
    for (name, state) in states {
        assert_eq!(state, SheetVisible::Visible, "sheet {} still hidden", name);
    }

    // The input itself was not modified
    let original = sheet_states(&input)?;
    assert!(original.iter().any(|(_, s)| *s != SheetVisible::Visible));
    Ok(())
}

#[test]
fn unhide_without_destination_overwrites_in_place() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("input.xlsx");
    create_mock_xlsx(&input, &[("Only", Some("hidden"))])?;

    writer::unhide_all_sheets(&input, None)?;

    let states = sheet_states(&input)?;
    assert_eq!(states, vec![("Only".to_string(), SheetVisible::Visible)]);
    Ok(())
}

#[test]
fn unhide_rejects_a_corrupt_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("broken.xlsx");
    std::fs::write(&input, b"this is not a workbook")?;

    let result = writer::unhide_all_sheets(&input, Some(&dir.path().join("out.xlsx")));
    assert!(result.is_err());
    Ok(())
}

fn processor_for(dir: &Path, today: NaiveDate) -> BatchProcessor {
    let config = BatchConfig {
        directory: dir.to_path_buf(),
        output_dir: dir.join("modified_excel_workbooks"),
        archive_dir: dir.join("archived_data"),
    };
    BatchProcessor::with_config(config).with_clock(FixedClock(today))
}

#[test]
fn process_file_republishes_and_archives() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    // Wednesday: the dateless name falls back to Sunday 2024-05-12
    let processor = processor_for(dir.path(), NaiveDate::from_ymd_opt(2024, 5, 15).unwrap());

    let source = dir.path().join("test.xlsx");
    create_mock_xlsx(&source, &[("Data", Some("hidden"))])?;

    let output = processor.process_file(&source)?;
    assert_eq!(
        output,
        dir.path()
            .join("modified_excel_workbooks")
            .join("05-12-2024_test.xlsx")
    );
    assert!(output.exists());
    assert_eq!(
        sheet_states(&output)?,
        vec![("Data".to_string(), SheetVisible::Visible)]
    );

    // Move semantics: the only copy of the original is in the archive
    assert!(!source.exists());
    let archived = dir.path().join("archived_data").join("test.xlsx");
    assert!(archived.exists());
    assert!(
        sheet_states(&archived)?
            .iter()
            .any(|(_, s)| *s != SheetVisible::Visible)
    );
    Ok(())
}

#[test]
fn process_file_uses_the_filename_date() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let processor = processor_for(dir.path(), NaiveDate::from_ymd_opt(2030, 1, 1).unwrap());

    let source = dir.path().join("Trends Through WE 042025.xlsx");
    create_mock_xlsx(&source, &[("Data", None)])?;

    let output = processor.process_file(&source)?;
    // Strict two-by-two split: 04 / 20 / 25
    assert_eq!(
        output.file_name().unwrap().to_string_lossy(),
        "04-20-2025_Trends Through WE 042025.xlsx"
    );
    Ok(())
}

#[test]
fn batch_continues_past_a_corrupt_file() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let processor = processor_for(dir.path(), NaiveDate::from_ymd_opt(2024, 5, 15).unwrap());

    let good = dir.path().join("good 05.11.25.xlsx");
    create_mock_xlsx(&good, &[("Data", Some("hidden"))])?;
    let broken = dir.path().join("broken.xlsx");
    std::fs::write(&broken, b"garbage bytes")?;

    let report = processor.process_directory()?;
    assert_eq!(report.len(), 2);
    assert_eq!(report.succeeded(), 1);
    assert_eq!(report.failed(), 1);

    let ok = report.get(&good).expect("entry for the good file");
    assert!(ok.success);
    let expected = dir
        .path()
        .join("modified_excel_workbooks")
        .join("05-11-2025_good 05.11.25.xlsx");
    assert_eq!(ok.output.as_deref(), Some(expected.as_path()));
    assert!(expected.exists());

    let err = report.get(&broken).expect("entry for the broken file");
    assert!(!err.success);
    assert!(!err.error.as_deref().unwrap_or_default().is_empty());
    // The broken original stays where it was
    assert!(broken.exists());
    Ok(())
}

#[test]
fn batch_skips_the_output_and_archive_directories() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let processor = processor_for(dir.path(), NaiveDate::from_ymd_opt(2024, 5, 15).unwrap());

    let source = dir.path().join("report 05.11.25.xlsx");
    create_mock_xlsx(&source, &[("Data", None)])?;

    // First run publishes the file; a second run must not pick up either
    // destination copy
    let first = processor.process_directory()?;
    assert_eq!(first.succeeded(), 1);

    let second = processor.process_directory()?;
    assert!(second.is_empty());
    Ok(())
}
