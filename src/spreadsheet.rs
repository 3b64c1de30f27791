//! Minimal single-sheet `.xlsx` writer for channel reports.
//!
//! An `.xlsx` file is a zip of SpreadsheetML parts. Only the parts Excel and
//! LibreOffice require are written; strings use inline cells so no shared
//! string table is needed.

use std::fmt::Write as _;
use std::io::{Cursor, Write};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use sha2::{Digest, Sha256};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::report::ChannelReport;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const SHEET_NAME: &str = "Vídeos";

pub const HEADERS: [&str; 7] = [
    "Título",
    "Data Publicação",
    "Views",
    "Likes",
    "Comentários",
    "Sugestão Título",
    "Sugestão Descrição",
];

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

/// A cell value in the sheet.
enum Cell<'a> {
    Text(&'a str),
    Number(u64),
}

/// Download name for an export made at `now`: `youtube_<hash>.xlsx`.
#[must_use]
pub fn export_filename(now: DateTime<Utc>) -> String {
    let seed = now.timestamp_nanos_opt().unwrap_or_else(|| now.timestamp());
    let digest = Sha256::digest(seed.to_string().as_bytes());
    format!("youtube_{}.xlsx", &hex::encode(digest)[..32])
}

/// Render the report as an `.xlsx` workbook.
///
/// # Errors
///
/// Returns an error if the zip container cannot be written.
pub fn write_xlsx(report: &ChannelReport) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts = [
        ("[Content_Types].xml", CONTENT_TYPES.to_string()),
        ("_rels/.rels", ROOT_RELS.to_string()),
        ("xl/workbook.xml", workbook_xml()),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
        ("xl/worksheets/sheet1.xml", sheet_xml(report)),
    ];

    for (name, body) in parts {
        zip.start_file(name, options)
            .with_context(|| format!("Failed to start workbook part {name}"))?;
        zip.write_all(body.as_bytes())
            .with_context(|| format!("Failed to write workbook part {name}"))?;
    }

    let cursor = zip.finish().context("Failed to finalize workbook")?;
    Ok(cursor.into_inner())
}

fn workbook_xml() -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        xml_escape(SHEET_NAME)
    )
}

fn sheet_xml(report: &ChannelReport) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );

    let header: Vec<Cell<'_>> = HEADERS.iter().map(|h| Cell::Text(h)).collect();
    write_row(&mut xml, 1, &header);

    for (index, video) in report.videos.iter().enumerate() {
        let published = video.published_at.format("%Y-%m-%d %H:%M:%S").to_string();
        let row = [
            Cell::Text(&video.title),
            Cell::Text(&published),
            Cell::Number(video.views),
            Cell::Number(video.likes),
            Cell::Number(video.comments),
            Cell::Text(video.title_suggestion.label()),
            Cell::Text(video.description_suggestion.label()),
        ];
        write_row(&mut xml, index + 2, &row);
    }

    xml.push_str("</sheetData></worksheet>");
    xml
}

fn write_row(xml: &mut String, row_number: usize, cells: &[Cell<'_>]) {
    let _ = write!(xml, r#"<row r="{row_number}">"#);
    for (col, cell) in cells.iter().enumerate() {
        let reference = format!("{}{row_number}", column_name(col));
        match cell {
            Cell::Text(text) => {
                let _ = write!(
                    xml,
                    r#"<c r="{reference}" t="inlineStr"><is><t xml:space="preserve">{}</t></is></c>"#,
                    xml_escape(text)
                );
            }
            Cell::Number(n) => {
                let _ = write!(xml, r#"<c r="{reference}"><v>{n}</v></c>"#);
            }
        }
    }
    xml.push_str("</row>");
}

/// Zero-based column index to a spreadsheet column name (0 → A, 26 → AA).
fn column_name(mut index: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + u8::try_from(index % 26).unwrap_or(0));
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    name.reverse();
    String::from_utf8(name).unwrap_or_default()
}

/// Escape XML markup and drop control characters XML 1.0 cannot carry.
fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if c < ' ' => {}
            c => out.push(c),
        }
    }
    out
}
