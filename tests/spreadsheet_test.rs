//! Integration tests for the `.xlsx` export.

use std::io::{Cursor, Read};

use chrono::{TimeZone, Utc};
use youtube_analytics::report::{ChannelReport, DescriptionSuggestion, TitleSuggestion, VideoReport};
use youtube_analytics::spreadsheet::{export_filename, write_xlsx};

fn video(id: &str, title: &str, day: u32, views: u64) -> VideoReport {
    VideoReport {
        video_id: id.to_string(),
        title: title.to_string(),
        published_at: Utc.with_ymd_and_hms(2024, 1, day, 12, 30, 0).unwrap(),
        views,
        likes: views / 10,
        comments: 1,
        title_suggestion: TitleSuggestion::Ok,
        description_suggestion: DescriptionSuggestion::Lengthen,
    }
}

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut body = String::new();
    archive.by_name(name).unwrap().read_to_string(&mut body).unwrap();
    body
}

#[test]
fn test_workbook_parts_and_rows() {
    let report = ChannelReport {
        channel_id: "UC1".to_string(),
        channel_title: "Canal".to_string(),
        subscribers: 10,
        videos: vec![video("a", "First", 1, 100), video("b", "Second", 2, 250)],
    };

    let bytes = write_xlsx(&report).unwrap();

    let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
    let names: Vec<&str> = archive.file_names().collect();
    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "xl/workbook.xml",
        "xl/_rels/workbook.xml.rels",
        "xl/worksheets/sheet1.xml",
    ] {
        assert!(names.contains(&part), "missing {part}");
    }

    let workbook = read_part(&bytes, "xl/workbook.xml");
    assert!(workbook.contains(r#"name="Vídeos""#));

    let sheet = read_part(&bytes, "xl/worksheets/sheet1.xml");
    assert_eq!(sheet.matches("<row ").count(), 3);
    assert!(sheet.contains("Data Publicação"));
    assert!(sheet.contains("Sugestão Descrição"));
    assert!(sheet.contains("2024-01-01 12:30:00"));
    assert!(sheet.contains(r#"<c r="C3"><v>250</v></c>"#));
    assert!(sheet.contains("Aumentar descrição para &gt;= 200 caracteres"));
    assert!(sheet.find("First").unwrap() < sheet.find("Second").unwrap());
}

#[test]
fn test_empty_report_has_header_only() {
    let report = ChannelReport {
        channel_id: "UC1".to_string(),
        channel_title: "Canal".to_string(),
        subscribers: 0,
        videos: Vec::new(),
    };

    let sheet = read_part(&write_xlsx(&report).unwrap(), "xl/worksheets/sheet1.xml");
    assert_eq!(sheet.matches("<row ").count(), 1);
    assert!(sheet.contains("Título"));
}

#[test]
fn test_export_filename_changes_with_time() {
    let a = export_filename(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    let b = export_filename(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 1).unwrap());
    assert_ne!(a, b);
    assert!(a.starts_with("youtube_") && a.ends_with(".xlsx"));
    assert_eq!(a.len(), "youtube_".len() + 32 + ".xlsx".len());
}
