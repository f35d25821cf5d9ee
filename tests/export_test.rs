//! Reads exported workbooks back and checks their layout

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use chrono::NaiveDate;
use std::io::Cursor;

use seo_editorial_planner::{
    planner::{
        assembler::build_row,
        export::{export_at, file_name, INFO_SHEET, PLAN_SHEET},
    },
    ContentIdea, EditorialRow, KeywordRecord, SiteInfo,
};

fn site() -> SiteInfo {
    SiteInfo {
        name: "Acme Tools".to_string(),
        url: "https://acme.test".to_string(),
        about: "Hand tools".to_string(),
        goals: "Leads".to_string(),
        avoid_topics: String::new(),
    }
}

fn rows(count: usize) -> Vec<EditorialRow> {
    let keywords = vec![KeywordRecord::new("hammer", "1", "2400", "0.70", "acme.test")];
    (0..count)
        .map(|i| {
            let idea = ContentIdea {
                title: format!("Article {}", i + 1),
                description: "About hammers".to_string(),
                objective: "Rank for hammer".to_string(),
                target_keywords: vec!["hammer".to_string()],
            };
            build_row(i, &idea, &keywords, &["Which hammer?".to_string()])
        })
        .collect()
}

fn open(bytes: Vec<u8>) -> Xlsx<Cursor<Vec<u8>>> {
    open_workbook_from_rs(Cursor::new(bytes)).unwrap()
}

fn text(value: Option<&Data>) -> String {
    match value {
        Some(Data::String(s)) => s.clone(),
        other => panic!("expected a string cell, got {:?}", other),
    }
}

fn generated_at() -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 17)
        .unwrap()
        .and_hms_opt(9, 30, 0)
        .unwrap()
}

#[test]
fn test_plan_sheet_layout() {
    let bytes = export_at(&rows(15), &site(), generated_at()).unwrap();
    let mut workbook = open(bytes);

    assert_eq!(workbook.sheet_names(), vec![PLAN_SHEET, INFO_SHEET]);

    let plan = workbook.worksheet_range(PLAN_SHEET).unwrap();
    assert_eq!(plan.height(), 16);
    assert_eq!(plan.width(), 7);

    let headers: Vec<String> = (0..7).map(|c| text(plan.get_value((0, c)))).collect();
    assert_eq!(headers, EditorialRow::HEADERS);

    assert_eq!(text(plan.get_value((1, 0))), "Article 1");
    assert_eq!(text(plan.get_value((1, 2))), "hammer (2400)");
    assert_eq!(text(plan.get_value((1, 3))), "Which hammer?");
    assert_eq!(text(plan.get_value((1, 5))), "High");
    assert_eq!(text(plan.get_value((1, 6))), "2024-01-01");
    assert_eq!(text(plan.get_value((15, 0))), "Article 15");
    assert_eq!(text(plan.get_value((15, 5))), "Low");
    assert_eq!(text(plan.get_value((15, 6))), "2024-04-08");
}

#[test]
fn test_info_sheet_contents() {
    let bytes = export_at(&rows(15), &site(), generated_at()).unwrap();
    let mut workbook = open(bytes);

    let info = workbook.worksheet_range(INFO_SHEET).unwrap();
    assert_eq!(text(info.get_value((0, 0))), "Field");
    assert_eq!(text(info.get_value((0, 1))), "Value");
    assert_eq!(text(info.get_value((1, 1))), "Acme Tools");
    assert_eq!(text(info.get_value((2, 1))), "https://acme.test");
    assert_eq!(text(info.get_value((3, 0))), "Generation Date");
    assert_eq!(text(info.get_value((3, 1))), "2024-05-17 09:30");
    assert_eq!(text(info.get_value((4, 0))), "Total Articles");
    assert_eq!(info.get_value((4, 1)), Some(&Data::Float(15.0)));
}

#[test]
fn test_empty_plan_keeps_headers() {
    let bytes = export_at(&[], &site(), generated_at()).unwrap();
    let mut workbook = open(bytes);

    let plan = workbook.worksheet_range(PLAN_SHEET).unwrap();
    assert_eq!(plan.height(), 1);
    let info = workbook.worksheet_range(INFO_SHEET).unwrap();
    assert_eq!(info.get_value((4, 1)), Some(&Data::Float(0.0)));
}

#[test]
fn test_download_name() {
    let date = generated_at().date();
    assert_eq!(
        file_name("Acme Tools", date),
        "editorial_plan_acme_tools_20240517.xlsx"
    );
}
