#![allow(deprecated)]

use assert_cmd::Command;
use calamine::{open_workbook_auto, Data, Reader};
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

enum Cell {
    Text(&'static str),
    Number(f64),
    Blank,
}

use Cell::{Blank, Number, Text};

fn header() -> Vec<Cell> {
    vec![
        Blank,
        Text("Timestamp"),
        Text("NAME OF THE COMPANY"),
        Text("YEAR OF REPORTING"),
        Text("SECTOR"),
        Text("Q1 Policy"),
        Text("Q2 Rating"),
        Text("Q3 Principles"),
        Text("Notes"),
    ]
}

fn survey_rows() -> Vec<Vec<Cell>> {
    vec![
        header(),
        vec![
            Number(0.0),
            Text("2024-01-02 10:00"),
            Text("Acme"),
            Number(2022.0),
            Text("Energy"),
            Text("No"),
            Number(1.0),
            Text("P2"),
            Text("late filing"),
        ],
        vec![
            Number(1.0),
            Text("2024-01-02 10:05"),
            Text("Acme"),
            Number(2021.0),
            Text("Energy"),
            Text("Yes"),
            Number(2.0),
            Text("P1,P2"),
            Text("ok"),
        ],
        vec![
            Number(2.0),
            Text("2024-01-02 10:10"),
            Text("Birch"),
            Number(2022.0),
            Text("Retail"),
            Text("Yes"),
            Number(4.0),
            Text("P1"),
            Text("ok"),
        ],
        vec![
            Number(3.0),
            Text("2024-01-02 10:15"),
            Text("Birch"),
            Number(2021.0),
            Text("Retail"),
            Text("Not clear"),
            Number(3.0),
            Text("P1,P2,P3"),
            Blank,
        ],
    ]
}

fn write_workbook(path: &Path, sheet: &str, rows: &[Vec<Cell>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet).expect("sheet name should be valid");
    for (row, cells) in rows.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            let (row, col) = (row as u32, col as u16);
            match cell {
                Text(text) => {
                    worksheet
                        .write_string(row, col, *text)
                        .expect("string should write");
                }
                Number(value) => {
                    worksheet
                        .write_number(row, col, *value)
                        .expect("number should write");
                }
                Blank => {}
            }
        }
    }
    workbook.save(path).expect("workbook should save");
}

fn survey_workbook(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("survey.xlsx");
    write_workbook(&path, "Sheet4", &survey_rows());
    path
}

fn read_rows(path: &Path) -> Vec<Vec<Data>> {
    let mut workbook = open_workbook_auto(path).expect("export should open");
    let range = workbook
        .worksheet_range("Scores")
        .expect("export sheet should exist");
    range.rows().map(|row| row.to_vec()).collect()
}

fn brr() -> Command {
    Command::cargo_bin("brr-score").expect("binary should compile")
}

#[test]
fn classify_partitions_columns_from_second_data_row() {
    let dir = TempDir::new().expect("temp dir should be created");
    let workbook = survey_workbook(&dir);

    brr()
        .arg("classify")
        .arg(&workbook)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("binary (Yes/No): Q1 Policy"))
        .stdout(predicate::str::contains("range (1-4): Q2 Rating"))
        .stdout(predicate::str::contains("list (P1,P2,...): Q3 Principles"))
        .stdout(predicate::str::contains("total possible score: 3"))
        .stdout(predicate::str::contains("Timestamp").not());
}

#[test]
fn classify_honours_sample_row_override() {
    let dir = TempDir::new().expect("temp dir should be created");
    let workbook = survey_workbook(&dir);

    brr()
        .arg("classify")
        .arg(&workbook)
        .arg("--sample-row")
        .arg("0")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("list (P1,P2,...): \n"))
        .stdout(predicate::str::contains("total possible score: 2"));
}

#[test]
fn out_of_bounds_sample_row_is_a_configuration_error() {
    let dir = TempDir::new().expect("temp dir should be created");
    let workbook = survey_workbook(&dir);

    brr()
        .arg("score")
        .arg(&workbook)
        .arg("--sample-row")
        .arg("10")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("sample row 10 is out of bounds"));
}

#[test]
fn single_data_row_cannot_use_default_sample_row() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("tiny.xlsx");
    let mut rows = survey_rows();
    rows.truncate(2);
    write_workbook(&path, "Sheet4", &rows);

    brr()
        .arg("classify")
        .arg(&path)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("configuration error"));
}

#[test]
fn unknown_sheet_is_a_configuration_error() {
    let dir = TempDir::new().expect("temp dir should be created");
    let workbook = survey_workbook(&dir);

    brr()
        .arg("classify")
        .arg(&workbook)
        .arg("--sheet")
        .arg("Sheet9")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("sheet not found: Sheet9"));
}

#[test]
fn missing_workbook_is_a_runtime_failure() {
    let dir = TempDir::new().expect("temp dir should be created");

    brr()
        .arg("score")
        .arg(dir.path().join("absent.xlsx"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn score_markdown_lists_company_scores() {
    let dir = TempDir::new().expect("temp dir should be created");
    let workbook = survey_workbook(&dir);

    brr()
        .arg("score")
        .arg(&workbook)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Total possible score: 3"))
        .stdout(predicate::str::contains(
            "| Birch | 2022 | Retail | 2.111 | 0.704 |",
        ))
        .stdout(predicate::str::contains("## Year-over-Year Change"));
}

#[test]
fn score_json_reports_categories_and_dropped_columns() {
    let dir = TempDir::new().expect("temp dir should be created");
    let workbook = survey_workbook(&dir);

    let output = brr()
        .arg("score")
        .arg(&workbook)
        .arg("--format")
        .arg("json")
        .arg("--top")
        .arg("2")
        .output()
        .expect("score should run");
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be json");
    assert_eq!(report["total_possible_score"], 3);
    assert_eq!(report["categories"]["range"][0], "Q2 Rating");
    assert_eq!(report["rows"].as_array().map(Vec::len), Some(4));
    assert_eq!(report["analytics"]["top"].as_array().map(Vec::len), Some(2));
    assert_eq!(report["analytics"]["top"][0]["company"], "Birch");

    let dropped = report["source"]["dropped_columns"]
        .as_array()
        .expect("dropped columns should be listed");
    assert!(dropped.contains(&serde_json::json!("Unnamed: 0")));
    assert!(dropped.contains(&serde_json::json!("Timestamp")));

    let deltas = report["analytics"]["year_over_year"]
        .as_array()
        .expect("deltas should be listed");
    assert_eq!(deltas.len(), 2);
    assert!(deltas
        .iter()
        .all(|delta| delta["previous_year"] == 2021 && delta["year"] == 2022));
}

#[test]
fn malformed_range_value_warns_without_failing() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("messy.xlsx");
    let mut rows = survey_rows();
    rows[4][6] = Text("High");
    write_workbook(&path, "Sheet4", &rows);

    brr()
        .arg("score")
        .arg(&path)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("range value \"High\" is not an integer"))
        .stderr(predicate::str::contains("fallback rule"));
}

#[test]
fn workbook_config_selects_sheet() {
    let dir = TempDir::new().expect("temp dir should be created");
    let path = dir.path().join("responses.xlsx");
    write_workbook(&path, "Responses", &survey_rows());
    fs::write(
        dir.path().join("brr.toml"),
        r#"
[input]
sheet = "Responses"
"#,
    )
    .expect("config should write");

    brr()
        .arg("classify")
        .arg(&path)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("total possible score: 3"));
}

#[test]
fn invalid_config_is_a_configuration_error() {
    let dir = TempDir::new().expect("temp dir should be created");
    let workbook = survey_workbook(&dir);
    let config = dir.path().join("bad.toml");
    fs::write(&config, "[scoring]\nrange_min = 4\nrange_max = 4\n").expect("config should write");

    brr()
        .arg("--config")
        .arg(&config)
        .arg("classify")
        .arg(&workbook)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("range_max"));
}

#[test]
fn export_writes_summary_named_after_workbook_and_sheet() {
    let dir = TempDir::new().expect("temp dir should be created");
    let workbook = survey_workbook(&dir);
    let out = dir.path().join("out");

    brr()
        .arg("export")
        .arg(&workbook)
        .arg("--out-dir")
        .arg(&out)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("survey_Sheet4.xlsx"));

    let rows = read_rows(&out.join("survey_Sheet4.xlsx"));
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0][2], Data::String("Calculated Score".into()));
    assert_eq!(rows[3][0], Data::String("Birch".into()));
}

#[test]
fn export_filtered_by_sector_keeps_only_that_sector() {
    let dir = TempDir::new().expect("temp dir should be created");
    let workbook = survey_workbook(&dir);
    let out = dir.path().join("out");

    brr()
        .arg("export")
        .arg(&workbook)
        .arg("--sector")
        .arg("Energy")
        .arg("--out-dir")
        .arg(&out)
        .assert()
        .code(0);

    let rows = read_rows(&out.join("survey_Sheet4_Energy.xlsx"));
    assert_eq!(rows.len(), 3);
    assert!(rows[1..]
        .iter()
        .all(|row| row[3] == Data::String("Energy".into())));
}

#[test]
fn export_each_sector_partitions_every_row() {
    let dir = TempDir::new().expect("temp dir should be created");
    let workbook = survey_workbook(&dir);
    let out = dir.path().join("out");

    brr()
        .arg("export")
        .arg(&workbook)
        .arg("--each-sector")
        .arg("--out-dir")
        .arg(&out)
        .assert()
        .code(0);

    let energy = read_rows(&out.join("survey_Sheet4_Energy.xlsx"));
    let retail = read_rows(&out.join("survey_Sheet4_Retail.xlsx"));
    let all = {
        brr()
            .arg("export")
            .arg(&workbook)
            .arg("--out-dir")
            .arg(&out)
            .assert()
            .code(0);
        read_rows(&out.join("survey_Sheet4.xlsx"))
    };
    assert_eq!(energy.len() - 1 + retail.len() - 1, all.len() - 1);
    for row in &all[1..] {
        assert!(energy[1..].contains(row) || retail[1..].contains(row));
    }
}

#[test]
fn export_full_keeps_source_columns_and_appends_scores() {
    let dir = TempDir::new().expect("temp dir should be created");
    let workbook = survey_workbook(&dir);
    let out = dir.path().join("out");

    brr()
        .arg("export")
        .arg(&workbook)
        .arg("--full")
        .arg("--out-dir")
        .arg(&out)
        .assert()
        .code(0);

    let rows = read_rows(&out.join("survey_Sheet4.xlsx"));
    let header: Vec<_> = rows[0].iter().map(|cell| cell.to_string()).collect();
    assert!(header.contains(&"Q1 Policy".to_string()));
    assert!(!header.contains(&"Timestamp".to_string()));
    assert_eq!(header[header.len() - 2], "Calculated Score");
    assert_eq!(header[header.len() - 1], "Percentage Score");
    assert_eq!(rows.len(), 5);
}

#[test]
fn export_full_each_sector_writes_scored_source_rows_per_sector() {
    let dir = TempDir::new().expect("temp dir should be created");
    let workbook = survey_workbook(&dir);
    let out = dir.path().join("out");

    brr()
        .arg("export")
        .arg(&workbook)
        .arg("--full")
        .arg("--each-sector")
        .arg("--out-dir")
        .arg(&out)
        .assert()
        .code(0);

    for sector in ["Energy", "Retail"] {
        let rows = read_rows(&out.join(format!("survey_Sheet4_{sector}.xlsx")));
        let header: Vec<_> = rows[0].iter().map(|cell| cell.to_string()).collect();
        assert_eq!(header[header.len() - 2], "Calculated Score");
        assert_eq!(rows.len(), 3, "{sector}");
    }
}

#[test]
fn export_rejects_sector_with_each_sector() {
    brr()
        .args(["export", "survey.xlsx", "--sector", "Energy", "--each-sector"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}
