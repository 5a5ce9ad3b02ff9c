use std::io::Write;

use pnadc_formalidade::data::layout::{EDUCATION, OCCUPATION, PNADC_LAYOUT, RACE_COLOR, SEX, WEIGHT};
use pnadc_formalidade::data::loader::{decode_file, load_or_empty};
use pnadc_formalidade::data::model::{Education, RaceGroup, Sex};
use pnadc_formalidade::data::{filter, recode};
use pnadc_formalidade::indicator::IndicatorTable;
use pnadc_formalidade::{pipeline, report};

fn record(sex: &str, race: &str, educ: &str, occ: &str, weight: &str) -> String {
    PNADC_LAYOUT.encode(
        420,
        &[
            (SEX, sex),
            (RACE_COLOR, race),
            (EDUCATION, educ),
            (OCCUPATION, occ),
            (WEIGHT, weight),
        ],
    )
}

fn write_records(records: &[String]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for r in records {
        writeln!(file, "{r}").unwrap();
    }
    file.flush().unwrap();
    file
}

#[test]
fn four_record_scenario() {
    let file = write_records(&[
        record("1", "1", "7", "01", "1000000000.0"),
        record("1", "4", "7", "02", "500000000.0"),
        record("2", "1", "3", "01", "2000000000.0"),
        record("2", "9", "3", "06", "100000000.0"),
    ]);

    let decoded = decode_file(file.path(), &PNADC_LAYOUT).unwrap();
    assert_eq!(decoded.len(), 4);

    let recoded = recode::recode_all(&decoded);
    assert_eq!(recoded.len(), 4);

    // The "Ignorado" record goes at the race collapse.
    let analysis = filter::analysis_rows(&recoded);
    assert_eq!(analysis.len(), 3);

    let table = pipeline::run(file.path(), &PNADC_LAYOUT);
    assert_eq!(table, IndicatorTable::from_rows(&analysis));
    assert_eq!(table.len(), 2);

    let hi = Education::SecondaryOrMore;
    let lo = Education::BelowSecondary;
    assert_eq!(table.get(hi, Sex::Male, RaceGroup::White), Some(100.0));
    assert_eq!(table.get(hi, Sex::Male, RaceGroup::BlackOrBrown), Some(0.0));
    assert_eq!(table.get(lo, Sex::Female, RaceGroup::White), Some(100.0));
    assert_eq!(table.get(lo, Sex::Female, RaceGroup::BlackOrBrown), None);
    assert_eq!(table.get(lo, Sex::Male, RaceGroup::White), None);
}

#[test]
fn weighted_rates_across_groups() {
    let file = write_records(&[
        record("2", "2", "5", "01", "10"),
        record("2", "4", "6", "04", "30"),
        record("2", "1", "6", "03", "7.5"),
        record("2", "1", "1", "  ", "99"),
        record("1", "1", "2", "09", "12"),
        record("1", "3", "2", "01", "12"),
        record("3", "1", "2", "01", "12"),
        record("1", "1", "2", "05", "not a number"),
    ]);

    let table = pipeline::run(file.path(), &PNADC_LAYOUT);
    assert_eq!(table.len(), 2);

    let hi = Education::SecondaryOrMore;
    let lo = Education::BelowSecondary;
    assert_eq!(table.get(hi, Sex::Female, RaceGroup::BlackOrBrown), Some(25.0));
    assert_eq!(table.get(hi, Sex::Female, RaceGroup::White), Some(100.0));
    assert_eq!(table.get(lo, Sex::Male, RaceGroup::White), Some(0.0));
    assert_eq!(table.get(lo, Sex::Male, RaceGroup::BlackOrBrown), None);
}

#[test]
fn infinite_weight_keeps_the_row_but_blanks_its_cell() {
    let file = write_records(&[
        record("1", "1", "7", "01", "10"),
        record("1", "1", "7", "02", "inf"),
        record("1", "2", "7", "01", "5"),
    ]);

    let decoded = decode_file(file.path(), &PNADC_LAYOUT).unwrap();
    assert_eq!(recode::recode_all(&decoded).len(), 3);

    let table = pipeline::run(file.path(), &PNADC_LAYOUT);
    let hi = Education::SecondaryOrMore;
    assert_eq!(table.len(), 1);
    assert_eq!(table.get(hi, Sex::Male, RaceGroup::White), None);
    assert_eq!(table.get(hi, Sex::Male, RaceGroup::BlackOrBrown), Some(100.0));
}

#[test]
fn missing_file_yields_empty_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("PNADC_032025.txt");

    assert!(load_or_empty(&path, &PNADC_LAYOUT).is_empty());
    assert!(recode::recode_all(&[]).is_empty());
    assert!(filter::analysis_rows(&[]).is_empty());

    let table = pipeline::run(&path, &PNADC_LAYOUT);
    assert!(table.is_empty());

    let batch = report::to_record_batch(&table).unwrap();
    assert_eq!(batch.num_rows(), 0);
    assert_eq!(batch.num_columns(), 4);
}

#[test]
fn no_focal_rows_yields_empty_table() {
    let file = write_records(&[
        record("1", "3", "7", "01", "10"),
        record("2", "1", "7", "  ", "10"),
    ]);
    let table = pipeline::run(file.path(), &PNADC_LAYOUT);
    assert!(table.is_empty());
}
