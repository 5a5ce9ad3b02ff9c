use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use crate::data::model::RaceGroup;
use crate::indicator::IndicatorTable;

// ---------------------------------------------------------------------------
// Arrow hand-off
// ---------------------------------------------------------------------------

pub fn schema() -> Schema {
    let [education, sex] = IndicatorTable::INDEX_NAMES;
    let mut fields = vec![
        Field::new(education, DataType::Utf8, false),
        Field::new(sex, DataType::Utf8, false),
    ];
    fields.extend(
        RaceGroup::ALL
            .iter()
            .map(|g| Field::new(g.label(), DataType::Float64, true)),
    );
    Schema::new(fields)
}

/// Convert the indicator table into a single record batch.
pub fn to_record_batch(table: &IndicatorTable) -> Result<RecordBatch> {
    let education = StringArray::from(
        table.rows.iter().map(|r| r.education.label()).collect::<Vec<_>>(),
    );
    let sex = StringArray::from(table.rows.iter().map(|r| r.sex.label()).collect::<Vec<_>>());

    let mut columns: Vec<ArrayRef> = vec![Arc::new(education), Arc::new(sex)];
    for idx in 0..RaceGroup::ALL.len() {
        let values: Float64Array = table.rows.iter().map(|r| r.cells[idx]).collect();
        columns.push(Arc::new(values));
    }

    RecordBatch::try_new(Arc::new(schema()), columns).context("building indicator record batch")
}

// ---------------------------------------------------------------------------
// Text rendering
// ---------------------------------------------------------------------------

/// Title followed by an ASCII table; missing cells print as empty.
pub fn render_text(table: &IndicatorTable) -> Result<String> {
    let batch = to_record_batch(table)?;
    let body = pretty_format_batches(&[batch]).context("formatting indicator table")?;
    Ok(format!("{}\n{body}", IndicatorTable::TITLE))
}

pub fn render_json(table: &IndicatorTable) -> Result<String> {
    serde_json::to_string_pretty(table).context("serializing indicator table")
}

#[cfg(test)]
mod tests {
    use arrow::array::Array;

    use super::*;
    use crate::data::model::{AnalysisRow, Education, Sex, Work};

    fn sample_table() -> IndicatorTable {
        let rows = [
            AnalysisRow {
                sex: Sex::Male,
                race_group: RaceGroup::White,
                education: Education::SecondaryOrMore,
                work: Work::FormalEmployed,
                weight: 10.0,
                is_formal: 1,
            },
            AnalysisRow {
                sex: Sex::Male,
                race_group: RaceGroup::White,
                education: Education::SecondaryOrMore,
                work: Work::InformalEmployed,
                weight: 30.0,
                is_formal: 0,
            },
        ];
        IndicatorTable::from_rows(&rows)
    }

    #[test]
    fn batch_has_two_race_columns() {
        let batch = to_record_batch(&sample_table()).unwrap();
        assert_eq!(batch.num_rows(), 1);
        assert_eq!(batch.num_columns(), 4);
        let names: Vec<_> = batch.schema().fields().iter().map(|f| f.name().clone()).collect();
        assert_eq!(names, ["Nível de Instrução", "Sexo", "Branca", "Preta/Parda"]);

        let white = batch.column(2).as_any().downcast_ref::<Float64Array>().unwrap();
        assert_eq!(white.value(0), 25.0);
        let black = batch.column(3).as_any().downcast_ref::<Float64Array>().unwrap();
        assert!(black.is_null(0));
    }

    #[test]
    fn empty_table_still_has_all_columns() {
        let batch = to_record_batch(&IndicatorTable::default()).unwrap();
        assert_eq!(batch.num_rows(), 0);
        assert_eq!(batch.num_columns(), 4);
    }

    #[test]
    fn text_rendering_includes_title_and_values() {
        let text = render_text(&sample_table()).unwrap();
        assert!(text.starts_with(IndicatorTable::TITLE));
        assert!(text.contains("Preta/Parda"));
        assert!(text.contains("Médio completo ou mais"));
        assert!(text.contains("25.0"));
    }
}
