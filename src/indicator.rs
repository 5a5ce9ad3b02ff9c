use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::model::{AnalysisRow, Education, RaceGroup, Sex};

/// Composite grouping key, ordered education → sex → race group.
pub type GroupKey = (Education, Sex, RaceGroup);

// ---------------------------------------------------------------------------
// Weighted mean
// ---------------------------------------------------------------------------

/// Running sums of one group.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WeightedSum {
    pub weighted_value: f64,
    pub weight: f64,
}

impl WeightedSum {
    pub fn add(&mut self, value: f64, weight: f64) {
        self.weighted_value += value * weight;
        self.weight += weight;
    }

    /// `Σ(value·weight) / Σweight`, or `None` when the weights sum to zero
    /// or an infinite weight leaves the ratio undefined.
    pub fn mean(&self) -> Option<f64> {
        if self.weight == 0.0 {
            return None;
        }
        Some(self.weighted_value / self.weight).filter(|m| m.is_finite())
    }
}

/// Weighted share of formal workers per group, as a fraction in `[0, 1]`.
pub fn weighted_means(rows: &[AnalysisRow]) -> BTreeMap<GroupKey, Option<f64>> {
    let mut sums: BTreeMap<GroupKey, WeightedSum> = BTreeMap::new();
    for r in rows {
        sums.entry((r.education, r.sex, r.race_group))
            .or_default()
            .add(f64::from(r.is_formal), r.weight);
    }
    sums.into_iter().map(|(key, s)| (key, s.mean())).collect()
}

/// Scale a fraction to a percentage with one decimal, ties to even.
pub fn to_percent(fraction: f64) -> f64 {
    (fraction * 100.0 * 10.0).round_ties_even() / 10.0
}

// ---------------------------------------------------------------------------
// IndicatorTable – (education, sex) rows × race-group columns
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorRow {
    #[serde(rename = "Nível de Instrução")]
    pub education: Education,
    #[serde(rename = "Sexo")]
    pub sex: Sex,
    /// One cell per [`RaceGroup::ALL`] entry; `None` is a missing cell.
    #[serde(serialize_with = "serialize_cells")]
    pub cells: [Option<f64>; 2],
}

impl IndicatorRow {
    pub fn get(&self, group: RaceGroup) -> Option<f64> {
        let idx = RaceGroup::ALL.iter().position(|g| *g == group)?;
        self.cells[idx]
    }
}

/// Formal-employment rate (%) of the employed population.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndicatorTable {
    pub rows: Vec<IndicatorRow>,
}

impl IndicatorTable {
    pub const TITLE: &'static str =
        "Taxa de Formalidade da População Ocupada (%) por Instrução, Sexo e Raça/Cor";
    pub const INDEX_NAMES: [&'static str; 2] = ["Nível de Instrução", "Sexo"];

    /// Group, average, scale and pivot the analysis rows.
    pub fn from_rows(rows: &[AnalysisRow]) -> Self {
        Self::pivot(&weighted_means(rows))
    }

    /// Reshape per-group means into one row per (education, sex) pair.
    /// Absent combinations and zero-weight groups become missing cells.
    pub fn pivot(means: &BTreeMap<GroupKey, Option<f64>>) -> Self {
        let mut by_row: BTreeMap<(Education, Sex), [Option<f64>; 2]> = BTreeMap::new();
        for (&(education, sex, group), mean) in means {
            let cells = by_row.entry((education, sex)).or_default();
            if let Some(idx) = RaceGroup::ALL.iter().position(|g| *g == group) {
                cells[idx] = mean.map(to_percent);
            }
        }
        let rows = by_row
            .into_iter()
            .map(|((education, sex), cells)| IndicatorRow {
                education,
                sex,
                cells,
            })
            .collect();
        IndicatorTable { rows }
    }

    pub fn get(&self, education: Education, sex: Sex, group: RaceGroup) -> Option<f64> {
        self.rows
            .iter()
            .find(|r| r.education == education && r.sex == sex)
            .and_then(|r| r.get(group))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn serialize_cells<S: serde::Serializer>(cells: &[Option<f64>; 2], s: S) -> Result<S::Ok, S::Error> {
    use serde::ser::SerializeMap;
    let mut map = s.serialize_map(Some(cells.len()))?;
    for (group, cell) in RaceGroup::ALL.iter().zip(cells) {
        map.serialize_entry(group.label(), cell)?;
    }
    map.end()
}
