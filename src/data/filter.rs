use super::model::{AnalysisRow, RaceColor, RaceGroup, RecodedRow, Work};

// ---------------------------------------------------------------------------
// Occupied population, focal race groups
// ---------------------------------------------------------------------------

/// Collapse race/color into the two focal groups.  Asian, Indigenous and
/// undeclared are outside the comparison.
pub fn race_group(race: RaceColor) -> Option<RaceGroup> {
    match race {
        RaceColor::White => Some(RaceGroup::White),
        RaceColor::Black | RaceColor::Brown => Some(RaceGroup::BlackOrBrown),
        RaceColor::Asian | RaceColor::Indigenous | RaceColor::Unknown => None,
    }
}

/// Restrict to the employed population in a focal race group and attach the
/// formal-employment indicator.
pub fn analysis_rows(rows: &[RecodedRow]) -> Vec<AnalysisRow> {
    let employed = rows.iter().filter(|r| r.work.is_employed());
    let out: Vec<AnalysisRow> = employed
        .filter_map(|r| {
            Some(AnalysisRow {
                sex: r.sex,
                race_group: race_group(r.race_color)?,
                education: r.education,
                work: r.work,
                weight: r.weight,
                is_formal: u8::from(r.work == Work::FormalEmployed),
            })
        })
        .collect();
    log::debug!("{} of {} recoded rows kept for analysis", out.len(), rows.len());
    out
}
