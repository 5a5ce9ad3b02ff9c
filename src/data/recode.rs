use super::layout::{EDUCATION, OCCUPATION, RACE_COLOR, SEX, WEIGHT};
use super::model::{DecodedRow, Education, RaceColor, RecodedRow, Sex, Work};

// ---------------------------------------------------------------------------
// Single-variable recodes
// ---------------------------------------------------------------------------

/// V2007.  Codes other than `1`/`2` are missing.
pub fn recode_sex(code: &str) -> Option<Sex> {
    match code {
        "1" => Some(Sex::Male),
        "2" => Some(Sex::Female),
        _ => None,
    }
}

/// V2010.  Codes outside the codebook are missing.
pub fn recode_race_color(code: &str) -> Option<RaceColor> {
    match code {
        "1" => Some(RaceColor::White),
        "2" => Some(RaceColor::Black),
        "3" => Some(RaceColor::Asian),
        "4" => Some(RaceColor::Brown),
        "5" => Some(RaceColor::Indigenous),
        "9" => Some(RaceColor::Unknown),
        _ => None,
    }
}

/// VD3004.  Levels 5 to 7 (complete secondary, incomplete and complete
/// tertiary) versus everything else, blanks included.
pub fn recode_education(code: &str) -> Education {
    match code {
        "5" | "6" | "7" => Education::SecondaryOrMore,
        _ => Education::BelowSecondary,
    }
}

/// VD4009.  Registered employees, military/statutory servants and employers
/// are formal; unregistered employees, own-account and family workers are
/// informal; anything else is outside the employed population.
pub fn recode_work(code: &str) -> Work {
    match code {
        "01" | "03" | "05" | "07" => Work::FormalEmployed,
        "02" | "04" | "06" | "08" | "09" | "10" => Work::InformalEmployed,
        _ => Work::NotEmployed,
    }
}

/// V1028.  Padding is ignored; blank, non-numeric and `NaN` text is missing.
/// Infinite weights are kept and poison their group's mean.
pub fn parse_weight(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|w| !w.is_nan())
}

// ---------------------------------------------------------------------------
// Row recode + required-fields filter
// ---------------------------------------------------------------------------

/// Recode one decoded row.  `None` when any of the five fields is missing.
pub fn recode_row(row: &DecodedRow) -> Option<RecodedRow> {
    Some(RecodedRow {
        sex: recode_sex(row.raw(SEX))?,
        race_color: recode_race_color(row.raw(RACE_COLOR))?,
        education: recode_education(row.raw(EDUCATION)),
        work: recode_work(row.raw(OCCUPATION)),
        weight: parse_weight(row.raw(WEIGHT))?,
    })
}

/// Recode every row, dropping those with a missing field.
pub fn recode_all(rows: &[DecodedRow]) -> Vec<RecodedRow> {
    let recoded: Vec<RecodedRow> = rows.iter().filter_map(recode_row).collect();
    let dropped = rows.len() - recoded.len();
    if dropped > 0 {
        log::debug!("Dropped {dropped} rows with a missing sex, race/color or weight");
    }
    recoded
}
