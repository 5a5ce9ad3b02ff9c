use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// DecodedRow – one fixed-width record, fields kept as raw text
// ---------------------------------------------------------------------------

/// One decoded record: field name → raw text, untrimmed.  Names borrow
/// from the layout table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedRow {
    pub fields: BTreeMap<&'static str, String>,
}

impl DecodedRow {
    /// Raw text for a field, or `""` when the layout did not declare it.
    pub fn raw(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Categories
//
// Variant order is the presentation order of the final table.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Sex {
    #[serde(rename = "Homem")]
    Male,
    #[serde(rename = "Mulher")]
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RaceColor {
    White,
    Black,
    Asian,
    Brown,
    Indigenous,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Education {
    #[serde(rename = "Médio completo ou mais")]
    SecondaryOrMore,
    #[serde(rename = "Médio incompleto ou menos")]
    BelowSecondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Work {
    FormalEmployed,
    InformalEmployed,
    NotEmployed,
}

/// Two-way race split used in the indicator table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RaceGroup {
    #[serde(rename = "Branca")]
    White,
    #[serde(rename = "Preta/Parda")]
    BlackOrBrown,
}

impl Sex {
    pub fn label(self) -> &'static str {
        match self {
            Sex::Male => "Homem",
            Sex::Female => "Mulher",
        }
    }
}

impl RaceColor {
    pub fn label(self) -> &'static str {
        match self {
            RaceColor::White => "Branca",
            RaceColor::Black => "Preta",
            RaceColor::Asian => "Amarela",
            RaceColor::Brown => "Parda",
            RaceColor::Indigenous => "Indígena",
            RaceColor::Unknown => "Ignorado",
        }
    }
}

impl Education {
    pub fn label(self) -> &'static str {
        match self {
            Education::SecondaryOrMore => "Médio completo ou mais",
            Education::BelowSecondary => "Médio incompleto ou menos",
        }
    }
}

impl Work {
    pub fn label(self) -> &'static str {
        match self {
            Work::FormalEmployed => "Ocupado Formal",
            Work::InformalEmployed => "Ocupado Informal",
            Work::NotEmployed => "Desocupado/Fora",
        }
    }

    pub fn is_employed(self) -> bool {
        !matches!(self, Work::NotEmployed)
    }
}

impl RaceGroup {
    /// Table columns, in display order.
    pub const ALL: [RaceGroup; 2] = [RaceGroup::White, RaceGroup::BlackOrBrown];

    pub fn label(self) -> &'static str {
        match self {
            RaceGroup::White => "Branca",
            RaceGroup::BlackOrBrown => "Preta/Parda",
        }
    }
}

macro_rules! display_label {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        })*
    };
}

display_label!(Sex, RaceColor, Education, Work, RaceGroup);

// ---------------------------------------------------------------------------
// Recoded / analysis rows
// ---------------------------------------------------------------------------

/// A recoded record with every field present.  Produced only by
/// [`super::recode::recode_all`], which drops rows with a missing category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecodedRow {
    pub sex: Sex,
    pub race_color: RaceColor,
    pub education: Education,
    pub work: Work,
    pub weight: f64,
}

/// An employed person in one of the two focal race groups.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisRow {
    pub sex: Sex,
    pub race_group: RaceGroup,
    pub education: Education,
    pub work: Work,
    pub weight: f64,
    pub is_formal: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_order_matches_label_order() {
        // Group keys sort the same way their labels do.
        assert!(Education::SecondaryOrMore < Education::BelowSecondary);
        assert!(Education::SecondaryOrMore.label() < Education::BelowSecondary.label());
        assert!(Sex::Male.label() < Sex::Female.label());
        assert!(RaceGroup::White.label() < RaceGroup::BlackOrBrown.label());
    }

    #[test]
    fn serde_uses_portuguese_labels() {
        let json = serde_json::to_string(&(Sex::Female, Education::BelowSecondary, RaceGroup::BlackOrBrown))
            .unwrap();
        assert_eq!(json, r#"["Mulher","Médio incompleto ou menos","Preta/Parda"]"#);
    }

    #[test]
    fn missing_raw_field_reads_as_blank() {
        let row = DecodedRow::default();
        assert_eq!(row.raw("V2007"), "");
    }
}
