use std::fmt;

// ---------------------------------------------------------------------------
// FieldSpec – one named byte range of a fixed-width record
// ---------------------------------------------------------------------------

/// A named field occupying the half-open byte range `[start, end)` of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
}

impl FieldSpec {
    pub const fn new(name: &'static str, start: usize, end: usize) -> Self {
        FieldSpec { name, start, end }
    }

    pub fn width(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Slice this field out of a record.  Ranges running past the end of the
    /// record yield a shorter (possibly empty) slice, never a panic.
    pub fn slice<'a>(&self, record: &'a [u8]) -> &'a [u8] {
        let end = self.end.min(record.len());
        let start = self.start.min(end);
        &record[start..end]
    }
}

// ---------------------------------------------------------------------------
// PNAD Contínua codebook
// ---------------------------------------------------------------------------

/// Sex (V2007).
pub const SEX: &str = "V2007";
/// Color or race (V2010).
pub const RACE_COLOR: &str = "V2010";
/// Highest education level attained (VD3004).
pub const EDUCATION: &str = "VD3004";
/// Position in occupation (VD4009).
pub const OCCUPATION: &str = "VD4009";
/// Sampling weight (V1028).
pub const WEIGHT: &str = "V1028";

// Offsets from the quarterly microdata dictionary, shifted to 0-based.
const PNADC_FIELDS: [FieldSpec; 5] = [
    FieldSpec::new(SEX, 94, 95),
    FieldSpec::new(RACE_COLOR, 106, 107),
    FieldSpec::new(EDUCATION, 404, 405),
    FieldSpec::new(OCCUPATION, 416, 418),
    FieldSpec::new(WEIGHT, 49, 65),
];

/// Layout of the five variables read from a PNAD Contínua quarterly record.
pub const PNADC_LAYOUT: FieldLayout = FieldLayout::new(&PNADC_FIELDS);

// ---------------------------------------------------------------------------
// FieldLayout – ordered list of fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum LayoutError {
    #[error("field '{name}' has an empty or inverted range [{start}, {end})")]
    EmptyRange {
        name: &'static str,
        start: usize,
        end: usize,
    },
    #[error("field '{0}' is declared more than once")]
    DuplicateName(&'static str),
}

/// The ordered field table of a fixed-width record format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    fields: &'static [FieldSpec],
}

impl FieldLayout {
    pub const fn new(fields: &'static [FieldSpec]) -> Self {
        FieldLayout { fields }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    pub fn get(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Smallest record length that holds every field.
    pub fn record_len(&self) -> usize {
        self.fields.iter().map(|f| f.end).max().unwrap_or(0)
    }

    /// Check the internal consistency of the table.  Overlapping ranges are
    /// allowed: they come straight from the codebook.
    pub fn validate(&self) -> Result<(), LayoutError> {
        for (i, f) in self.fields.iter().enumerate() {
            if f.start >= f.end {
                return Err(LayoutError::EmptyRange {
                    name: f.name,
                    start: f.start,
                    end: f.end,
                });
            }
            if self.fields[..i].iter().any(|g| g.name == f.name) {
                return Err(LayoutError::DuplicateName(f.name));
            }
        }
        Ok(())
    }

    /// Build a space-padded record of `len` bytes with each given value
    /// written at its field's offset.  Values wider than their field are
    /// truncated; unknown names are ignored.
    pub fn encode(&self, len: usize, values: &[(&str, &str)]) -> String {
        let mut record = vec![b' '; len.max(self.record_len())];
        for (name, value) in values {
            let Some(spec) = self.get(name) else {
                continue;
            };
            let bytes = value.as_bytes();
            let n = bytes.len().min(spec.width());
            record[spec.start..spec.start + n].copy_from_slice(&bytes[..n]);
        }
        String::from_utf8_lossy(&record).into_owned()
    }
}

impl fmt::Display for FieldLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, spec) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}[{}..{})", spec.name, spec.start, spec.end)?;
        }
        Ok(())
    }
}
