/// Data layer: record layout, decoding, recoding and filtering.
///
/// Architecture:
/// ```text
///   PNADC_*.txt (fixed-width)
///        │
///        ▼
///   ┌──────────┐
///   │  layout   │  field name → [start, end) byte range
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  slice each line → Vec<DecodedRow>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  recode   │  raw codes → categories, drop incomplete rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  employed + focal race group → Vec<AnalysisRow>
///   └──────────┘
/// ```

pub mod filter;
pub mod layout;
pub mod loader;
pub mod model;
pub mod recode;
