use std::path::Path;

use crate::data::filter::analysis_rows;
use crate::data::layout::FieldLayout;
use crate::data::loader::load_or_empty;
use crate::data::model::DecodedRow;
use crate::data::recode::recode_all;
use crate::indicator::IndicatorTable;

/// Decode `path` with `layout` and compute the indicator table.  Never
/// fails: unreadable input yields an empty table.
pub fn run(path: &Path, layout: &FieldLayout) -> IndicatorTable {
    if let Err(e) = layout.validate() {
        log::error!("Invalid field layout: {e}");
        return IndicatorTable::default();
    }
    log::info!("Reading microdata from {} ({layout})", path.display());
    let decoded = load_or_empty(path, layout);
    run_decoded(&decoded)
}

/// The stages after decoding.
pub fn run_decoded(decoded: &[DecodedRow]) -> IndicatorTable {
    if decoded.is_empty() {
        log::warn!("Dataset is empty; recoding skipped");
        return IndicatorTable::default();
    }

    let recoded = recode_all(decoded);
    log::info!("{} of {} records complete after recoding", recoded.len(), decoded.len());

    let analysis = analysis_rows(&recoded);
    log::info!("{} employed records in the focal race groups", analysis.len());

    let table = IndicatorTable::from_rows(&analysis);
    log::info!("Indicator table has {} rows", table.len());
    table
}
