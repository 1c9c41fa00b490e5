//! khata-analysis: derived columns and aggregate views over an extracted
//! transaction table. Consumes `khata-extract` output; owns no extraction
//! logic.

pub mod enrich;
pub mod summary;

pub use enrich::{EnrichedTransaction, enrich};
pub use summary::{
    Flow, FlowSummary, category_totals, daily_flows, hourly_flows, outliers, top_merchants,
    weekday_flows,
};
