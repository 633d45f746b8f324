use serde::Serialize;
use std::collections::BTreeMap;

/// One settlement row keyed by column title.
pub type ReportRecord = BTreeMap<String, String>;

/// A decoded settlement report: the per-transaction rows and the trailing
/// summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SettlementReport {
    pub list: Vec<ReportRecord>,
    pub summary: Option<ReportRecord>,
}
