use crate::membership::TrackedNames;
use crate::model::{AnalysisRecord, CalendarEntry, Product};
use crate::window::expand;

/// One calendar entry per product, in input order.
///
/// Products sharing a name are not merged; each row is evaluated on its own.
/// Origin is stored trimmed and may be empty.
pub fn build(products: &[Product], analyses: &[AnalysisRecord]) -> Vec<CalendarEntry> {
    let tracked = TrackedNames::from_analyses(analyses);

    products
        .iter()
        .map(|p| CalendarEntry {
            product: p.name.trim().to_string(),
            origin: p.origin.trim().to_string(),
            tracked_in_report: tracked.contains(&p.name),
            active_months: expand(p.harvest_window.as_deref()),
        })
        .collect()
}
