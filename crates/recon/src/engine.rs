use crate::aggregate::aggregate;
use crate::buckets::bucket;
use crate::builder::build;
use crate::model::{Report, ReportMeta, Snapshot};
use crate::views::metrics;

/// Derive the full report from a snapshot.
///
/// The snapshot is never modified; calling this twice on the same snapshot
/// yields the same report apart from `meta.generated_at`.
pub fn run(snapshot: &Snapshot) -> Report {
    let calendar = build(&snapshot.products, &snapshot.analyses);
    let months = bucket(&calendar, &snapshot.analyses);
    let distributions = aggregate(&snapshot.analyses);
    let metrics = metrics(&calendar, &snapshot.analyses);

    Report {
        meta: ReportMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        },
        metrics,
        calendar,
        months,
        distributions,
    }
}
