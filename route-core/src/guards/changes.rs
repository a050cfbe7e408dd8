//! Record diffing between two locations

use crate::equality::is_same_route_record;
use crate::record::RouteRecord;
use crate::types::RouteLocationNormalized;
use std::sync::Arc;

/// Matched records split by what a navigation does to them.
#[derive(Debug, Default)]
pub struct ChangingRecords {
    /// In `from` but not in `to`; receive `beforeRouteLeave`
    pub leaving: Vec<Arc<RouteRecord>>,
    /// In both; receive `beforeRouteUpdate`
    pub updating: Vec<Arc<RouteRecord>>,
    /// In `to` but not in `from`; receive `beforeRouteEnter`
    pub entering: Vec<Arc<RouteRecord>>,
}

/// Compare the matched records of `to` and `from`.
///
/// Records are compared with [`is_same_route_record`], so an alias and its
/// original count as the same record. Each list keeps matched order.
pub fn extract_changing_records(
    to: &RouteLocationNormalized,
    from: &RouteLocationNormalized,
) -> ChangingRecords {
    let mut changes = ChangingRecords::default();
    let len = to.matched.len().max(from.matched.len());

    for index in 0..len {
        if let Some(record_from) = from.matched.get(index) {
            if to
                .matched
                .iter()
                .any(|record| is_same_route_record(record, record_from))
            {
                changes.updating.push(Arc::clone(record_from));
            } else {
                changes.leaving.push(Arc::clone(record_from));
            }
        }

        if let Some(record_to) = to.matched.get(index) {
            if !from
                .matched
                .iter()
                .any(|record| is_same_route_record(record, record_to))
            {
                changes.entering.push(Arc::clone(record_to));
            }
        }
    }

    changes
}
