//! Date-axis construction and series alignment.
//!
//! Three small, order-sensitive steps:
//!
//! - `close_by_date`: flatten a record sequence into a date-keyed lookup
//! - `union_dates`: merge two trading calendars into one shared axis
//! - `aligned_closes`: project a lookup onto the axis, gaps kept explicit

use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use crate::domain::DailyRecord;

/// Build the date → close lookup for one side.
///
/// One entry per input record; if the provider ever repeats a date the last
/// record wins. A record whose close is absent still claims its date (the
/// date belongs on the axis, the value stays a gap).
pub fn close_by_date(records: &[DailyRecord]) -> HashMap<NaiveDate, Option<f64>> {
    let mut map = HashMap::with_capacity(records.len());
    for r in records {
        map.insert(r.date, r.close);
    }
    map
}

/// Merge both sides' trading dates into one strictly ascending axis.
///
/// Dates shared by both sides appear once. Ordering is chronological by
/// construction: records carry parsed `NaiveDate`s, never raw strings, so
/// lexical-vs-calendar divergence cannot occur here.
pub fn union_dates(left: &[DailyRecord], right: &[DailyRecord]) -> Vec<NaiveDate> {
    let mut dates = BTreeSet::new();
    for r in left {
        dates.insert(r.date);
    }
    for r in right {
        dates.insert(r.date);
    }
    dates.into_iter().collect()
}

/// Project one side's closes onto the shared axis.
///
/// Left-join semantics: exactly one output entry per axis date, `None` where
/// the side has no close for that date. No interpolation, no forward-fill.
pub fn aligned_closes(
    axis: &[NaiveDate],
    closes: &HashMap<NaiveDate, Option<f64>>,
) -> Vec<Option<f64>> {
    axis.iter()
        .map(|date| closes.get(date).copied().flatten())
        .collect()
}
