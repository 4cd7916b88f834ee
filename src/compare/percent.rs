//! Percent-change rebasing of an aligned close series.

/// Rebase an aligned close series to percent change from its first usable
/// close.
///
/// The base is the first entry that is present and finite. If no entry
/// qualifies, or the base is exactly zero, the whole series is `None`: an
/// undefined normalization is a designed fallback here, not a failure, so
/// this function never divides by zero and never panics.
///
/// Gaps stay gaps, and non-finite closes are treated as gaps rather than
/// poisoning the output.
pub fn percent_change_series(closes: &[Option<f64>]) -> Vec<Option<f64>> {
    let base = closes
        .iter()
        .copied()
        .flatten()
        .find(|value| value.is_finite());

    let Some(base) = base else {
        return vec![None; closes.len()];
    };
    if base == 0.0 {
        return vec![None; closes.len()];
    }

    closes
        .iter()
        .map(|entry| match entry {
            Some(value) if value.is_finite() => Some((value - base) / base * 100.0),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_present_close_anchors_at_zero() {
        let pct = percent_change_series(&[None, Some(50.0), Some(55.0), Some(45.0)]);

        assert_eq!(pct, vec![None, Some(0.0), Some(10.0), Some(-10.0)]);
    }

    #[test]
    fn series_with_no_closes_stays_all_null() {
        let pct = percent_change_series(&[None, None, None]);
        assert_eq!(pct, vec![None, None, None]);
    }

    #[test]
    fn zero_base_disables_normalization_entirely() {
        // A zero starting close makes percent change undefined for every
        // entry, including later non-zero ones.
        let pct = percent_change_series(&[Some(0.0), Some(10.0), Some(20.0)]);
        assert_eq!(pct, vec![None, None, None]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(percent_change_series(&[]).is_empty());
    }

    #[test]
    fn gaps_are_preserved_index_for_index() {
        let closes = [Some(10.0), None, Some(12.0), None];

        let pct = percent_change_series(&closes);

        assert_eq!(pct.len(), closes.len());
        for (i, close) in closes.iter().enumerate() {
            assert_eq!(close.is_none(), pct[i].is_none(), "index {i}");
        }
    }

    #[test]
    fn non_finite_closes_are_skipped_as_base_and_output() {
        let pct = percent_change_series(&[Some(f64::NAN), Some(20.0), Some(f64::INFINITY), Some(25.0)]);

        assert_eq!(pct[0], None);
        assert_eq!(pct[1], Some(0.0));
        assert_eq!(pct[2], None);
        assert_eq!(pct[3], Some(25.0));
    }

    #[test]
    fn negative_base_still_rebases() {
        // Unusual for closes, but the arithmetic is well-defined and must not
        // be special-cased.
        let pct = percent_change_series(&[Some(-10.0), Some(-5.0)]);
        assert_eq!(pct, vec![Some(0.0), Some(-50.0)]);
    }
}
