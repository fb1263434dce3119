use super::model::TransactionTable;

// ---------------------------------------------------------------------------
// Outlier filter: quantile-threshold row exclusion
// ---------------------------------------------------------------------------

/// Quantile threshold applied to TRANS_VALUE before the size-vs-price
/// scatter.
pub const OUTLIER_QUANTILE: f64 = 0.99;

/// Linear-interpolation quantile over the non-missing values, matching the
/// estimator the source data was explored with. `None` for an empty slice.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let frac = pos - lo as f64;
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Indices of rows whose TRANS_VALUE lies strictly below the `q` quantile of
/// the current table. The threshold is recomputed from the table on every
/// call, never stored. Rows with a missing TRANS_VALUE never pass.
///
/// Degenerate edge: when every non-missing value is equal, the strict
/// comparison would exclude the whole table, so all row indices are returned
/// unchanged.
pub fn below_quantile(table: &TransactionTable, q: f64) -> Vec<usize> {
    let values: Vec<f64> = table.rows.iter().filter_map(|r| r.trans_value).collect();

    let Some(threshold) = quantile(&values, q) else {
        return (0..table.len()).collect();
    };
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        return (0..table.len()).collect();
    }

    table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, r)| r.trans_value.is_some_and(|v| v < threshold))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Transaction;
    use chrono::NaiveDate;

    fn table(values: &[Option<f64>]) -> TransactionTable {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let rows = values
            .iter()
            .map(|&trans_value| Transaction {
                trans_value,
                actual_area: Some(80.0),
                procedure_area: Some(80.0),
                group: "Sales".to_string(),
                area: "Deira".to_string(),
                date,
                month: "2024-01".to_string(),
            })
            .collect();
        TransactionTable::from_rows(rows)
    }

    #[test]
    fn quantile_interpolates_linearly() {
        assert_eq!(quantile(&[1.0, 2.0, 3.0, 4.0], 0.5), Some(2.5));
        assert_eq!(quantile(&[1.0, 2.0, 3.0], 0.5), Some(2.0));
        assert_eq!(quantile(&[5.0], 0.99), Some(5.0));
        assert_eq!(quantile(&[], 0.99), None);
    }

    #[test]
    fn strictly_increasing_column_drops_exactly_the_largest_value() {
        let values: Vec<Option<f64>> = (1..=100).map(|v| Some(v as f64)).collect();
        let kept = below_quantile(&table(&values), OUTLIER_QUANTILE);
        assert_eq!(kept.len(), 99);
        assert!(!kept.contains(&99)); // index of the value 100
    }

    #[test]
    fn no_kept_row_reaches_the_threshold() {
        let values: Vec<Option<f64>> = [3.0, 9.0, 1.0, 42.0, 7.0, 7.0, 100.0, 2.0]
            .iter()
            .map(|&v| Some(v))
            .collect();
        let t = table(&values);
        let threshold = quantile(
            &t.rows.iter().filter_map(|r| r.trans_value).collect::<Vec<_>>(),
            OUTLIER_QUANTILE,
        )
        .unwrap();
        for idx in below_quantile(&t, OUTLIER_QUANTILE) {
            assert!(t.rows[idx].trans_value.unwrap() < threshold);
        }
    }

    #[test]
    fn all_equal_values_keep_every_row() {
        let kept = below_quantile(&table(&[Some(5.0); 12]), OUTLIER_QUANTILE);
        assert_eq!(kept.len(), 12);
    }

    #[test]
    fn missing_values_never_pass() {
        let kept = below_quantile(
            &table(&[Some(1.0), None, Some(2.0), Some(1000.0)]),
            OUTLIER_QUANTILE,
        );
        assert!(!kept.contains(&1));
    }
}
