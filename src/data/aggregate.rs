use std::collections::{BTreeMap, HashMap};

use super::model::{NUMERIC_COLUMNS, TransactionTable};

// ---------------------------------------------------------------------------
// Aggregate rows
// ---------------------------------------------------------------------------

/// Number of areas shown in the comparison bar chart.
pub const TOP_AREAS: usize = 10;

/// One group's reduced mean transaction value.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub key: String,
    pub mean: f64,
}

// ---------------------------------------------------------------------------
// Reductions
// ---------------------------------------------------------------------------

/// Mean TRANS_VALUE per month bucket. `YYYY-MM` keys sort lexicographically,
/// which is chronological order.
pub fn monthly_mean(table: &TransactionTable) -> Vec<AggregateRow> {
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for row in &table.rows {
        if let Some(v) = row.trans_value {
            let entry = groups.entry(row.month.as_str()).or_insert((0.0, 0));
            entry.0 += v;
            entry.1 += 1;
        }
    }
    groups
        .into_iter()
        .map(|(month, (sum, n))| AggregateRow {
            key: month.to_string(),
            mean: sum / n as f64,
        })
        .collect()
}

/// Mean TRANS_VALUE per AREA_EN, sorted descending by mean and truncated to
/// `n`. The sort is stable, so tied areas keep first-appearance order.
pub fn top_areas(table: &TransactionTable, n: usize) -> Vec<AggregateRow> {
    let mut order: Vec<(String, f64, usize)> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for row in &table.rows {
        let Some(v) = row.trans_value else { continue };
        let slot = *slots.entry(row.area.clone()).or_insert_with(|| {
            order.push((row.area.clone(), 0.0, 0));
            order.len() - 1
        });
        order[slot].1 += v;
        order[slot].2 += 1;
    }

    let mut ranked: Vec<AggregateRow> = order
        .into_iter()
        .map(|(area, sum, count)| AggregateRow {
            key: area,
            mean: sum / count as f64,
        })
        .collect();
    ranked.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    ranked.truncate(n);
    ranked
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

/// Pairwise Pearson coefficients over the three numeric columns, with the
/// column labels attached for rendering.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub columns: [&'static str; 3],
    pub values: [[f64; 3]; 3],
}

/// Correlation over the rows where all three numerics are present (the
/// row-drop mirrors a `dropna` on the numeric projection). The diagonal is
/// fixed at 1.0; a zero-variance column yields NaN off-diagonal.
pub fn correlation_matrix(table: &TransactionTable) -> CorrelationMatrix {
    let complete: Vec<[f64; 3]> = table
        .rows
        .iter()
        .filter_map(|r| Some([r.trans_value?, r.actual_area?, r.procedure_area?]))
        .collect();

    let mut values = [[f64::NAN; 3]; 3];
    for i in 0..3 {
        values[i][i] = 1.0;
        for j in (i + 1)..3 {
            let xs: Vec<f64> = complete.iter().map(|row| row[i]).collect();
            let ys: Vec<f64> = complete.iter().map(|row| row[j]).collect();
            let r = pearson(&xs, &ys);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        columns: NUMERIC_COLUMNS,
        values,
    }
}

fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    let n = xs.len() as f64;
    let mx = xs.iter().sum::<f64>() / n;
    let my = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    cov / (var_x * var_y).sqrt()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::derive::with_month_buckets;
    use crate::data::model::RawRecord;

    fn raw(value: f64, area: &str, date: &str) -> RawRecord {
        RawRecord {
            trans_value: Some(value),
            actual_area: Some(value / 10_000.0),
            procedure_area: Some(value / 10_000.0),
            group: "Sales".to_string(),
            area: area.to_string(),
            instance_date: date.to_string(),
        }
    }

    fn table(records: Vec<RawRecord>) -> TransactionTable {
        TransactionTable::from_rows(with_month_buckets(records).unwrap())
    }

    #[test]
    fn monthly_mean_buckets_and_averages() {
        let t = table(vec![
            raw(100.0, "Deira", "2024-01-05"),
            raw(300.0, "Deira", "2024-01-20"),
            raw(200.0, "Deira", "2024-02-10"),
        ]);
        let rows = monthly_mean(&t);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], AggregateRow { key: "2024-01".to_string(), mean: 200.0 });
        assert_eq!(rows[1], AggregateRow { key: "2024-02".to_string(), mean: 200.0 });
    }

    #[test]
    fn monthly_mean_is_chronological_regardless_of_input_order() {
        let t = table(vec![
            raw(50.0, "Deira", "2024-12-01"),
            raw(10.0, "Deira", "2023-02-01"),
            raw(30.0, "Deira", "2023-11-01"),
        ]);
        let rows = monthly_mean(&t);
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["2023-02", "2023-11", "2024-12"]);
    }

    #[test]
    fn top_areas_sorts_descending_and_truncates() {
        let mut records = Vec::new();
        for i in 0..15 {
            let area = format!("Area {i:02}");
            records.push(raw(1000.0 * (i + 1) as f64, &area, "2024-01-01"));
        }
        let ranked = top_areas(&table(records), TOP_AREAS);
        assert_eq!(ranked.len(), 10);
        assert_eq!(ranked[0].key, "Area 14");
        for pair in ranked.windows(2) {
            assert!(pair[0].mean >= pair[1].mean);
        }
    }

    #[test]
    fn top_areas_keys_are_distinct_input_areas() {
        let t = table(vec![
            raw(100.0, "Deira", "2024-01-01"),
            raw(200.0, "Deira", "2024-01-02"),
            raw(500.0, "Jumeirah", "2024-01-03"),
        ]);
        let ranked = top_areas(&t, TOP_AREAS);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].key, "Jumeirah");
        assert_eq!(ranked[1].mean, 150.0);
    }

    #[test]
    fn top_areas_ties_keep_first_appearance_order() {
        let t = table(vec![
            raw(100.0, "Karama", "2024-01-01"),
            raw(100.0, "Satwa", "2024-01-02"),
            raw(100.0, "Mirdif", "2024-01-03"),
        ]);
        let rows = top_areas(&t, TOP_AREAS);
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["Karama", "Satwa", "Mirdif"]);
    }

    #[test]
    fn correlation_matrix_is_symmetric_with_unit_diagonal() {
        let t = table(vec![
            raw(100.0, "Deira", "2024-01-01"),
            raw(250.0, "Deira", "2024-01-02"),
            raw(900.0, "Deira", "2024-01-03"),
            raw(400.0, "Deira", "2024-01-04"),
        ]);
        let corr = correlation_matrix(&t);
        for i in 0..3 {
            assert_eq!(corr.values[i][i], 1.0);
            for j in 0..3 {
                assert_eq!(corr.values[i][j], corr.values[j][i]);
            }
        }
    }

    #[test]
    fn perfectly_linear_columns_correlate_to_one() {
        // actual_area is value / 10_000 in the fixture, an exact linear map.
        let t = table(vec![
            raw(100.0, "Deira", "2024-01-01"),
            raw(300.0, "Deira", "2024-01-02"),
            raw(700.0, "Deira", "2024-01-03"),
        ]);
        let corr = correlation_matrix(&t);
        assert!((corr.values[0][1] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rows_with_missing_numerics_are_dropped() {
        let mut records = vec![
            raw(100.0, "Deira", "2024-01-01"),
            raw(200.0, "Deira", "2024-01-02"),
            raw(900.0, "Deira", "2024-01-03"),
        ];
        // An anti-correlated row that only counts if the drop is broken.
        records.push(RawRecord {
            procedure_area: None,
            actual_area: Some(0.000_1),
            ..raw(1_000_000.0, "Deira", "2024-01-04")
        });
        records[2].actual_area = Some(0.10); // break the exact linearity
        let corr = correlation_matrix(&table(records));
        // Computed over the three complete rows only.
        assert!(corr.values[0][1] > 0.9 && corr.values[0][1] < 1.0);
    }

    #[test]
    fn missing_trans_values_are_skipped_by_means() {
        let mut records = vec![
            raw(100.0, "Deira", "2024-01-01"),
            raw(300.0, "Deira", "2024-01-02"),
        ];
        records.push(RawRecord {
            trans_value: None,
            ..raw(0.0, "Deira", "2024-01-03")
        });
        let rows = monthly_mean(&table(records));
        assert_eq!(rows[0].mean, 200.0);
    }
}
