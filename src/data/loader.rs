use std::io::Read;
use std::path::Path;

use super::error::DatasetError;
use super::model::{
    COL_ACTUAL_AREA, COL_AREA, COL_GROUP, COL_INSTANCE_DATE, COL_PROCEDURE_AREA, COL_TRANS_VALUE,
    RawRecord,
};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load raw transaction records from a CSV file.
///
/// Expected layout: a header row naming at least the six required columns
/// (`TRANS_VALUE`, `ACTUAL_AREA`, `PROCEDURE_AREA`, `GROUP_EN`, `AREA_EN`,
/// `INSTANCE_DATE`); extra columns are ignored. Empty numeric cells load as
/// `None`, any other unparseable numeric cell aborts the load.
pub fn load_csv(path: &Path) -> Result<Vec<RawRecord>, DatasetError> {
    let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_records(file)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse transaction records from any CSV reader. Header validation happens
/// up front so a missing column is reported by name, not as a row error.
pub fn read_records<R: Read>(input: R) -> Result<Vec<RawRecord>, DatasetError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

    let column = |name: &str| -> Result<usize, DatasetError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DatasetError::MissingColumn(name.to_string()))
    };

    let trans_idx = column(COL_TRANS_VALUE)?;
    let actual_idx = column(COL_ACTUAL_AREA)?;
    let procedure_idx = column(COL_PROCEDURE_AREA)?;
    let group_idx = column(COL_GROUP)?;
    let area_idx = column(COL_AREA)?;
    let date_idx = column(COL_INSTANCE_DATE)?;

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result?;

        let number = |idx: usize, col: &str| -> Result<Option<f64>, DatasetError> {
            let cell = record.get(idx).unwrap_or("").trim();
            if cell.is_empty() {
                return Ok(None);
            }
            cell.parse::<f64>()
                .map(Some)
                .map_err(|_| DatasetError::Number {
                    row: row_no,
                    column: col.to_string(),
                    value: cell.to_string(),
                })
        };

        records.push(RawRecord {
            trans_value: number(trans_idx, COL_TRANS_VALUE)?,
            actual_area: number(actual_idx, COL_ACTUAL_AREA)?,
            procedure_area: number(procedure_idx, COL_PROCEDURE_AREA)?,
            group: record.get(group_idx).unwrap_or("").trim().to_string(),
            area: record.get(area_idx).unwrap_or("").trim().to_string(),
            instance_date: record.get(date_idx).unwrap_or("").trim().to_string(),
        });
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "TRANS_VALUE,ACTUAL_AREA,PROCEDURE_AREA,GROUP_EN,AREA_EN,INSTANCE_DATE";

    #[test]
    fn parses_rows_in_order() {
        let csv = format!(
            "{HEADER}\n1200000,80.5,80.5,Sales,Dubai Marina,2024-01-05\n\
             950000,64.0,66.2,Mortgages,Business Bay,2024-02-10\n"
        );
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].trans_value, Some(1_200_000.0));
        assert_eq!(records[0].area, "Dubai Marina");
        assert_eq!(records[1].group, "Mortgages");
        assert_eq!(records[1].instance_date, "2024-02-10");
    }

    #[test]
    fn empty_numeric_cells_load_as_none() {
        let csv = format!("{HEADER}\n1000,,75.0,Sales,Jumeirah,2024-03-01\n");
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].actual_area, None);
        assert_eq!(records[0].procedure_area, Some(75.0));
    }

    #[test]
    fn missing_area_column_is_reported_by_name() {
        let csv = "TRANS_VALUE,ACTUAL_AREA,PROCEDURE_AREA,GROUP_EN,INSTANCE_DATE\n\
                   1000,80,80,Sales,2024-01-01\n";
        let err = read_records(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(col) if col == "AREA_EN"));
    }

    #[test]
    fn garbage_numeric_cell_aborts_the_load() {
        let csv = format!("{HEADER}\nnot-a-price,80,80,Sales,Jumeirah,2024-01-01\n");
        let err = read_records(csv.as_bytes()).unwrap_err();
        match err {
            DatasetError::Number { row, column, value } => {
                assert_eq!(row, 0);
                assert_eq!(column, "TRANS_VALUE");
                assert_eq!(value, "not-a-price");
            }
            other => panic!("expected Number error, got {other:?}"),
        }
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "TRANSACTION_ID,TRANS_VALUE,ACTUAL_AREA,PROCEDURE_AREA,GROUP_EN,AREA_EN,INSTANCE_DATE\n\
                   tx-1,500000,50,50,Sales,Deira,2024-01-01\n";
        let records = read_records(csv.as_bytes()).unwrap();
        assert_eq!(records[0].trans_value, Some(500_000.0));
        assert_eq!(records[0].area, "Deira");
    }
}
