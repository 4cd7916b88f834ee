//! Export the aligned comparison to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts: one row per axis date, empty cells for gaps.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::compare::Comparison;
use crate::error::AppError;

/// Write the aligned comparison to a CSV file.
pub fn write_comparison_csv(
    path: &Path,
    cmp: &Comparison,
    left_label: &str,
    right_label: &str,
) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::usage(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writeln!(
        file,
        "date,{left_label}_close,{left_label}_pct,{right_label}_close,{right_label}_pct"
    )
    .map_err(|e| AppError::usage(format!("Failed to write export CSV header: {e}")))?;

    for (i, date) in cmp.dates.iter().enumerate() {
        writeln!(
            file,
            "{date},{},{},{},{}",
            csv_cell(cmp.left_close[i]),
            csv_cell(cmp.left_pct[i]),
            csv_cell(cmp.right_close[i]),
            csv_cell(cmp.right_pct[i]),
        )
        .map_err(|e| AppError::usage(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

fn csv_cell(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.6}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare;
    use crate::domain::DailyRecord;
    use chrono::NaiveDate;

    #[test]
    fn export_writes_one_row_per_axis_date() {
        let d = |day| NaiveDate::from_ymd_opt(2025, 2, day).unwrap();
        let left = vec![
            DailyRecord::new(d(3), Some(10.0)),
            DailyRecord::new(d(4), Some(11.0)),
        ];
        let right = vec![DailyRecord::new(d(4), Some(20.0))];
        let cmp = compare::compare(&left, &right);

        let dir = std::env::temp_dir();
        let path = dir.join("relperf_export_test.csv");
        write_comparison_csv(&path, &cmp, "AAPL", "MSFT").unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + cmp.len());
        assert_eq!(lines[0], "date,AAPL_close,AAPL_pct,MSFT_close,MSFT_pct");
        assert_eq!(lines[1], "2025-02-03,10.000000,0.000000,,");
        assert_eq!(lines[2], "2025-02-04,11.000000,10.000000,20.000000,0.000000");
    }
}
