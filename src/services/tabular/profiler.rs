use indexmap::IndexMap;
use rayon::prelude::*;

use super::types::{CellValue, RawTable};
use crate::models::{ColumnProfile, TabularSummary};
use crate::services::round_to;

const AVG_DECIMALS: usize = 4;

/// Running min/max/sum over the numeric cells of one column.
#[derive(Debug, Clone, Copy, Default)]
struct NumericStats {
    min: Option<f64>,
    max: Option<f64>,
    sum: f64,
    count: usize,
}

impl NumericStats {
    fn push(mut self, value: f64) -> Self {
        self.min = Some(self.min.map_or(value, |m| m.min(value)));
        self.max = Some(self.max.map_or(value, |m| m.max(value)));
        self.sum += value;
        self.count += 1;
        self
    }

    fn into_profile(self) -> ColumnProfile {
        let avg = (self.count > 0).then(|| round_to(self.sum / self.count as f64, AVG_DECIMALS));
        ColumnProfile {
            min: self.min,
            max: self.max,
            avg,
        }
    }
}

/// A column is numeric when at least one cell parses as a number, or when it
/// has cells and every one of them is missing. Text cells inside a numeric
/// column are ignored like missing ones.
pub fn is_numeric_column(values: &[CellValue]) -> bool {
    let has_number = values.iter().any(|v| matches!(v, CellValue::Number(_)));
    let has_text = values.iter().any(|v| matches!(v, CellValue::Text(_)));
    has_number || (!has_text && !values.is_empty())
}

/// Returns `None` for non-numeric columns.
pub fn profile_column(values: &[CellValue]) -> Option<ColumnProfile> {
    if !is_numeric_column(values) {
        return None;
    }

    let stats = values
        .iter()
        .filter_map(|v| match v {
            CellValue::Number(n) => Some(*n),
            _ => None,
        })
        .fold(NumericStats::default(), NumericStats::push);

    Some(stats.into_profile())
}

pub fn profile(table: RawTable) -> TabularSummary {
    let profiles: Vec<Option<ColumnProfile>> = table
        .columns
        .par_iter()
        .map(|values| profile_column(values))
        .collect();

    let numeric_summary: IndexMap<String, ColumnProfile> = table
        .column_names
        .iter()
        .zip(profiles)
        .filter_map(|(name, profile)| profile.map(|p| (name.clone(), p)))
        .collect();

    tracing::info!(
        "Profiled {} rows x {} columns, {} numeric",
        table.row_count,
        table.column_names.len(),
        numeric_summary.len()
    );

    TabularSummary {
        rows: table.row_count,
        columns: table.column_names.len(),
        column_names: table.column_names,
        numeric_summary,
    }
}
