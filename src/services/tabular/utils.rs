use std::collections::HashSet;

use super::types::{CellValue, TableFormat};
use crate::error::AppError;

// Tokens treated as missing, matching the usual CSV null markers.
const MISSING_MARKERS: &[&str] = &[
    "", "na", "n/a", "nan", "-nan", "null", "none", "nil", "#n/a", "<na>",
];

pub fn detect_format(file_name: &str) -> Result<TableFormat, AppError> {
    let lower = file_name.to_lowercase();
    if lower.ends_with(".csv") {
        Ok(TableFormat::Csv)
    } else if lower.ends_with(".tsv") {
        Ok(TableFormat::Tsv)
    } else if lower.ends_with(".xlsx") {
        Ok(TableFormat::Xlsx)
    } else {
        Err(AppError::InvalidInput(
            "Only CSV, TSV and XLSX files are supported".to_string(),
        ))
    }
}

pub fn is_missing_marker(raw: &str) -> bool {
    let trimmed = raw.trim().to_lowercase();
    MISSING_MARKERS.contains(&trimmed.as_str())
}

/// Classifies one raw text cell.
pub fn parse_cell(raw: Option<&str>) -> CellValue {
    match raw {
        None => CellValue::Missing,
        Some(s) if is_missing_marker(s) => CellValue::Missing,
        Some(s) => match s.trim().parse::<f64>() {
            Ok(n) if !n.is_finite() => CellValue::Missing,
            Ok(n) => CellValue::Number(n),
            Err(_) => CellValue::Text(s.to_string()),
        },
    }
}

/// Names header cells: blanks become `Unnamed: {index}` and repeats get
/// `.1`, `.2`, ... suffixes, skipping any suffix already taken.
pub fn header_names(raw: Vec<Option<String>>) -> Vec<String> {
    let mut taken = HashSet::new();
    raw.into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let base = match name {
                Some(name) if !name.trim().is_empty() => name,
                _ => format!("Unnamed: {}", idx),
            };
            let mut candidate = base.clone();
            let mut counter = 1;
            while !taken.insert(candidate.clone()) {
                candidate = format!("{}.{}", base, counter);
                counter += 1;
            }
            candidate
        })
        .collect()
}
