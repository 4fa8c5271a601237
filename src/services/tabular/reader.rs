use std::io::Cursor;

use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use polars::prelude::*;

use super::types::{CellValue, RawTable, TableFormat};
use super::utils::{header_names, parse_cell};
use crate::error::AppError;

pub fn read_table(data: &[u8], format: TableFormat) -> Result<RawTable, AppError> {
    if data.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(AppError::ParseError(
            "Failed to parse file: No columns to parse from file".to_string(),
        ));
    }

    match format {
        TableFormat::Csv => read_delimited(data, b','),
        TableFormat::Tsv => read_delimited(data, b'\t'),
        TableFormat::Xlsx => read_workbook(data),
    }
}

/// Reads delimited text with every field as a string; typing happens later.
/// The first record is taken as the header so names are not rewritten by the
/// CSV reader itself.
fn read_delimited(data: &[u8], separator: u8) -> Result<RawTable, AppError> {
    let df = CsvReader::new(Cursor::new(data))
        .has_header(false)
        .with_separator(separator)
        .infer_schema(Some(0))
        .finish()?;

    let text_columns = df
        .get_columns()
        .iter()
        .map(|series| series.cast(&DataType::String))
        .collect::<PolarsResult<Vec<Series>>>()?;
    let fields = text_columns
        .iter()
        .map(|series| Ok::<_, PolarsError>(series.str()?.into_iter().collect::<Vec<Option<&str>>>()))
        .collect::<PolarsResult<Vec<_>>>()?;

    let header = fields
        .iter()
        .map(|column| column.first().copied().flatten().map(str::to_string))
        .collect();

    let rows = (1..df.height())
        .map(|row| fields.iter().map(|column| column[row]).collect::<Vec<_>>())
        .filter(|record| !record.iter().all(|field| is_blank_field(*field)))
        .map(|record| record.into_iter().map(parse_cell).collect())
        .collect();

    let table = assemble(header, rows);
    tracing::debug!(
        "Parsed delimited table: {} rows x {} columns",
        table.row_count,
        table.column_names.len()
    );
    Ok(table)
}

/// Reads the first worksheet, taking its first row as the header.
fn read_workbook(data: &[u8]) -> Result<RawTable, AppError> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(data))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AppError::ParseError("No sheets found in workbook".to_string()))?;
    let range = workbook.worksheet_range(&sheet_name)?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .ok_or_else(|| AppError::ParseError(format!("Sheet {} is empty", sheet_name)))?
        .iter()
        .map(|cell| match cell {
            Data::Empty => None,
            other => Some(other.to_string()),
        })
        .collect();

    let rows = rows
        .filter(|row| !row.iter().all(is_blank_cell))
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    let table = assemble(header, rows);
    tracing::debug!(
        "Parsed worksheet {}: {} rows x {} columns",
        sheet_name,
        table.row_count,
        table.column_names.len()
    );
    Ok(table)
}

/// Transposes data rows under a named header. Short rows are padded with
/// missing cells; cells past the header width are dropped.
fn assemble(header: Vec<Option<String>>, rows: Vec<Vec<CellValue>>) -> RawTable {
    let column_names = header_names(header);
    let mut columns: Vec<Vec<CellValue>> =
        vec![Vec::with_capacity(rows.len()); column_names.len()];
    for row in &rows {
        for (idx, column) in columns.iter_mut().enumerate() {
            column.push(row.get(idx).cloned().unwrap_or(CellValue::Missing));
        }
    }

    RawTable {
        column_names,
        columns,
        row_count: rows.len(),
    }
}

fn is_blank_field(field: Option<&str>) -> bool {
    field.map_or(true, |s| s.trim().is_empty())
}

fn is_blank_cell(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) if f.is_finite() => CellValue::Number(*f),
        Data::Float(_) | Data::Empty | Data::Error(_) => CellValue::Missing,
        Data::String(s) => parse_cell(Some(s)),
        other => CellValue::Text(other.to_string()),
    }
}
