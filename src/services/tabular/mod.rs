pub mod profiler;
pub mod reader;
pub mod types;
pub mod utils;

use crate::error::AppError;
use crate::models::TabularSummary;

/// Parses an uploaded table and profiles its numeric columns.
pub fn profile_table(data: &[u8], file_name: &str) -> Result<TabularSummary, AppError> {
    let format = utils::detect_format(file_name)?;
    let start = std::time::Instant::now();
    tracing::info!("Profiling {} ({:?}, {}KB)", file_name, format, data.len() / 1024);

    let table = reader::read_table(data, format).map_err(|e| {
        tracing::warn!("Failed to parse {}: {}", file_name, e);
        e
    })?;
    let summary = profiler::profile(table);

    tracing::info!("Profiled {} in {:?}", file_name, start.elapsed());
    Ok(summary)
}
