/// A single cell after typed inference.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Missing,
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Tsv,
    Xlsx,
}

/// Column-major view of an uploaded table.
#[derive(Debug, Default)]
pub struct RawTable {
    pub column_names: Vec<String>,
    pub columns: Vec<Vec<CellValue>>,
    pub row_count: usize,
}
