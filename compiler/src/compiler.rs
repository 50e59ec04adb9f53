use tracing::{info, warn};
use crate::{
    encoder::encode_row,
    error::ConvertError,
    resolver::resolve_references,
    scheme::build_scheme,
    types::{CellValue, RowData, Scheme, Table},
};

/// One table as handed over by the spreadsheet reader: the two header rows
/// and the data rows below them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub name:         String,
    pub header_names: Vec<String>,
    pub header_defs:  Vec<String>,
    pub rows:         Vec<Vec<CellValue>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Tables whose raw name starts with this prefix are not converted.
    pub skip_prefix: String,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            skip_prefix: "_".to_string(),
        }
    }
}

/// Runs the whole conversion: build every scheme, sort the tables by name,
/// resolve references across all of them, then encode the rows.
///
/// Stops at the first error; no table is returned unless all of them
/// convert.
pub fn convert_tables(
    raw_tables: Vec<RawTable>,
    options: &ConvertOptions,
) -> Result<Vec<Table>, ConvertError> {
    let mut parsed: Vec<(Scheme, Vec<Vec<CellValue>>)> = Vec::with_capacity(raw_tables.len());
    for raw in raw_tables {
        if !options.skip_prefix.is_empty() && raw.name.starts_with(&options.skip_prefix) {
            warn!(table = %raw.name, "skipping table");
            continue;
        }
        info!(table = %raw.name, "reading table");
        let scheme = build_scheme(&raw.name, &raw.header_names, &raw.header_defs)?;
        parsed.push((scheme, raw.rows));
    }
    parsed.sort_by(|a, b| a.0.table.cmp(&b.0.table));

    let schemes: Vec<&Scheme> = parsed.iter().map(|(scheme, _)| scheme).collect();
    let (index, resolution) = resolve_references(&schemes);
    info!(
        types = index.len(),
        bound = resolution.bound,
        unbound = resolution.unbound.len(),
        "resolved references"
    );

    parsed
        .into_iter()
        .map(|(scheme, rows)| {
            let rows = encode_rows(&scheme, &rows)?;
            info!(table = %scheme.table, rows = rows.len(), "converted table");
            Ok(Table { scheme, rows })
        })
        .collect()
}

/// Encodes the data rows of one table. Rows whose first cell is empty are
/// skipped.
pub fn encode_rows(scheme: &Scheme, rows: &[Vec<CellValue>]) -> Result<Vec<RowData>, ConvertError> {
    rows.iter()
        .filter(|row| row.first().map_or(false, |cell| !cell.is_empty()))
        .map(|row| encode_row(scheme, row))
        .collect()
}
