//! The JSON ingestion format read by `easyc`:
//!
//! ```json
//! {"tables": [{"name": "items",
//!              "header_names": ["id", "name"],
//!              "header_defs": ["int", "string"],
//!              "rows": [[1, "Axe"], [null, "skipped"]]}]}
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use easy_converter_compiler::{CellValue, ConvertError, RawTable};

#[derive(Debug, Deserialize)]
struct Workbook {
    tables: Vec<Sheet>,
}

#[derive(Debug, Deserialize)]
struct Sheet {
    name:         String,
    header_names: Vec<String>,
    header_defs:  Vec<String>,
    #[serde(default)]
    rows:         Vec<Vec<serde_json::Value>>,
}

pub fn load_tables(path: &Path) -> Result<Vec<RawTable>, ConvertError> {
    let text = fs::read_to_string(path)?;
    parse_tables(&text)
}

pub fn parse_tables(text: &str) -> Result<Vec<RawTable>, ConvertError> {
    let workbook: Workbook = serde_json::from_str(text)?;
    workbook
        .tables
        .into_iter()
        .map(|sheet| {
            let rows = sheet
                .rows
                .iter()
                .map(|row| row.iter().map(|v| cell(&sheet.name, v)).collect())
                .collect::<Result<Vec<_>, _>>()?;
            Ok(RawTable {
                name:         sheet.name,
                header_names: sheet.header_names,
                header_defs:  sheet.header_defs,
                rows,
            })
        })
        .collect()
}

fn cell(table: &str, value: &serde_json::Value) -> Result<CellValue, ConvertError> {
    use serde_json::Value as Json;
    Ok(match value {
        Json::Null => CellValue::Empty,
        Json::Bool(b) => CellValue::Bool(*b),
        Json::Number(n) => match n.as_i64() {
            Some(i) => CellValue::Integer(i),
            None => CellValue::Float(n.as_f64().unwrap_or_default()),
        },
        Json::String(s) => CellValue::Text(s.clone()),
        Json::Array(_) | Json::Object(_) => {
            return Err(ConvertError::MalformedCell {
                table: table.to_string(),
                field: String::new(),
                raw:   value.to_string(),
                msg:   "cells must be null, a boolean, a number or a string".to_string(),
            })
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_map_to_values() {
        let tables = parse_tables(
            r#"{"tables":[{"name":"items","header_names":["id","w","ok","name"],
                "header_defs":["int","float","bool","string"],
                "rows":[[1,2.5,true,"Axe"],[null]]}]}"#,
        )
        .unwrap();
        assert_eq!(tables[0].name, "items");
        assert_eq!(
            tables[0].rows[0],
            vec![
                CellValue::Integer(1),
                CellValue::Float(2.5),
                CellValue::Bool(true),
                CellValue::Text("Axe".into()),
            ]
        );
        assert_eq!(tables[0].rows[1], vec![CellValue::Empty]);
    }

    #[test]
    fn nested_cells_are_rejected() {
        let err = parse_tables(
            r#"{"tables":[{"name":"t","header_names":["a"],"header_defs":["int"],"rows":[[[1]]]}]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConvertError::MalformedCell { .. }));
        assert!(matches!(parse_tables("{"), Err(ConvertError::Json(_))));
    }
}
