use std::collections::HashSet;
use crate::{
    types::{EnumValue, Field, Scheme},
    utils::quote,
    error::ConvertError,
};

fn duplicate(kind: &'static str, owner: String, name: &str) -> ConvertError {
    ConvertError::DuplicateName {
        kind,
        owner,
        name: quote(name),
    }
}

/// Subfield names must be unique within one struct.
pub fn verify_struct(table: &str, type_name: &str, fields: &[Field]) -> Result<(), ConvertError> {
    let mut seen = HashSet::new();
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            return Err(duplicate("field", format!("struct {}.{}", table, type_name), &field.name));
        }
    }
    Ok(())
}

/// Member names and member values must both be unique within one enum.
pub fn verify_enum(table: &str, type_name: &str, values: &[EnumValue]) -> Result<(), ConvertError> {
    let mut names = HashSet::new();
    let mut numbers = HashSet::new();
    for value in values {
        let owner = || format!("enum {}.{}", table, type_name);
        if !names.insert(value.name.as_str()) {
            return Err(duplicate("member", owner(), &value.name));
        }
        if !numbers.insert(value.value) {
            return Err(duplicate("value", owner(), &value.value.to_string()));
        }
    }
    Ok(())
}

/// Column names must be unique within one table.
pub fn verify_scheme(scheme: &Scheme) -> Result<(), ConvertError> {
    let mut seen = HashSet::new();
    for field in &scheme.fields {
        if !seen.insert(field.name.as_str()) {
            return Err(duplicate("column", format!("table {}", scheme.table), &field.name));
        }
    }
    Ok(())
}
