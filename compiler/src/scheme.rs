use tracing::debug;
use crate::{
    error::ConvertError,
    parser::parse_definition,
    types::Scheme,
    verifier::verify_scheme,
};

/// Pairs the header row of field names with the header row of type
/// definitions and parses every column.
///
/// Trailing empty header cells are ignored. Any parse failure is reported
/// with the table and column it came from.
pub fn build_scheme<S: AsRef<str>>(
    table: &str,
    names: &[S],
    defs: &[S],
) -> Result<Scheme, ConvertError> {
    let names = trim_trailing_empty(names);
    let defs = trim_trailing_empty(defs);
    if names.len() != defs.len() {
        return Err(ConvertError::HeaderMismatch {
            table: table.to_string(),
            names: names.len(),
            defs:  defs.len(),
        });
    }

    let fields = names
        .iter()
        .zip(defs)
        .map(|(name, def)| {
            parse_definition(table, name.as_ref(), def.as_ref())
                .map_err(|e| e.in_field(table, name.as_ref()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let scheme = Scheme {
        table: table.to_string(),
        fields,
    };
    verify_scheme(&scheme)?;
    debug!(table, columns = scheme.fields.len(), "built scheme");
    Ok(scheme)
}

fn trim_trailing_empty<S: AsRef<str>>(cells: &[S]) -> &[S] {
    let len = cells
        .iter()
        .rposition(|c| !c.as_ref().is_empty())
        .map_or(0, |i| i + 1);
    &cells[..len]
}
