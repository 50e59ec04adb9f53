//! Cell and row encoding into the text wire format.
//!
//! A cell is escaped once, up front; after that every bare `,` in it is a
//! group separator. Lists and dictionaries are written as a count followed
//! by their elements, structs as a fixed run of subfield slots, enums as
//! their integer value.

use easy_converter_wire::{escape, DataBufferMut};
use crate::{
    error::ConvertError,
    types::{
        CellValue, EnumDef, Field, FieldKind, ReferenceDef, ResolvedType, RowData, Scheme, StructDef,
    },
};

/// Escapes `raw` and encodes it as a value of `field`.
pub fn encode(raw: &str, field: &Field) -> Result<String, ConvertError> {
    let mut out = DataBufferMut::new();
    encode_into(field, &escape(raw), &mut out)?;
    Ok(out.into_string())
}

pub fn encode_cell(field: &Field, cell: &CellValue) -> Result<String, ConvertError> {
    encode(&cell.to_text(), field)
}

/// Encodes one data row. Missing trailing cells count as empty and cells
/// past the last column are ignored.
pub fn encode_row(scheme: &Scheme, cells: &[CellValue]) -> Result<RowData, ConvertError> {
    let cells = scheme
        .fields
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let cell = cells.get(i).unwrap_or(&CellValue::Empty);
            encode_cell(field, cell).map_err(|e| e.in_field(&field.table, &field.name))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(RowData { cells })
}

/// Encodes already escaped text.
pub fn encode_into(field: &Field, raw: &str, out: &mut DataBufferMut) -> Result<(), ConvertError> {
    match &field.kind {
        FieldKind::Primitive(_) => {
            out.write_raw(raw);
            Ok(())
        }
        FieldKind::List(element) => {
            if raw.is_empty() {
                out.write_count(0);
                return Ok(());
            }
            let parts: Vec<&str> = raw.split(',').collect();
            let groups: Vec<&[&str]> = parts.chunks(width(element)?).collect();
            out.write_count(groups.len());
            for group in groups {
                encode_into(element, &group.join(","), out)?;
            }
            Ok(())
        }
        FieldKind::Dictionary { key, value } => {
            if raw.is_empty() {
                out.write_count(0);
                return Ok(());
            }
            let key_width = width(key)?;
            let parts: Vec<&str> = raw.split(',').collect();
            let entries: Vec<&[&str]> = parts.chunks(key_width + width(value)?).collect();
            out.write_count(entries.len());
            for entry in entries {
                let (k, v) = entry.split_at(key_width.min(entry.len()));
                encode_into(key, &k.join(","), out)?;
                encode_into(value, &v.join(","), out)?;
            }
            Ok(())
        }
        FieldKind::Struct(def) => encode_struct(field, def, raw, out),
        FieldKind::Enum(def) => encode_enum(field, def, raw, out),
        FieldKind::Reference(reference) => match reference.target() {
            Some(ResolvedType::Struct(def)) => encode_struct(field, &def, raw, out),
            Some(ResolvedType::Enum(def)) => encode_enum(field, &def, raw, out),
            None => Err(unresolved(field, reference)),
        },
    }
}

/// Splits `raw` into one group per subfield, `width` slots each. Groups the
/// cell does not supply are encoded as empty.
fn encode_struct(
    field: &Field,
    def: &StructDef,
    raw: &str,
    out: &mut DataBufferMut,
) -> Result<(), ConvertError> {
    let widths = def.fields.iter().map(width).collect::<Result<Vec<_>, _>>()?;
    let total: usize = widths.iter().sum();
    let parts: Vec<&str> = raw.split(',').collect();
    if parts.len() > total {
        return Err(ConvertError::MalformedCell {
            table: field.table.clone(),
            field: field.name.clone(),
            raw:   raw.to_string(),
            msg:   format!(
                "{} has {} slots but the cell has {} values",
                def.type_name,
                total,
                parts.len()
            ),
        });
    }

    let mut pos = 0;
    for (sub, w) in def.fields.iter().zip(widths) {
        let end = (pos + w).min(parts.len());
        let group = parts.get(pos..end).unwrap_or(&[]).join(",");
        encode_into(sub, &group, out)?;
        pos += w;
    }
    Ok(())
}

fn encode_enum(
    field: &Field,
    def: &EnumDef,
    raw: &str,
    out: &mut DataBufferMut,
) -> Result<(), ConvertError> {
    if raw.is_empty() {
        out.write_raw("");
        return Ok(());
    }
    match def.value_of(raw) {
        Some(value) => {
            out.write_int(value);
            Ok(())
        }
        None => Err(ConvertError::UnknownEnumKey {
            table: field.table.clone(),
            field: field.name.clone(),
            key:   raw.to_string(),
        }),
    }
}

/// Number of raw comma separated values one value of `field` takes up when
/// it is an element of a list, a dictionary entry, or a struct subfield.
/// Lists and dictionaries nested this way take a single value.
pub fn width(field: &Field) -> Result<usize, ConvertError> {
    width_in(field, &mut Vec::new())
}

/// `open` holds the structs whose width is being summed, outermost first.
fn width_in(field: &Field, open: &mut Vec<*const StructDef>) -> Result<usize, ConvertError> {
    match &field.kind {
        FieldKind::Struct(def) => struct_width(field, def, open),
        FieldKind::Reference(reference) => match reference.target() {
            Some(ResolvedType::Struct(def)) => struct_width(field, &def, open),
            Some(ResolvedType::Enum(_)) => Ok(1),
            None => Err(unresolved(field, reference)),
        },
        FieldKind::Primitive(_)
        | FieldKind::List(_)
        | FieldKind::Dictionary { .. }
        | FieldKind::Enum(_) => Ok(1),
    }
}

/// A struct reached again through a reference while its own width is being
/// summed would take infinitely many slots.
fn struct_width(
    field: &Field,
    def: &StructDef,
    open: &mut Vec<*const StructDef>,
) -> Result<usize, ConvertError> {
    let key: *const StructDef = def;
    if open.contains(&key) {
        return Err(ConvertError::RecursiveStruct {
            table:     field.table.clone(),
            field:     field.name.clone(),
            type_name: def.type_name.clone(),
        });
    }
    open.push(key);
    let total = def
        .fields
        .iter()
        .map(|sub| width_in(sub, open))
        .sum::<Result<usize, _>>();
    open.pop();
    total
}

pub(crate) fn unresolved(field: &Field, reference: &ReferenceDef) -> ConvertError {
    ConvertError::UnresolvedReference {
        table:        field.table.clone(),
        field:        field.name.clone(),
        target_table: reference.target_table.clone(),
        target_type:  reference.target_type.clone(),
    }
}
