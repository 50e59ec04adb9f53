use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, Weak};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    Int,
    Long,
    String,
    Float,
    Bool,
}

impl PrimitiveKind {
    pub fn from_keyword(keyword: &str) -> Option<PrimitiveKind> {
        match keyword {
            "int"    => Some(PrimitiveKind::Int),
            "long"   => Some(PrimitiveKind::Long),
            "string" => Some(PrimitiveKind::String),
            "float"  => Some(PrimitiveKind::Float),
            "bool"   => Some(PrimitiveKind::Bool),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            PrimitiveKind::Int    => "int",
            PrimitiveKind::Long   => "long",
            PrimitiveKind::String => "string",
            PrimitiveKind::Float  => "float",
            PrimitiveKind::Bool   => "bool",
        }
    }
}

/// One node of the type AST: a column of a table, a struct subfield, or a
/// collection element.
#[derive(Debug, Serialize)]
pub struct Field {
    pub table: String,
    pub name:  String,
    pub kind:  FieldKind,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Primitive(PrimitiveKind),
    List(Box<Field>),
    Dictionary { key: Box<Field>, value: Box<Field> },
    Struct(Arc<StructDef>),
    Enum(Arc<EnumDef>),
    Reference(ReferenceDef),
}

#[derive(Debug, Serialize)]
pub struct StructDef {
    pub type_name: String,
    pub fields:    Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    pub name:  String,
    pub value: i64,
}

#[derive(Debug, Serialize)]
pub struct EnumDef {
    pub type_name: String,
    pub values:    Vec<EnumValue>,
    #[serde(skip)]
    lookup:        HashMap<String, i64>,
}

impl EnumDef {
    pub fn new(type_name: String, values: Vec<EnumValue>) -> EnumDef {
        let lookup = values.iter().map(|v| (v.name.clone(), v.value)).collect();
        EnumDef { type_name, values, lookup }
    }

    pub fn value_of(&self, name: &str) -> Option<i64> {
        self.lookup.get(name).copied()
    }
}

/// A field whose type is a struct or enum declared in some table's scheme.
/// The target is bound once, after every scheme has been built.
#[derive(Debug, Serialize)]
pub struct ReferenceDef {
    pub target_table: String,
    pub target_type:  String,
    #[serde(skip)]
    resolved:         OnceLock<TypeRef>,
}

impl ReferenceDef {
    pub fn new(target_table: String, target_type: String) -> ReferenceDef {
        ReferenceDef {
            target_table,
            target_type,
            resolved: OnceLock::new(),
        }
    }

    /// Binds the target. Returns false if the reference was already bound.
    pub fn bind(&self, target: TypeRef) -> bool {
        self.resolved.set(target).is_ok()
    }

    pub fn is_bound(&self) -> bool {
        self.resolved.get().is_some()
    }

    /// The bound target, as long as its owning scheme is still alive.
    pub fn target(&self) -> Option<ResolvedType> {
        self.resolved.get().and_then(TypeRef::upgrade)
    }
}

/// Non-owning handle to a struct or enum owned by a scheme.
#[derive(Debug, Clone)]
pub enum TypeRef {
    Struct(Weak<StructDef>),
    Enum(Weak<EnumDef>),
}

impl TypeRef {
    pub fn upgrade(&self) -> Option<ResolvedType> {
        match self {
            TypeRef::Struct(w) => w.upgrade().map(ResolvedType::Struct),
            TypeRef::Enum(w) => w.upgrade().map(ResolvedType::Enum),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ResolvedType {
    Struct(Arc<StructDef>),
    Enum(Arc<EnumDef>),
}

impl Field {
    pub fn new(table: &str, name: &str, kind: FieldKind) -> Field {
        Field {
            table: table.to_string(),
            name: name.to_string(),
            kind,
        }
    }

    /// The synthetic type name of a struct or enum field.
    pub fn type_name(&self) -> Option<&str> {
        match &self.kind {
            FieldKind::Struct(def) => Some(&def.type_name),
            FieldKind::Enum(def) => Some(&def.type_name),
            _ => None,
        }
    }

    /// Calls `visit` on this field and every field nested in it through
    /// lists, dictionaries and structs. References are not followed.
    pub fn walk<'a, F>(&'a self, visit: &mut F)
    where
        F: FnMut(&'a Field),
    {
        visit(self);
        match &self.kind {
            FieldKind::List(element) => element.walk(visit),
            FieldKind::Dictionary { key, value } => {
                key.walk(visit);
                value.walk(visit);
            }
            FieldKind::Struct(def) => {
                for field in &def.fields {
                    field.walk(visit);
                }
            }
            FieldKind::Primitive(_) | FieldKind::Enum(_) | FieldKind::Reference(_) => {}
        }
    }
}

/// The ordered, typed columns of one table.
#[derive(Debug, Serialize)]
pub struct Scheme {
    pub table:  String,
    pub fields: Vec<Field>,
}

impl Scheme {
    fn collect<'a, T, F>(&'a self, mut pick: F) -> Vec<T>
    where
        F: FnMut(&'a Field) -> Option<T>,
    {
        let mut found = Vec::new();
        for field in &self.fields {
            field.walk(&mut |f| found.extend(pick(f)));
        }
        found
    }

    /// Every struct declared anywhere in this scheme, outermost first.
    pub fn structs(&self) -> Vec<&Arc<StructDef>> {
        self.collect(|f| match &f.kind {
            FieldKind::Struct(def) => Some(def),
            _ => None,
        })
    }

    pub fn enums(&self) -> Vec<&Arc<EnumDef>> {
        self.collect(|f| match &f.kind {
            FieldKind::Enum(def) => Some(def),
            _ => None,
        })
    }

    /// Every reference field, with the field that holds it.
    pub fn references(&self) -> Vec<(&Field, &ReferenceDef)> {
        self.collect(|f| match &f.kind {
            FieldKind::Reference(def) => Some((f, def)),
            _ => None,
        })
    }
}

/// A scalar cell as handed over by the spreadsheet reader.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(NaiveDateTime),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(t) => t.is_empty(),
            _ => false,
        }
    }

    /// The literal text a cell contributes before escaping.
    pub fn to_text(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(t) => t.clone(),
            CellValue::Integer(v) => v.to_string(),
            CellValue::Float(v) => v.to_string(),
            CellValue::Bool(v) => v.to_string(),
            CellValue::Date(d) => d.format("%Y-%m-%d %H:%M:%S").to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(text: &str) -> Self {
        CellValue::Text(text.to_string())
    }
}

impl From<String> for CellValue {
    fn from(text: String) -> Self {
        CellValue::Text(text)
    }
}

impl From<i64> for CellValue {
    fn from(v: i64) -> Self {
        CellValue::Integer(v)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

/// One encoded row: a wire string per column, in scheme order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowData {
    pub cells: Vec<String>,
}

impl RowData {
    pub fn to_wire(&self) -> String {
        self.cells.join(",")
    }
}

impl Serialize for RowData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_wire())
    }
}

#[derive(Debug, Serialize)]
pub struct Table {
    pub scheme: Scheme,
    pub rows:   Vec<RowData>,
}

impl Table {
    pub fn name(&self) -> &str {
        &self.scheme.table
    }

    /// The table's data file: one wire row per line.
    pub fn pack(&self) -> String {
        self.rows
            .iter()
            .map(RowData::to_wire)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
