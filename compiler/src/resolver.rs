use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use crate::types::{Scheme, TypeRef};

/// Every struct and enum of a set of schemes, keyed by
/// `(owning table, synthetic type name)`.
///
/// Built once from the complete scheme set, then used to bind references.
/// A reference that finds no entry stays unbound; that only becomes an
/// error when a cell of it is encoded.
#[derive(Debug, Default)]
pub struct ReferenceIndex {
    types: HashMap<(String, String), TypeRef>,
}

/// Outcome of binding the references of a scheme set.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub bound:   usize,
    pub unbound: Vec<(String, String, String, String)>,
}

impl ReferenceIndex {
    pub fn build<'a, I>(schemes: I) -> ReferenceIndex
    where
        I: IntoIterator<Item = &'a Scheme>,
    {
        let mut types = HashMap::new();
        for scheme in schemes {
            let structs = scheme
                .structs()
                .into_iter()
                .map(|s| (s.type_name.clone(), TypeRef::Struct(Arc::downgrade(s))));
            let enums = scheme
                .enums()
                .into_iter()
                .map(|e| (e.type_name.clone(), TypeRef::Enum(Arc::downgrade(e))));

            for (type_name, handle) in structs.chain(enums) {
                let key = (scheme.table.clone(), type_name);
                if types.insert(key.clone(), handle).is_some() {
                    warn!(table = %key.0, type_name = %key.1, "type declared twice, the later one wins");
                }
            }
        }
        ReferenceIndex { types }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn get(&self, table: &str, type_name: &str) -> Option<&TypeRef> {
        self.types.get(&(table.to_string(), type_name.to_string()))
    }

    /// Binds every reference of every scheme that has a matching entry.
    pub fn resolve<'a, I>(&self, schemes: I) -> Resolution
    where
        I: IntoIterator<Item = &'a Scheme>,
    {
        let mut resolution = Resolution::default();
        for scheme in schemes {
            for (field, reference) in scheme.references() {
                match self.get(&reference.target_table, &reference.target_type) {
                    Some(target) => {
                        if reference.bind(target.clone()) {
                            debug!(
                                table = %field.table,
                                field = %field.name,
                                target_table = %reference.target_table,
                                target_type = %reference.target_type,
                                "bound reference"
                            );
                        }
                        resolution.bound += 1;
                    }
                    None => {
                        warn!(
                            table = %field.table,
                            field = %field.name,
                            target_table = %reference.target_table,
                            target_type = %reference.target_type,
                            "reference target not found"
                        );
                        resolution.unbound.push((
                            field.table.clone(),
                            field.name.clone(),
                            reference.target_table.clone(),
                            reference.target_type.clone(),
                        ));
                    }
                }
            }
        }
        resolution
    }
}

/// Indexes the whole scheme set, then binds its references. The index is
/// complete before the first reference is looked up.
pub fn resolve_references(schemes: &[&Scheme]) -> (ReferenceIndex, Resolution) {
    let index = ReferenceIndex::build(schemes.iter().copied());
    let resolution = index.resolve(schemes.iter().copied());
    (index, resolution)
}
