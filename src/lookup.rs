use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use crate::error::LookupError;
use crate::extract::extract;

/// Numeric id to display name, built from a catalog document such as
/// `perks.json` or `perkstyles.json`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LookupTable {
    names: HashMap<i64, String>,
}

impl LookupTable {
    /// Pairs every `id` in the catalog with the `name` found at the same
    /// position, both in document order. Pairing stops at the shorter list.
    pub fn from_catalog(catalog: &Value) -> Result<Self, LookupError> {
        let ids = extract(catalog, "id");
        let names = extract(catalog, "name");
        if ids.len() != names.len() {
            warn!(
                ids = ids.len(),
                names = names.len(),
                "Catalog has a different number of ids and names; extra entries are ignored"
            );
        }

        let names = ids
            .iter()
            .zip(names)
            .map(|(id, name)| Ok((parse_id(id)?, name_text(name))))
            .collect::<Result<HashMap<_, _>, LookupError>>()?;

        Ok(LookupTable { names })
    }

    pub fn name(&self, id: i64) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(i64, String)> for LookupTable {
    fn from_iter<T: IntoIterator<Item = (i64, String)>>(iter: T) -> Self {
        LookupTable {
            names: iter.into_iter().collect(),
        }
    }
}

fn parse_id(id: &Value) -> Result<i64, LookupError> {
    let parsed = match id {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && (i64::MIN as f64..i64::MAX as f64).contains(f))
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| LookupError::BadId(id.clone()))
}

fn name_text(name: Value) -> String {
    match name {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
