use std::io::Write;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::flatten::flatten;
use crate::lookup::LookupTable;
use crate::models::match_row::MatchRow;

/// Ordered collection of flattened rows, one per (match, player).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MatchTable {
    rows: Vec<MatchRow>,
}

impl MatchTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flattens `record` for `puuid` and appends the row. Records that cannot
    /// be flattened are skipped; returns whether a row was added.
    pub fn push_match(&mut self, record: &Value, puuid: &str) -> bool {
        match flatten(record, puuid) {
            Ok(row) => {
                debug!(match_id = %row.match_id, puuid, "Flattened match");
                self.rows.push(row);
                true
            }
            Err(e) => {
                let match_id = record["metadata"]["matchId"].as_str().unwrap_or("?");
                warn!(match_id, puuid, error = %e, "Skipping match that could not be flattened");
                false
            }
        }
    }

    pub fn push_row(&mut self, row: MatchRow) {
        self.rows.push(row);
    }

    /// Appends all rows of `other` after the rows already held.
    pub fn concat(&mut self, other: MatchTable) {
        self.rows.extend(other.rows);
    }

    /// Replaces perk ids with names where the catalogs know them.
    pub fn rename_perks(&mut self, perks: &LookupTable, styles: &LookupTable) {
        for row in &mut self.rows {
            row.rename_perks(perks, styles);
        }
    }

    pub fn rows(&self) -> &[MatchRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Writes a header line followed by one CSV record per row.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        let mut out = csv::Writer::from_writer(writer);
        for row in &self.rows {
            out.serialize(row)?;
        }
        out.flush()?;
        Ok(())
    }
}
