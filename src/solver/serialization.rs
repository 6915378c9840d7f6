//! Persistence for solved value tables.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

use crate::value_table::ValueTable;

/// Which engine produced a saved table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    /// Exact minimax values from the solver
    Solved,
    /// Estimates exported from a learner
    Learned,
}

/// Versioned on-disk envelope around a [`ValueTable`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTable {
    pub version: u32,
    pub kind: TableKind,
    pub table: ValueTable,
}

impl SavedTable {
    pub const VERSION: u32 = 1;

    pub fn solved(table: ValueTable) -> Self {
        Self {
            version: Self::VERSION,
            kind: TableKind::Solved,
            table,
        }
    }

    pub fn learned(table: ValueTable) -> Self {
        Self {
            version: Self::VERSION,
            kind: TableKind::Learned,
            table,
        }
    }

    /// Unwrap the table, checking the format version and expected kind
    pub fn into_table(self, expected: TableKind) -> Result<ValueTable> {
        if self.version != Self::VERSION {
            return Err(anyhow!(
                "Unsupported table format version: {}. Expected {}",
                self.version,
                Self::VERSION
            ));
        }
        if self.kind != expected {
            return Err(anyhow!(
                "Expected a {:?} table but found {:?}",
                expected,
                self.kind
            ));
        }
        Ok(self.table)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        rmp_serde::to_vec(self).context("Failed to serialize value table")
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        rmp_serde::from_slice(bytes).context("Failed to deserialize value table")
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref())
            .with_context(|| format!("Failed to create file: {}", path.as_ref().display()))?;
        let mut writer = BufWriter::new(file);

        rmp_serde::encode::write(&mut writer, self).context("Failed to serialize value table")?;

        log::info!(
            "saved {} {:?} states to {}",
            self.table.len(),
            self.kind,
            path.as_ref().display()
        );
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())
            .with_context(|| format!("Failed to open file: {}", path.as_ref().display()))?;
        let reader = BufReader::new(file);

        let saved: Self =
            rmp_serde::decode::from_read(reader).context("Failed to deserialize value table")?;
        log::info!(
            "loaded {} {:?} states from {}",
            saved.table.len(),
            saved.kind,
            path.as_ref().display()
        );
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{solver::Solver, tictactoe::Board};

    #[test]
    fn test_solved_table_roundtrip() -> Result<()> {
        let table = Solver::new().solve();
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("solved.msgpack");

        SavedTable::solved(table.clone()).save_to_file(&path)?;
        let loaded = SavedTable::load_from_file(&path)?.into_table(TableKind::Solved)?;

        assert_eq!(loaded, table);
        assert_eq!(loaded.get(&Board::new())?, 0.0);
        Ok(())
    }

    #[test]
    fn test_repeated_solves_encode_identically() -> Result<()> {
        let first = SavedTable::solved(Solver::new().solve()).to_bytes()?;
        let second = SavedTable::solved(Solver::new().solve()).to_bytes()?;
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    fn test_rejects_wrong_kind_and_version() {
        let saved = SavedTable::learned(ValueTable::new());
        assert!(saved.clone().into_table(TableKind::Solved).is_err());

        let mut future = saved;
        future.version = SavedTable::VERSION + 1;
        assert!(future.into_table(TableKind::Learned).is_err());
    }

    #[test]
    fn test_rejects_corrupted_keys() {
        use std::collections::BTreeMap;

        #[derive(Serialize)]
        struct RawTable {
            values: BTreeMap<String, f64>,
        }

        #[derive(Serialize)]
        struct RawSaved {
            version: u32,
            kind: TableKind,
            table: RawTable,
        }

        let encode = |key: &str| {
            rmp_serde::to_vec(&RawSaved {
                version: SavedTable::VERSION,
                kind: TableKind::Solved,
                table: RawTable {
                    values: BTreeMap::from([(key.to_string(), 1.0)]),
                },
            })
            .unwrap()
        };

        assert!(SavedTable::from_bytes(&encode("ooo xx....")).is_err());
        assert!(SavedTable::from_bytes(&encode("ooq......")).is_err());
        let saved = SavedTable::from_bytes(&encode("oooxx....")).unwrap();
        let table = saved.into_table(TableKind::Solved).unwrap();
        assert_eq!(table.get(&Board::from_string("oooxx....").unwrap()).unwrap(), 1.0);
    }
}
