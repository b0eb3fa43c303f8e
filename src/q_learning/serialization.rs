//! Persistence for the Q-table.
//!
//! The on-disk format is a two-level JSON object mapping each observed
//! 9-character board string to an object keyed by action index ("0".."8"):
//!
//! ```json
//! { "X   O    ": { "4": 0.45, "8": -0.2 } }
//! ```
//!
//! This matches the format produced by earlier trainers, so existing
//! `q_table.json` files load unchanged.

use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use crate::{
    error::{Error, Result},
    q_learning::q_table::QTable,
};

impl QTable {
    /// Load a Q-table from a JSON file.
    ///
    /// A missing file is not an error: it yields an empty table and the
    /// caller proceeds in degraded (random-play) mode until trained.
    ///
    /// # Errors
    ///
    /// Returns `Error::CorruptTable` when the file exists but its structure
    /// is malformed (invalid JSON, or an action key that is not an integer
    /// in 0..=8). A partially-parsed table is never returned.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(QTable::new());
        }

        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open Q-table file '{}'", path.display()),
            source,
        })?;
        let reader = BufReader::new(file);

        let nested: BTreeMap<String, BTreeMap<String, f64>> =
            serde_json::from_reader(reader).map_err(|err| Error::CorruptTable {
                path: path.display().to_string(),
                message: err.to_string(),
            })?;

        let mut table = QTable::new();
        for (state_key, actions) in nested {
            let state = crate::tictactoe::BoardState::from_string(&state_key).map_err(|err| {
                Error::CorruptTable {
                    path: path.display().to_string(),
                    message: format!("bad state key '{state_key}': {err}"),
                }
            })?;
            for (action_key, value) in actions {
                let action: usize =
                    action_key
                        .parse()
                        .ok()
                        .filter(|&a| a < 9)
                        .ok_or_else(|| Error::CorruptTable {
                            path: path.display().to_string(),
                            message: format!("bad action key '{action_key}' for state '{state_key}'"),
                        })?;
                table.set(&state, action, value);
            }
        }

        Ok(table)
    }

    /// Save the full Q-table to a JSON file.
    ///
    /// The destination is rewritten whole on every save. The data is first
    /// written to a sibling temporary file and then renamed into place, so
    /// a crash mid-save never leaves a truncated table visible.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        // BTreeMap keeps the output deterministic across runs.
        let mut nested: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
        for ((state_key, action), &value) in self.iter() {
            nested
                .entry(state_key.clone())
                .or_default()
                .insert(action.to_string(), value);
        }

        let tmp_path = path.with_extension("json.tmp");
        {
            let file = File::create(&tmp_path).map_err(|source| Error::Io {
                operation: format!("create temporary file '{}'", tmp_path.display()),
                source,
            })?;
            let mut writer = BufWriter::new(file);
            serde_json::to_writer(&mut writer, &nested)?;
            writer.flush().map_err(|source| Error::Io {
                operation: format!("flush temporary file '{}'", tmp_path.display()),
                source,
            })?;
        }

        std::fs::rename(&tmp_path, path).map_err(|source| Error::Io {
            operation: format!("rename '{}' to '{}'", tmp_path.display(), path.display()),
            source,
        })?;

        Ok(())
    }
}
