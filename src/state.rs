use std::path::Path;

use crate::color::ColorMap;
use crate::data::model::TransactionTable;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Relative path of the default transactions export, loaded at startup.
pub const DEFAULT_DATA_PATH: &str = "transactions.csv";

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until a file loads cleanly).
    pub table: Option<TransactionTable>,

    /// Colour map over the distinct GROUP_EN labels.
    pub color_map: Option<ColorMap>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            color_map: None,
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a freshly loaded table, replacing any previous dataset.
    pub fn set_table(&mut self, table: TransactionTable) {
        self.color_map = Some(ColorMap::new(&table.group_labels));
        self.table = Some(table);
        self.status_message = None;
        self.loading = false;
    }

    /// Load a transactions export and swap it in. On failure the previous
    /// dataset is dropped: a broken load halts the entire view rather than
    /// rendering stale sections.
    pub fn load_from_path(&mut self, path: &Path) {
        self.loading = true;
        match crate::data::load_table(path) {
            Ok(table) => {
                log::info!("Loaded {} transactions from {}", table.len(), path.display());
                self.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", path.display());
                self.table = None;
                self.color_map = None;
                self.status_message = Some(format!("Error: {e}"));
                self.loading = false;
            }
        }
    }
}
