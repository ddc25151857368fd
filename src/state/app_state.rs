//! Application state definitions

use super::catalog::OptionCatalog;
use super::forms::RegistrationForm;
use super::records::Record;

/// How many records the table shows at most
pub const MAX_TABLE_ROWS: usize = 20;

/// Progress of the one-shot reference data fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    #[default]
    Loading,
    Ready,
    Failed,
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    /// Current form input, error map and focus
    pub form: RegistrationForm,

    /// Reference data; empty until the startup fetch lands
    pub catalog: OptionCatalog,
    pub catalog_status: CatalogStatus,

    /// Submitted records, append-only for the session
    pub records: Vec<Record>,

    /// Transient success/info line for the status bar
    pub status_message: Option<String>,

    /// Blocking notices shown as a modal dialog, oldest first
    notices: Vec<String>,
}

impl AppState {
    /// Queue a blocking user-facing notice
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.notices.push(message.into());
    }

    /// Dismiss the currently shown notice
    pub fn dismiss_error(&mut self) {
        if !self.notices.is_empty() {
            self.notices.remove(0);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.notices.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.notices.first().map(String::as_str)
    }

    /// The City field exists only when the catalog is grouped by country
    pub fn requires_city(&self) -> bool {
        self.catalog.is_grouped()
    }

    /// The slice of records the table displays
    pub fn visible_records(&self) -> &[Record] {
        &self.records[..self.records.len().min(MAX_TABLE_ROWS)]
    }
}
