//! Application state and core logic

use crate::config::AppConfig;
use crate::remote::{ClientError, RemoteApi};
use crate::state::{
    cities_for, AppState, CatalogStatus, FieldId, FormFocus, OptionCatalog, Record,
};
use crate::store::RecordStore;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Outcome of the background catalog fetch, delivered to the event loop
pub type CatalogEvent = Result<OptionCatalog, ClientError>;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Client for the configured endpoints
    client: Arc<dyn RemoteApi>,
    /// Persistent record store
    store: RecordStore,
    /// Whether submissions round-trip through the remote endpoint
    remote_submit: bool,
    /// Receives the one-shot catalog fetch result
    catalog_rx: mpsc::UnboundedReceiver<CatalogEvent>,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create the app: load persisted records and kick off the reference
    /// data fetch on a background task. The fetch never blocks the UI.
    #[allow(clippy::field_reassign_with_default)]
    pub fn new(config: &AppConfig, client: Arc<dyn RemoteApi>) -> Self {
        let store = RecordStore::new(config.records_path());
        let mut state = AppState::default();
        state.records = store.load();

        let (tx, catalog_rx) = mpsc::unbounded_channel();
        let fetch_client = Arc::clone(&client);
        tokio::spawn(async move {
            // Receiver may be gone if the app exited; nothing to do then
            let _ = tx.send(fetch_client.fetch_catalog().await);
        });

        Self {
            state,
            client,
            store,
            remote_submit: config.submit_url.is_some(),
            catalog_rx,
            quit: false,
        }
    }

    /// Drain pending catalog results; called once per event-loop tick.
    /// A failed fetch leaves the catalog empty and is logged only.
    pub fn poll_catalog(&mut self) {
        while let Ok(event) = self.catalog_rx.try_recv() {
            self.apply_catalog_event(event);
        }
    }

    fn apply_catalog_event(&mut self, event: CatalogEvent) {
        match event {
            Ok(catalog) => {
                info!("reference data loaded: {} options", catalog.len());
                self.state.catalog = catalog;
                self.state.catalog_status = CatalogStatus::Ready;
            }
            Err(e) => {
                warn!("reference data fetch failed: {e}");
                self.state.catalog_status = CatalogStatus::Failed;
            }
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Blocking notice dialog swallows everything until dismissed
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        self.state.status_message = None;

        let requires_city = self.state.requires_city();
        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Down => self.state.form.next_focus(requires_city),
            KeyCode::BackTab | KeyCode::Up => self.state.form.prev_focus(requires_city),
            KeyCode::Enter => {
                if self.state.form.focus == FormFocus::Submit {
                    self.submit().await?;
                } else {
                    self.state.form.next_focus(requires_city);
                }
            }
            KeyCode::Left => self.cycle_selection(-1),
            KeyCode::Right => self.cycle_selection(1),
            KeyCode::Char(' ')
                if self.state.form.focus == FormFocus::Field(FieldId::Gender) =>
            {
                self.state.form.toggle_gender();
            }
            KeyCode::Char(c) => self.state.form.push_char(c),
            KeyCode::Backspace => self.state.form.pop_char(),
            _ => {}
        }
        Ok(())
    }

    /// Step the focused choice field through its options (wraps around)
    fn cycle_selection(&mut self, step: i32) {
        let FormFocus::Field(field) = self.state.form.focus else {
            return;
        };
        match field {
            FieldId::Gender => self.state.form.toggle_gender(),
            FieldId::Country => {
                let options: Vec<String> = self
                    .state
                    .catalog
                    .countries()
                    .into_iter()
                    .map(str::to_string)
                    .collect();
                if let Some(country) = next_option(&options, &self.state.form.input.country, step)
                {
                    self.state.form.set_country(&country);
                }
            }
            FieldId::City => {
                let options = cities_for(&self.state.catalog, &self.state.form.input.country);
                if let Some(city) = next_option(options, &self.state.form.input.city, step) {
                    self.state.form.set_field(FieldId::City, &city);
                }
            }
            _ => {}
        }
    }

    /// Run the submission pipeline: validate, build the record (locally or
    /// through the remote round-trip), append, persist, reset the form.
    pub async fn submit(&mut self) -> Result<()> {
        let requires_city = self.state.requires_city();
        if !self.state.form.run_validation(requires_city) {
            // The now-visible error map is the only state change
            return Ok(());
        }

        let record = if self.remote_submit {
            match self.client.submit(&self.state.form.input).await {
                Ok(record) => record,
                Err(e) => {
                    // Abort without touching the record list; the form stays
                    // dirty so the user can retry
                    warn!("submission failed: {e}");
                    self.state.push_error(format!("Submission failed: {e}"));
                    return Ok(());
                }
            }
        } else {
            Record::from_input(&self.state.form.input)
        };

        self.state.records.push(record);
        if let Err(e) = self.store.save(&self.state.records) {
            warn!("failed to persist records: {e}");
            self.state.push_error(format!("Could not save records: {e}"));
        }
        self.state.form.clear();
        self.state.status_message = Some("Record added".to_string());
        Ok(())
    }
}

/// The option `step` places after `current` in `options`, wrapping at both
/// ends; the first (or last) option when nothing is selected yet
fn next_option(options: &[String], current: &str, step: i32) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let len = options.len() as i32;
    let next = match options.iter().position(|o| o == current) {
        Some(pos) => (pos as i32 + step).rem_euclid(len),
        None if step >= 0 => 0,
        None => len - 1,
    };
    Some(options[next as usize].clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::MockRemoteApi;
    use crate::state::{CountryCities, FormInput};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir, submit_url: Option<&str>) -> AppConfig {
        AppConfig {
            submit_url: submit_url.map(str::to_string),
            records_path: Some(dir.path().join("records.json")),
            ..Default::default()
        }
    }

    fn mock_with_catalog(catalog: OptionCatalog) -> MockRemoteApi {
        let mut mock = MockRemoteApi::new();
        mock.expect_fetch_catalog()
            .returning(move || Ok(catalog.clone()));
        mock
    }

    fn grouped_catalog() -> OptionCatalog {
        OptionCatalog::from_country_cities(vec![
            CountryCities {
                country: "France".to_string(),
                cities: vec!["Paris".to_string(), "Lyon".to_string()],
            },
            CountryCities {
                country: "Italy".to_string(),
                cities: vec!["Rome".to_string()],
            },
        ])
    }

    fn fill_valid_form(app: &mut App) {
        app.state.form.set_field(FieldId::Name, "Ada");
        app.state.form.set_field(FieldId::Email, "ada@example.com");
        app.state.form.set_field(FieldId::Gender, "Female");
        app.state.form.set_field(FieldId::Country, "Italy");
    }

    async fn settled_app(config: &AppConfig, mock: MockRemoteApi) -> App {
        let mut app = App::new(config, Arc::new(mock));
        // Wait for the spawned fetch task instead of polling
        if let Some(event) = app.catalog_rx.recv().await {
            app.apply_catalog_event(event);
        }
        app
    }

    #[tokio::test]
    async fn test_catalog_lands_through_the_channel() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, None);
        let app = settled_app(&config, mock_with_catalog(grouped_catalog())).await;

        assert_eq!(app.state.catalog_status, CatalogStatus::Ready);
        assert_eq!(app.state.catalog.countries(), vec!["France", "Italy"]);
        assert!(app.state.requires_city());
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_catalog_empty() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, None);
        let mut mock = MockRemoteApi::new();
        mock.expect_fetch_catalog()
            .returning(|| Err(ClientError::Status(reqwest::StatusCode::BAD_GATEWAY)));
        let app = settled_app(&config, mock).await;

        assert_eq!(app.state.catalog_status, CatalogStatus::Failed);
        assert!(app.state.catalog.is_empty());
        assert!(!app.state.has_errors());
    }

    #[tokio::test]
    async fn test_invalid_submit_only_surfaces_errors() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, None);
        let mut app = settled_app(&config, mock_with_catalog(OptionCatalog::default())).await;

        app.state.form.set_field(FieldId::Email, "a@b.com");
        app.state.form.set_field(FieldId::Gender, "Male");
        app.state.form.set_field(FieldId::Country, "France");
        app.submit().await.unwrap();

        let fields: Vec<_> = app.state.form.errors.fields().collect();
        assert_eq!(fields, vec![FieldId::Name]);
        assert!(app.state.records.is_empty());
        assert_eq!(app.state.form.input.email, "a@b.com");
    }

    #[tokio::test]
    async fn test_basic_submit_appends_persists_and_resets() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, None);
        let mut app = settled_app(&config, mock_with_catalog(OptionCatalog::default())).await;

        fill_valid_form(&mut app);
        let submitted = app.state.form.input.clone();
        app.submit().await.unwrap();

        assert_eq!(app.state.records.len(), 1);
        assert_eq!(app.state.records[0], Record::from_input(&submitted));
        assert_eq!(app.state.form.input, FormInput::default());
        assert_eq!(app.state.status_message.as_deref(), Some("Record added"));

        // persisted list equals the in-memory list
        let store = RecordStore::new(config.records_path());
        assert_eq!(store.load(), app.state.records);
    }

    #[tokio::test]
    async fn test_remote_submit_stores_the_server_echo() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, Some("https://example.test/records"));
        let mut mock = mock_with_catalog(OptionCatalog::default());
        mock.expect_submit().returning(|input| {
            Ok(Record {
                id: Some(201),
                input: input.clone(),
            })
        });
        let mut app = settled_app(&config, mock).await;

        fill_valid_form(&mut app);
        app.submit().await.unwrap();

        assert_eq!(app.state.records.len(), 1);
        assert_eq!(app.state.records[0].id, Some(201));
        assert_eq!(app.state.form.input, FormInput::default());
    }

    #[tokio::test]
    async fn test_failed_remote_submit_keeps_form_and_records() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, Some("https://example.test/records"));
        let mut mock = mock_with_catalog(OptionCatalog::default());
        mock.expect_submit()
            .returning(|_| Err(ClientError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE)));
        let mut app = settled_app(&config, mock).await;

        fill_valid_form(&mut app);
        let entered = app.state.form.input.clone();
        app.submit().await.unwrap();

        assert!(app.state.records.is_empty());
        assert_eq!(app.state.form.input, entered);
        assert!(app.state.has_errors());
        assert!(app
            .state
            .current_error()
            .unwrap()
            .starts_with("Submission failed"));
    }

    #[tokio::test]
    async fn test_duplicate_submissions_are_allowed() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, None);
        let mut app = settled_app(&config, mock_with_catalog(OptionCatalog::default())).await;

        fill_valid_form(&mut app);
        app.submit().await.unwrap();
        fill_valid_form(&mut app);
        app.submit().await.unwrap();

        assert_eq!(app.state.records.len(), 2);
        assert_eq!(app.state.records[0], app.state.records[1]);
    }

    #[tokio::test]
    async fn test_cycling_country_clears_city_and_offers_its_list() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, None);
        let mut app = settled_app(&config, mock_with_catalog(grouped_catalog())).await;

        app.state.form.focus = FormFocus::Field(FieldId::Country);
        app.cycle_selection(1);
        assert_eq!(app.state.form.input.country, "France");

        app.state.form.focus = FormFocus::Field(FieldId::City);
        app.cycle_selection(1);
        assert_eq!(app.state.form.input.city, "Paris");

        app.state.form.focus = FormFocus::Field(FieldId::Country);
        app.cycle_selection(1);
        assert_eq!(app.state.form.input.country, "Italy");
        assert_eq!(app.state.form.input.city, "");

        assert_eq!(
            cities_for(&app.state.catalog, &app.state.form.input.country),
            ["Rome".to_string()]
        );
    }

    #[tokio::test]
    async fn test_cycling_with_empty_catalog_is_a_noop() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, None);
        let mut app = settled_app(&config, mock_with_catalog(OptionCatalog::default())).await;

        app.state.form.focus = FormFocus::Field(FieldId::Country);
        app.cycle_selection(1);
        assert_eq!(app.state.form.input.country, "");
    }

    #[test]
    fn test_next_option_wraps_both_ways() {
        let options: Vec<String> = ["a", "b", "c"].map(String::from).to_vec();
        assert_eq!(next_option(&options, "", 1).as_deref(), Some("a"));
        assert_eq!(next_option(&options, "", -1).as_deref(), Some("c"));
        assert_eq!(next_option(&options, "c", 1).as_deref(), Some("a"));
        assert_eq!(next_option(&options, "a", -1).as_deref(), Some("c"));
        assert_eq!(next_option(&options, "a", 1).as_deref(), Some("b"));
        assert_eq!(next_option(&[], "a", 1), None);
    }

    #[tokio::test]
    async fn test_records_survive_restart() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, None);
        let mut app = settled_app(&config, mock_with_catalog(OptionCatalog::default())).await;
        fill_valid_form(&mut app);
        app.submit().await.unwrap();
        let saved = app.state.records.clone();

        let restarted = settled_app(&config, mock_with_catalog(OptionCatalog::default())).await;
        assert_eq!(restarted.state.records, saved);
    }
}
