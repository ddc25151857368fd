//! Configuration handling for the TUI

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

const USERS_URL: &str = "https://jsonplaceholder.typicode.com/users";
const COUNTRIES_URL: &str = "https://countriesnow.space/api/v0.1/countries/positions";
const GEO_URL: &str = "https://countriesnow.space/api/v0.1/countries";

/// Shape of the reference data endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    /// User-like records exposing a nested city field; the catalog is the
    /// deduplicated set of those cities
    Users,
    /// Flat list of country names under a data envelope
    Countries,
    /// Country entries each carrying their list of cities
    #[default]
    Geo,
}

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Which response shape the catalog endpoint serves
    pub catalog_source: Option<CatalogSource>,
    /// Reference data endpoint; defaults per source
    pub catalog_url: Option<String>,
    /// Submission endpoint; unset means records are appended locally verbatim
    pub submit_url: Option<String>,
    /// Where the record list is persisted; defaults to the platform data dir
    pub records_path: Option<PathBuf>,
}

impl AppConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "enroll", "enroll-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: AppConfig = serde_json::from_str(&content)?;
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    pub fn catalog_source(&self) -> CatalogSource {
        self.catalog_source.unwrap_or_default()
    }

    pub fn catalog_url(&self) -> String {
        self.catalog_url.clone().unwrap_or_else(|| {
            match self.catalog_source() {
                CatalogSource::Users => USERS_URL,
                CatalogSource::Countries => COUNTRIES_URL,
                CatalogSource::Geo => GEO_URL,
            }
            .to_string()
        })
    }

    /// Resolved path of the persisted record list
    pub fn records_path(&self) -> Option<PathBuf> {
        self.records_path
            .clone()
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().join("records.json")))
    }
}
