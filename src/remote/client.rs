//! HTTP client for reference data and record submission

use super::traits::RemoteApi;
use crate::config::{AppConfig, CatalogSource};
use crate::state::{CountryCities, FormInput, OptionCatalog, Record};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors surfaced by the HTTP client
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network failure, or a body that did not parse as the expected JSON
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(reqwest::StatusCode),
    #[error("no submission endpoint configured")]
    SubmitNotConfigured,
}

/// User-like record exposing a nested city field
#[derive(Debug, Deserialize)]
struct UserEntry {
    address: UserAddress,
}

#[derive(Debug, Deserialize)]
struct UserAddress {
    city: String,
}

/// `{ "data": [ ... ] }` envelope used by the geography endpoints
#[derive(Debug, Deserialize)]
struct DataEnvelope<T> {
    data: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct CountryName {
    #[serde(alias = "name")]
    country: String,
}

fn users_catalog(users: Vec<UserEntry>) -> OptionCatalog {
    OptionCatalog::from_place_names(users.into_iter().map(|u| u.address.city))
}

fn countries_catalog(envelope: DataEnvelope<CountryName>) -> OptionCatalog {
    OptionCatalog::from_place_names(envelope.data.into_iter().map(|c| c.country))
}

fn geo_catalog(envelope: DataEnvelope<CountryCities>) -> OptionCatalog {
    OptionCatalog::from_country_cities(envelope.data)
}

/// Client for the configured reference data and submission endpoints
pub struct HttpClient {
    http: Client,
    source: CatalogSource,
    catalog_url: String,
    submit_url: Option<String>,
}

impl HttpClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: Client::builder()
                .user_agent(concat!("enroll-tui/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            source: config.catalog_source(),
            catalog_url: config.catalog_url(),
            submit_url: config.submit_url.clone(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        debug!("fetching {url}");
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl RemoteApi for HttpClient {
    async fn fetch_catalog(&self) -> Result<OptionCatalog, ClientError> {
        match self.source {
            CatalogSource::Users => Ok(users_catalog(self.get_json(&self.catalog_url).await?)),
            CatalogSource::Countries => {
                Ok(countries_catalog(self.get_json(&self.catalog_url).await?))
            }
            CatalogSource::Geo => Ok(geo_catalog(self.get_json(&self.catalog_url).await?)),
        }
    }

    async fn submit(&self, input: &FormInput) -> Result<Record, ClientError> {
        let url = self
            .submit_url
            .as_deref()
            .ok_or(ClientError::SubmitNotConfigured)?;
        debug!("posting record to {url}");
        let response = self.http.post(url).json(input).send().await?;
        if !response.status().is_success() {
            return Err(ClientError::Status(response.status()));
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_users_shape_derives_deduplicated_cities() {
        let json = r#"[
            {"id": 1, "name": "Leanne", "address": {"city": "Gwenborough", "zipcode": "92998"}},
            {"id": 2, "name": "Ervin", "address": {"city": "Wisokyburgh"}},
            {"id": 3, "name": "Clementine", "address": {"city": "Gwenborough"}}
        ]"#;
        let users: Vec<UserEntry> = serde_json::from_str(json).unwrap();
        let catalog = users_catalog(users);
        assert_eq!(catalog.countries(), vec!["Gwenborough", "Wisokyburgh"]);
        assert!(!catalog.is_grouped());
    }

    #[test]
    fn test_countries_shape_accepts_country_or_name_keys() {
        let json = r#"{"error": false, "data": [
            {"country": "France", "iso2": "FR"},
            {"name": "Italy"},
            {"country": "France"}
        ]}"#;
        let envelope: DataEnvelope<CountryName> = serde_json::from_str(json).unwrap();
        let catalog = countries_catalog(envelope);
        assert_eq!(catalog.countries(), vec!["France", "Italy"]);
    }

    #[test]
    fn test_geo_shape_builds_grouped_catalog() {
        let json = r#"{"error": false, "msg": "ok", "data": [
            {"country": "France", "cities": ["Paris", "Lyon"]},
            {"country": "Italy", "cities": ["Rome"]}
        ]}"#;
        let envelope: DataEnvelope<CountryCities> = serde_json::from_str(json).unwrap();
        let catalog = geo_catalog(envelope);
        assert!(catalog.is_grouped());
        assert_eq!(catalog.countries(), vec!["France", "Italy"]);
        assert_eq!(
            crate::state::cities_for(&catalog, "France"),
            ["Paris".to_string(), "Lyon".to_string()]
        );
    }

    #[test]
    fn test_geo_entry_without_cities_parses() {
        let json = r#"{"data": [{"country": "Andorra"}]}"#;
        let envelope: DataEnvelope<CountryCities> = serde_json::from_str(json).unwrap();
        let catalog = geo_catalog(envelope);
        assert_eq!(catalog.countries(), vec!["Andorra"]);
    }

    #[tokio::test]
    async fn test_submit_without_endpoint_is_an_error() {
        let client = HttpClient::new(&AppConfig::default());
        let result = client.submit(&FormInput::default()).await;
        assert!(matches!(result, Err(ClientError::SubmitNotConfigured)));
    }
}
