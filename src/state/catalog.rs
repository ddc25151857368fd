//! Selectable option catalog and the country → city cascade

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One country and the cities selectable under it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryCities {
    pub country: String,
    #[serde(default)]
    pub cities: Vec<String>,
}

/// Reference data loaded once at startup; read-only afterwards
#[derive(Debug, Clone, PartialEq)]
pub enum OptionCatalog {
    /// Flat list of selectable place names
    Flat(Vec<String>),
    /// Countries, each carrying its own city list
    Grouped(Vec<CountryCities>),
}

impl Default for OptionCatalog {
    fn default() -> Self {
        OptionCatalog::Flat(Vec::new())
    }
}

impl OptionCatalog {
    /// Build a flat catalog, deduplicated preserving first-seen order
    pub fn from_place_names<I>(names: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        OptionCatalog::Flat(dedup_preserving_order(names))
    }

    /// Build a grouped catalog; duplicate countries keep the first entry
    pub fn from_country_cities(entries: Vec<CountryCities>) -> Self {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for mut entry in entries {
            if seen.insert(entry.country.clone()) {
                entry.cities = dedup_preserving_order(entry.cities);
                out.push(entry);
            }
        }
        OptionCatalog::Grouped(out)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        match self {
            OptionCatalog::Flat(names) => names.len(),
            OptionCatalog::Grouped(entries) => entries.len(),
        }
    }

    /// Whether the catalog carries per-country city lists (and therefore the
    /// form has a City field)
    pub fn is_grouped(&self) -> bool {
        matches!(self, OptionCatalog::Grouped(_))
    }

    /// Names offered by the country selector
    pub fn countries(&self) -> Vec<&str> {
        match self {
            OptionCatalog::Flat(names) => names.iter().map(String::as_str).collect(),
            OptionCatalog::Grouped(entries) => {
                entries.iter().map(|e| e.country.as_str()).collect()
            }
        }
    }
}

/// City options for the selected country: exactly the catalog's list for it,
/// empty when no country is selected, the catalog is flat, or the country has
/// no entry.
pub fn cities_for<'a>(catalog: &'a OptionCatalog, country: &str) -> &'a [String] {
    match catalog {
        OptionCatalog::Flat(_) => &[],
        OptionCatalog::Grouped(entries) => entries
            .iter()
            .find(|e| e.country == country)
            .map(|e| e.cities.as_slice())
            .unwrap_or(&[]),
    }
}

fn dedup_preserving_order<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
