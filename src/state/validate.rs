//! Pure field validation

use super::forms::{FieldId, FormInput};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Field-keyed error map from the last validation pass. Recomputed wholesale
/// on every call; a field absent from the map is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<FieldId, &'static str>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FieldId) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.0.keys().copied()
    }

    fn insert(&mut self, field: FieldId, message: &'static str) {
        self.0.insert(field, message);
    }
}

/// Loose address shape, not RFC validation: non-whitespace, "@",
/// non-whitespace, ".", non-whitespace, anywhere in the value.
fn email_shape() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email pattern"))
}

/// Recompute the full error set for the given input. Every rule is evaluated
/// on every call, so multiple simultaneous errors are possible and stale
/// errors never survive a pass.
pub fn validate(input: &FormInput, requires_city: bool) -> ValidationErrors {
    let mut errors = ValidationErrors::default();

    if input.name.trim().is_empty() {
        errors.insert(FieldId::Name, "Name is required");
    }

    if input.email.trim().is_empty() {
        errors.insert(FieldId::Email, "Email is required");
    } else if !email_shape().is_match(&input.email) {
        errors.insert(FieldId::Email, "Invalid email format");
    }

    if input.gender.is_none() {
        errors.insert(FieldId::Gender, "Select gender");
    }

    if input.country.is_empty() {
        errors.insert(FieldId::Country, "Select country");
    }

    if requires_city && input.city.is_empty() {
        errors.insert(FieldId::City, "Select city");
    }

    errors
}
