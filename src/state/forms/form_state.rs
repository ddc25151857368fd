//! Form state management

use super::field::{FieldId, Gender};
use crate::state::validate::{validate, ValidationErrors};
use serde::{Deserialize, Serialize};

/// The values a user has entered, exactly as they will be submitted
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub country: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub city: String,
}

/// Focusable elements of the registration form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Field(FieldId),
    Submit,
}

impl Default for FormFocus {
    fn default() -> Self {
        FormFocus::Field(FieldId::Name)
    }
}

/// Current form input plus the error map from the last validation pass
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub input: FormInput,
    pub errors: ValidationErrors,
    pub focus: FormFocus,
}

const FOCUS_ORDER_WITH_CITY: &[FormFocus] = &[
    FormFocus::Field(FieldId::Name),
    FormFocus::Field(FieldId::Email),
    FormFocus::Field(FieldId::Gender),
    FormFocus::Field(FieldId::Country),
    FormFocus::Field(FieldId::City),
    FormFocus::Submit,
];

const FOCUS_ORDER_WITHOUT_CITY: &[FormFocus] = &[
    FormFocus::Field(FieldId::Name),
    FormFocus::Field(FieldId::Email),
    FormFocus::Field(FieldId::Gender),
    FormFocus::Field(FieldId::Country),
    FormFocus::Submit,
];

impl RegistrationForm {
    fn focus_order(has_city: bool) -> &'static [FormFocus] {
        if has_city {
            FOCUS_ORDER_WITH_CITY
        } else {
            FOCUS_ORDER_WITHOUT_CITY
        }
    }

    /// Move focus to the next element (wraps around)
    pub fn next_focus(&mut self, has_city: bool) {
        let order = Self::focus_order(has_city);
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = order[(pos + 1) % order.len()];
    }

    /// Move focus to the previous element (wraps around)
    pub fn prev_focus(&mut self, has_city: bool) {
        let order = Self::focus_order(has_city);
        let pos = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = if pos == 0 {
            order[order.len() - 1]
        } else {
            order[pos - 1]
        };
    }

    /// Set exactly one field, leaving all others untouched. Never runs
    /// validation; repeating the same value is a no-op.
    pub fn set_field(&mut self, field: FieldId, value: &str) {
        match field {
            FieldId::Name => self.input.name = value.to_string(),
            FieldId::Email => self.input.email = value.to_string(),
            FieldId::Gender => self.input.gender = Gender::parse(value),
            FieldId::Country => self.set_country(value),
            FieldId::City => self.input.city = value.to_string(),
        }
    }

    /// Selecting a different country clears the dependent city
    pub fn set_country(&mut self, country: &str) {
        if self.input.country != country {
            self.input.country = country.to_string();
            self.input.city.clear();
        }
    }

    pub fn toggle_gender(&mut self) {
        self.input.gender = Some(match self.input.gender {
            Some(g) => g.toggled(),
            None => Gender::Male,
        });
    }

    /// Append a character to the focused text field
    pub fn push_char(&mut self, c: char) {
        match self.focus {
            FormFocus::Field(FieldId::Name) => self.input.name.push(c),
            FormFocus::Field(FieldId::Email) => self.input.email.push(c),
            _ => {}
        }
    }

    /// Remove the last character from the focused text field
    pub fn pop_char(&mut self) {
        match self.focus {
            FormFocus::Field(FieldId::Name) => {
                self.input.name.pop();
            }
            FormFocus::Field(FieldId::Email) => {
                self.input.email.pop();
            }
            _ => {}
        }
    }

    /// Recompute the full error map from the current input.
    /// Returns true when the input is submittable.
    pub fn run_validation(&mut self, requires_city: bool) -> bool {
        self.errors = validate(&self.input, requires_city);
        self.errors.is_empty()
    }

    /// Reset to empty defaults after a successful submission
    pub fn clear(&mut self) {
        self.input = FormInput::default();
        self.errors = ValidationErrors::default();
        self.focus = FormFocus::default();
    }
}
