//! Form field value objects

use serde::{Deserialize, Serialize};

/// Exclusive two-way gender choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Gender::Male => Gender::Female,
            Gender::Female => Gender::Male,
        }
    }

    /// Parse the serialized choice; anything else means "not selected"
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Identifies one field of the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FieldId {
    Name,
    Email,
    Gender,
    Country,
    City,
}

impl FieldId {
    pub fn label(&self) -> &'static str {
        match self {
            FieldId::Name => "Full Name",
            FieldId::Email => "Email Address",
            FieldId::Gender => "Gender",
            FieldId::Country => "Country",
            FieldId::City => "City",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_toggles_between_the_two_choices() {
        assert_eq!(Gender::Male.toggled(), Gender::Female);
        assert_eq!(Gender::Female.toggled(), Gender::Male);
    }

    #[test]
    fn test_gender_parse_accepts_exact_labels_only() {
        assert_eq!(Gender::parse("Male"), Some(Gender::Male));
        assert_eq!(Gender::parse("Female"), Some(Gender::Female));
        assert_eq!(Gender::parse("male"), None);
        assert_eq!(Gender::parse(""), None);
    }

    #[test]
    fn test_gender_serializes_as_plain_string() {
        assert_eq!(serde_json::to_string(&Gender::Male).unwrap(), "\"Male\"");
        let parsed: Gender = serde_json::from_str("\"Female\"").unwrap();
        assert_eq!(parsed, Gender::Female);
    }
}
