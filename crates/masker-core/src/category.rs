//! Semantic categories of maskable values

use serde::{Deserialize, Serialize};
use std::fmt;

/// What kind of value a masked field holds.
///
/// `Generic` is the fallback for anything that cannot be classified more
/// precisely; it produces a random alphanumeric token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum FieldCategory {
    PersonName,
    FirstName,
    LastName,
    Address,
    City,
    PostalCode,
    Phone,
    Email,
    Company,
    Generic,
}

impl FieldCategory {
    pub const ALL: [FieldCategory; 10] = [
        FieldCategory::PersonName,
        FieldCategory::FirstName,
        FieldCategory::LastName,
        FieldCategory::Address,
        FieldCategory::City,
        FieldCategory::PostalCode,
        FieldCategory::Phone,
        FieldCategory::Email,
        FieldCategory::Company,
        FieldCategory::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldCategory::PersonName => "person_name",
            FieldCategory::FirstName => "first_name",
            FieldCategory::LastName => "last_name",
            FieldCategory::Address => "address",
            FieldCategory::City => "city",
            FieldCategory::PostalCode => "postal_code",
            FieldCategory::Phone => "phone",
            FieldCategory::Email => "email",
            FieldCategory::Company => "company",
            FieldCategory::Generic => "generic",
        }
    }

    /// Strict parse of a category name. Accepts a few common aliases.
    pub fn parse(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        let category = match normalized.as_str() {
            "person_name" | "name" | "full_name" => FieldCategory::PersonName,
            "first_name" | "firstname" | "given_name" => FieldCategory::FirstName,
            "last_name" | "lastname" | "surname" | "family_name" => FieldCategory::LastName,
            "address" | "street_address" => FieldCategory::Address,
            "city" => FieldCategory::City,
            "postal_code" | "postcode" | "zip" | "zip_code" => FieldCategory::PostalCode,
            "phone" | "phone_number" | "telephone" => FieldCategory::Phone,
            "email" | "email_address" => FieldCategory::Email,
            "company" | "company_name" => FieldCategory::Company,
            "generic" | "string" | "token" => FieldCategory::Generic,
            _ => return None,
        };
        Some(category)
    }

    /// Guess the category from a column name or pattern text.
    ///
    /// Never fails: anything unrecognized is `Generic`.
    pub fn infer(identifier: &str) -> Self {
        let id = identifier.to_ascii_lowercase();
        let has = |needle: &str| id.contains(needle);

        if has("email") || has("e-mail") {
            FieldCategory::Email
        } else if has("phone") || has("mobile") || has("cell") {
            FieldCategory::Phone
        } else if has("company") || has("employer") {
            FieldCategory::Company
        } else if (has("first") && has("name")) || has("given") {
            FieldCategory::FirstName
        } else if ((has("last") || has("family")) && has("name")) || has("surname") {
            FieldCategory::LastName
        } else if has("name") {
            FieldCategory::PersonName
        } else if has("city") || has("town") {
            FieldCategory::City
        } else if has("zip") || has("postal") || has("postcode") {
            FieldCategory::PostalCode
        } else if has("address") || has("street") {
            FieldCategory::Address
        } else {
            FieldCategory::Generic
        }
    }
}

impl TryFrom<String> for FieldCategory {
    type Error = String;

    fn try_from(name: String) -> std::result::Result<Self, Self::Error> {
        FieldCategory::parse(&name).ok_or_else(|| format!("unknown field category '{}'", name))
    }
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_canonical_names() {
        for category in FieldCategory::ALL {
            assert_eq!(FieldCategory::parse(category.as_str()), Some(category));
        }
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!(FieldCategory::parse("Name"), Some(FieldCategory::PersonName));
        assert_eq!(FieldCategory::parse("phone-number"), Some(FieldCategory::Phone));
        assert_eq!(FieldCategory::parse("zip"), Some(FieldCategory::PostalCode));
        assert_eq!(FieldCategory::parse("customer"), None);
    }

    #[test]
    fn test_infer_from_column_names() {
        assert_eq!(FieldCategory::infer("name"), FieldCategory::PersonName);
        assert_eq!(FieldCategory::infer("Customer Name"), FieldCategory::PersonName);
        assert_eq!(FieldCategory::infer("first_name"), FieldCategory::FirstName);
        assert_eq!(FieldCategory::infer("LastName"), FieldCategory::LastName);
        assert_eq!(FieldCategory::infer("home_address"), FieldCategory::Address);
        assert_eq!(FieldCategory::infer("phone"), FieldCategory::Phone);
        assert_eq!(FieldCategory::infer("work_email"), FieldCategory::Email);
        assert_eq!(FieldCategory::infer("zip"), FieldCategory::PostalCode);
        assert_eq!(FieldCategory::infer("ssn"), FieldCategory::Generic);
    }

    #[test]
    fn test_infer_prefers_email_over_name() {
        assert_eq!(FieldCategory::infer("email_username"), FieldCategory::Email);
    }
}
