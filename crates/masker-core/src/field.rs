//! Field selection as configured on the command line

use std::fmt;

use crate::category::FieldCategory;

/// How a field is located in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelector {
    /// CSV header name, or a regex in text mode
    Name(String),
    /// 1-based CSV column number
    Index(usize),
}

impl fmt::Display for FieldSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSelector::Name(name) => f.write_str(name),
            FieldSelector::Index(index) => write!(f, "#{}", index),
        }
    }
}

/// A field to mask and the kind of value it holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub selector: FieldSelector,
    pub category: FieldCategory,
    /// Category was given as `category=field` rather than inferred
    pub explicit: bool,
}

impl FieldSpec {
    pub fn new(selector: FieldSelector, category: FieldCategory) -> Self {
        Self {
            selector,
            category,
            explicit: true,
        }
    }

    /// Parse one token of `--fields`.
    ///
    /// `email=contact` pins the category; the prefix only counts when it names
    /// a known category, so regexes containing `=` are left intact. All-digit
    /// tokens select a column by position, unless the CSV header has a column
    /// with exactly that name.
    pub fn parse(token: &str) -> Self {
        let token = token.trim();

        if let Some((prefix, rest)) = token.split_once('=')
            && let Some(category) = FieldCategory::parse(prefix)
            && !rest.is_empty()
        {
            return Self::new(selector_for(rest), category);
        }

        let category = FieldCategory::infer(token);
        Self {
            selector: selector_for(token),
            category,
            explicit: false,
        }
    }

    /// Override an inferred category (e.g. from the config file)
    pub fn with_category(mut self, category: FieldCategory) -> Self {
        self.category = category;
        self.explicit = true;
        self
    }

    /// Name used for category lookups, if the field is selected by name
    pub fn name(&self) -> Option<&str> {
        match &self.selector {
            FieldSelector::Name(name) => Some(name),
            FieldSelector::Index(_) => None,
        }
    }
}

/// Only canonical decimals become indices, so `Index(n)` always prints back
/// as the token it came from and can still match a header with that name
fn selector_for(token: &str) -> FieldSelector {
    match token.parse::<usize>() {
        Ok(index) if index.to_string() == token => FieldSelector::Index(index),
        _ => FieldSelector::Name(token.to_string()),
    }
}

/// Split a comma-separated field list.
///
/// Commas inside `{}`, `[]` or `()` and escaped commas do not split, so
/// patterns like `\d{3,4}` survive.
pub fn split_field_list(list: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut escaped = false;

    for c in list.chars() {
        if escaped {
            current.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' => {
                current.push(c);
                escaped = true;
            }
            '{' | '[' | '(' => {
                depth += 1;
                current.push(c);
            }
            '}' | ']' | ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
        .into_iter()
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_inferred() {
        let spec = FieldSpec::parse("name");
        assert_eq!(spec.selector, FieldSelector::Name("name".to_string()));
        assert_eq!(spec.category, FieldCategory::PersonName);
        assert!(!spec.explicit);
    }

    #[test]
    fn test_parse_explicit_category() {
        let spec = FieldSpec::parse("email=contact");
        assert_eq!(spec.selector, FieldSelector::Name("contact".to_string()));
        assert_eq!(spec.category, FieldCategory::Email);
        assert!(spec.explicit);
    }

    #[test]
    fn test_parse_index() {
        let spec = FieldSpec::parse("phone=3");
        assert_eq!(spec.selector, FieldSelector::Index(3));
        assert_eq!(spec.category, FieldCategory::Phone);

        assert_eq!(FieldSpec::parse("2").selector, FieldSelector::Index(2));
        assert_eq!(
            FieldSpec::parse("007").selector,
            FieldSelector::Name("007".to_string())
        );
        assert_eq!(FieldSpec::parse("+4").selector, FieldSelector::Name("+4".to_string()));
    }

    #[test]
    fn test_equals_in_pattern_is_not_a_category() {
        let spec = FieldSpec::parse(r"id=(\d+)");
        assert_eq!(spec.selector, FieldSelector::Name(r"id=(\d+)".to_string()));
        assert_eq!(spec.category, FieldCategory::Generic);
    }

    #[test]
    fn test_split_field_list() {
        assert_eq!(split_field_list("name, email,,phone"), vec!["name", "email", "phone"]);
        assert_eq!(
            split_field_list(r"phone=(\d{3,4}),email"),
            vec![r"phone=(\d{3,4})", "email"]
        );
        assert_eq!(split_field_list(r"a\,b,c"), vec![r"a\,b", "c"]);
    }
}
