//! Decide which values of a record get replaced

use regex::Regex;

use crate::category::FieldCategory;
use crate::error::{Error, Result};
use crate::field::{FieldSelector, FieldSpec};

const UTF8_BOM: char = '\u{feff}';

/// A column scheduled for replacement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTarget {
    /// 0-based position in the row
    pub index: usize,
    pub category: FieldCategory,
}

/// A compiled text pattern and the category of each capture group
#[derive(Debug, Clone)]
pub struct TextRule {
    pub regex: Regex,
    /// `(group index, category)`, ordered by group index
    pub groups: Vec<(usize, FieldCategory)>,
}

/// What to mask in every record of one input
#[derive(Debug, Clone)]
pub enum MaskPlan {
    Columns {
        /// Expected field count of every row
        width: usize,
        targets: Vec<ColumnTarget>,
    },
    Patterns(Vec<TextRule>),
}

impl MaskPlan {
    pub fn is_masked(&self, column: usize) -> bool {
        match self {
            MaskPlan::Columns { targets, .. } => targets.iter().any(|t| t.index == column),
            MaskPlan::Patterns(_) => false,
        }
    }

    pub fn target_count(&self) -> usize {
        match self {
            MaskPlan::Columns { targets, .. } => targets.len(),
            MaskPlan::Patterns(rules) => rules.iter().map(|r| r.groups.len()).sum(),
        }
    }
}

pub struct Classifier;

impl Classifier {
    /// Resolve configured fields against a CSV header
    pub fn for_header(fields: &[FieldSpec], header: &[String]) -> Result<MaskPlan> {
        if fields.is_empty() {
            return Err(Error::config("No fields to mask"));
        }

        let columns: Vec<&str> = header
            .iter()
            .enumerate()
            .map(|(i, h)| if i == 0 { h.trim_start_matches(UTF8_BOM) } else { h.as_str() })
            .collect();

        let mut targets: Vec<ColumnTarget> = Vec::new();
        let mut add = |index: usize, category: FieldCategory| {
            if !targets.iter().any(|t| t.index == index) {
                targets.push(ColumnTarget { index, category });
            }
        };

        for field in fields {
            match &field.selector {
                FieldSelector::Index(index) => {
                    // A header literally named "3" wins over the third column
                    let named = positions(&columns, &index.to_string());
                    if !named.is_empty() {
                        for i in named {
                            add(i, field.category);
                        }
                        continue;
                    }

                    if *index == 0 || *index > columns.len() {
                        return Err(Error::config(format!(
                            "Column #{} out of range (input has {} columns: {})",
                            index,
                            columns.len(),
                            columns.join(", ")
                        )));
                    }
                    add(index - 1, field.category);
                }
                FieldSelector::Name(name) => {
                    let matches = positions(&columns, name);

                    if matches.is_empty() {
                        return Err(Error::config(format!(
                            "Field '{}' not found in CSV header (available: {})",
                            name,
                            columns.join(", ")
                        )));
                    }
                    for index in matches {
                        add(index, field.category);
                    }
                }
            }
        }

        targets.sort_by_key(|t| t.index);

        Ok(MaskPlan::Columns {
            width: columns.len(),
            targets,
        })
    }

    /// Compile configured fields as text patterns
    pub fn for_text(fields: &[FieldSpec]) -> Result<MaskPlan> {
        if fields.is_empty() {
            return Err(Error::config("No fields to mask"));
        }

        let mut rules = Vec::with_capacity(fields.len());
        for field in fields {
            let pattern = match &field.selector {
                FieldSelector::Name(pattern) => pattern,
                FieldSelector::Index(index) => {
                    return Err(Error::config(format!(
                        "Column #{} can only be used with CSV input",
                        index
                    )));
                }
            };

            let regex = Regex::new(pattern).map_err(|e| {
                Error::config(format!("Regex error for pattern '{}': {}", pattern, e))
            })?;

            // Group 0 is the whole match
            let groups: Vec<(usize, FieldCategory)> = regex
                .capture_names()
                .enumerate()
                .skip(1)
                .map(|(index, name)| {
                    let category = name
                        .and_then(FieldCategory::parse)
                        .unwrap_or(field.category);
                    (index, category)
                })
                .collect();

            if groups.is_empty() {
                return Err(Error::config(format!(
                    "Pattern '{}' has no capture group to replace",
                    pattern
                )));
            }

            rules.push(TextRule { regex, groups });
        }

        Ok(MaskPlan::Patterns(rules))
    }
}

fn positions(columns: &[&str], name: &str) -> Vec<usize> {
    (0..columns.len()).filter(|&i| columns[i] == name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_header_by_name() {
        let fields = vec![FieldSpec::parse("name")];
        let plan = Classifier::for_header(&fields, &header(&["name", "email"])).unwrap();

        match &plan {
            MaskPlan::Columns { width, targets } => {
                assert_eq!(*width, 2);
                assert_eq!(
                    targets,
                    &vec![ColumnTarget {
                        index: 0,
                        category: FieldCategory::PersonName
                    }]
                );
            }
            _ => panic!("Expected column plan"),
        }
        assert!(plan.is_masked(0));
        assert!(!plan.is_masked(1));
    }

    #[test]
    fn test_header_by_index() {
        let fields = vec![FieldSpec::parse("email=2")];
        let plan = Classifier::for_header(&fields, &header(&["name", "contact"])).unwrap();
        assert!(plan.is_masked(1));
        assert!(!plan.is_masked(0));
    }

    #[test]
    fn test_unknown_field_is_config_error() {
        let fields = vec![FieldSpec::parse("ssn")];
        let err = Classifier::for_header(&fields, &header(&["name", "email"])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("ssn"));
    }

    #[test]
    fn test_index_out_of_range() {
        let fields = vec![FieldSpec::parse("3")];
        assert!(Classifier::for_header(&fields, &header(&["a", "b"])).is_err());
        let fields = vec![FieldSpec::parse("0")];
        assert!(Classifier::for_header(&fields, &header(&["a", "b"])).is_err());
    }

    #[test]
    fn test_numeric_header_name_wins_over_position() {
        let fields = vec![FieldSpec::parse("1")];
        let plan = Classifier::for_header(&fields, &header(&["id", "1"])).unwrap();
        assert!(plan.is_masked(1));
        assert!(!plan.is_masked(0));
    }

    #[test]
    fn test_numeric_header_beyond_width() {
        let fields = vec![FieldSpec::parse("2024")];
        let plan = Classifier::for_header(&fields, &header(&["id", "2024"])).unwrap();
        assert!(plan.is_masked(1));
        assert_eq!(plan.target_count(), 1);
    }

    #[test]
    fn test_bom_is_ignored_in_first_column() {
        let fields = vec![FieldSpec::parse("name")];
        let plan = Classifier::for_header(&fields, &header(&["\u{feff}name", "email"])).unwrap();
        assert!(plan.is_masked(0));
    }

    #[test]
    fn test_duplicate_selection_masks_once() {
        let fields = vec![FieldSpec::parse("name"), FieldSpec::parse("1")];
        let plan = Classifier::for_header(&fields, &header(&["name"])).unwrap();
        assert_eq!(plan.target_count(), 1);
    }

    #[test]
    fn test_text_named_group_sets_category() {
        let fields = vec![FieldSpec::parse(r"Contact: (?P<email>\S+@\S+)")];
        let plan = Classifier::for_text(&fields).unwrap();

        match plan {
            MaskPlan::Patterns(rules) => {
                assert_eq!(rules[0].groups, vec![(1, FieldCategory::Email)]);
            }
            _ => panic!("Expected pattern plan"),
        }
    }

    #[test]
    fn test_text_unnamed_group_uses_field_category() {
        let fields = vec![FieldSpec::parse(r"phone=Tel: (\d{3}-\d{4})")];
        let plan = Classifier::for_text(&fields).unwrap();

        match plan {
            MaskPlan::Patterns(rules) => {
                assert_eq!(rules[0].groups, vec![(1, FieldCategory::Phone)]);
            }
            _ => panic!("Expected pattern plan"),
        }
    }

    #[test]
    fn test_text_pattern_without_group_fails() {
        let fields = vec![FieldSpec::parse(r"\d{3}-\d{4}")];
        let err = Classifier::for_text(&fields).unwrap_err();
        assert!(err.to_string().contains("no capture group"));
    }

    #[test]
    fn test_text_invalid_regex_fails() {
        let fields = vec![FieldSpec::parse("name=(unclosed")];
        assert!(matches!(
            Classifier::for_text(&fields),
            Err(Error::Config(_))
        ));
    }
}
