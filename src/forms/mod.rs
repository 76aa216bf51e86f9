//! Rule-driven validation of raw form state.
//!
//! The UI hands over its field values as plain strings; rules are checked
//! per field in declaration order and every violation is reported. Only
//! `Required` fires on a missing or empty value — format rules are skipped
//! so an optional field left blank stays valid.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::core::{ValidationIssue, ValidationReport};

/// A single per-field constraint.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Value must be present and non-blank.
    Required,
    MinLength(usize),
    MaxLength(usize),
    /// ASCII digits only.
    Digits,
    /// Parseable decimal number.
    Number,
    /// Exactly 10 digits after stripping separators.
    Phone,
    /// Structural GSTIN check: 15 chars, 2-digit state code, PAN block,
    /// entity digit, literal 'Z', checksum char. No checksum computation.
    Gstin,
    /// ISO date, `YYYY-MM-DD`.
    Date,
    /// Arbitrary predicate with its own rule code and message.
    Custom {
        code: &'static str,
        message: &'static str,
        check: fn(&str) -> bool,
    },
}

/// Ordered field → rules table.
#[derive(Debug, Clone, Default)]
pub struct FormRules {
    fields: Vec<(String, Vec<Rule>)>,
}

impl FormRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register rules for a field. Fields and rules are checked in the
    /// order they are declared.
    pub fn field(mut self, name: impl Into<String>, rules: Vec<Rule>) -> Self {
        self.fields.push((name.into(), rules));
        self
    }

    /// Check all fields against the supplied values, accumulating every
    /// violation.
    pub fn validate(&self, values: &BTreeMap<String, String>) -> ValidationReport {
        let mut issues = Vec::new();

        for (field, rules) in &self.fields {
            let value = values.get(field).map(String::as_str).unwrap_or("");
            let blank = value.trim().is_empty();

            for rule in rules {
                match rule {
                    Rule::Required => {
                        if blank {
                            issues.push(ValidationIssue::new(
                                field,
                                "required",
                                format!("{field} is required"),
                            ));
                        }
                    }
                    _ if blank => {}
                    Rule::MinLength(min) => {
                        if value.chars().count() < *min {
                            issues.push(ValidationIssue::new(
                                field,
                                "min_length",
                                format!("{field} must be at least {min} characters"),
                            ));
                        }
                    }
                    Rule::MaxLength(max) => {
                        if value.chars().count() > *max {
                            issues.push(ValidationIssue::new(
                                field,
                                "max_length",
                                format!("{field} must be at most {max} characters"),
                            ));
                        }
                    }
                    Rule::Digits => {
                        if !value.chars().all(|c| c.is_ascii_digit()) {
                            issues.push(ValidationIssue::new(
                                field,
                                "digits",
                                format!("{field} must contain only digits"),
                            ));
                        }
                    }
                    Rule::Number => {
                        if value.parse::<Decimal>().is_err() {
                            issues.push(ValidationIssue::new(
                                field,
                                "number",
                                format!("{field} must be a number"),
                            ));
                        }
                    }
                    Rule::Phone => {
                        let digits: String =
                            value.chars().filter(char::is_ascii_digit).collect();
                        if digits.len() != 10 {
                            issues.push(ValidationIssue::new(
                                field,
                                "phone",
                                format!("{field} must be a 10-digit phone number"),
                            ));
                        }
                    }
                    Rule::Gstin => {
                        if !is_structurally_valid_gstin(value) {
                            issues.push(ValidationIssue::new(
                                field,
                                "gstin",
                                format!("{field} is not a valid GSTIN"),
                            ));
                        }
                    }
                    Rule::Date => {
                        if NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
                            issues.push(ValidationIssue::new(
                                field,
                                "date",
                                format!("{field} must be a date in YYYY-MM-DD format"),
                            ));
                        }
                    }
                    Rule::Custom { code, message, check } => {
                        if !check(value) {
                            issues.push(ValidationIssue::new(field, *code, *message));
                        }
                    }
                }
            }
        }

        ValidationReport::from_issues(issues)
    }
}

/// Positional GSTIN structure check (15 characters):
/// 2-digit state code, 10-char PAN (5 letters, 4 digits, 1 letter),
/// entity digit/letter, literal 'Z', checksum character.
pub fn is_structurally_valid_gstin(value: &str) -> bool {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() != 15 {
        return false;
    }
    chars[0].is_ascii_digit()
        && chars[1].is_ascii_digit()
        && chars[2..7].iter().all(|c| c.is_ascii_uppercase())
        && chars[7..11].iter().all(|c| c.is_ascii_digit())
        && chars[11].is_ascii_uppercase()
        && chars[12].is_ascii_alphanumeric()
        && chars[13] == 'Z'
        && chars[14].is_ascii_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn rules() -> FormRules {
        FormRules::new()
            .field("customer_name", vec![Rule::Required, Rule::MinLength(3), Rule::MaxLength(100)])
            .field("phone", vec![Rule::Phone])
            .field("gstin", vec![Rule::Gstin])
            .field("invoice_date", vec![Rule::Required, Rule::Date])
            .field("amount", vec![Rule::Number])
    }

    #[test]
    fn passing_form() {
        let report = rules().validate(&values(&[
            ("customer_name", "Sharma Medicals"),
            ("phone", "+91 98765 43210"),
            ("gstin", "27AABCS1429B1ZB"),
            ("invoice_date", "2024-06-15"),
            ("amount", "1234.50"),
        ]));
        assert!(report.is_valid, "unexpected issues: {:?}", report.issues);
    }

    #[test]
    fn all_violations_accumulate() {
        let report = rules().validate(&values(&[
            ("customer_name", "ab"),
            ("phone", "12345"),
            ("gstin", "not-a-gstin"),
            ("invoice_date", "15/06/2024"),
            ("amount", "abc"),
        ]));
        assert!(!report.is_valid);
        assert_eq!(report.issues.len(), 5);
        assert!(report.has_issue_for("gstin"));
    }

    #[test]
    fn optional_blank_fields_skip_format_rules() {
        // phone/gstin/amount absent, only required fields present
        let report = rules().validate(&values(&[
            ("customer_name", "Sharma Medicals"),
            ("invoice_date", "2024-06-15"),
        ]));
        assert!(report.is_valid);
    }

    #[test]
    fn required_fires_on_missing_and_blank() {
        let report = rules().validate(&values(&[("customer_name", "   ")]));
        let required: Vec<_> = report
            .issues
            .iter()
            .filter(|i| i.code == "required")
            .collect();
        assert_eq!(required.len(), 2); // customer_name and invoice_date
    }

    #[test]
    fn custom_rule() {
        fn positive(value: &str) -> bool {
            value.parse::<f64>().map(|v| v > 0.0).unwrap_or(false)
        }
        let rules = FormRules::new().field(
            "qty",
            vec![Rule::Custom {
                code: "positive",
                message: "quantity must be positive",
                check: positive,
            }],
        );
        assert!(!rules.validate(&values(&[("qty", "-2")])).is_valid);
        assert!(rules.validate(&values(&[("qty", "2")])).is_valid);
    }

    #[test]
    fn gstin_structure() {
        assert!(is_structurally_valid_gstin("27AABCS1429B1ZB"));
        assert!(!is_structurally_valid_gstin("27AABCS1429B1XB")); // no 'Z'
        assert!(!is_structurally_valid_gstin("27AABCS1429B1Z")); // 14 chars
        assert!(!is_structurally_valid_gstin("AAAABCS1429B1ZB")); // state code
    }
}
