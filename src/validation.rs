//! Field rules grouped by lifecycle operation.

use std::sync::LazyLock;

use regex::Regex;

pub const NOT_BLANK: &str = "This value should not be blank.";

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("url pattern compiles")
});

/// Which constraints apply: `Create` enforces required fields, `Update` only
/// checks the format of fields that are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleGroup {
    Create,
    Update,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub property: String,
    pub message: String,
}

pub trait Validate {
    fn validate(&self, group: RuleGroup) -> Vec<Violation>;
}

/// Values that can be checked for blankness.
pub trait Presence {
    fn is_blank(&self) -> bool {
        false
    }
}

impl Presence for str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl Presence for f64 {}

impl Presence for i32 {}

/// Collects violations in the order fields are checked.
#[derive(Debug)]
pub struct Checker {
    group: RuleGroup,
    violations: Vec<Violation>,
}

impl Checker {
    pub fn new(group: RuleGroup) -> Self {
        Self {
            group,
            violations: Vec::new(),
        }
    }

    pub fn field<'a, T: ?Sized>(&'a mut self, property: &'static str, value: Option<&'a T>) -> Field<'a, T> {
        Field {
            checker: self,
            property,
            value,
            failed: false,
        }
    }

    pub fn finish(self) -> Vec<Violation> {
        self.violations
    }
}

/// Rules for a single field. The first failing rule wins.
pub struct Field<'a, T: ?Sized> {
    checker: &'a mut Checker,
    property: &'static str,
    value: Option<&'a T>,
    failed: bool,
}

impl<T: ?Sized + Presence> Field<'_, T> {
    pub fn required(mut self) -> Self {
        let blank = self.value.is_none_or(|value| value.is_blank());
        if self.checker.group == RuleGroup::Create && blank {
            self.fail(NOT_BLANK);
        }
        self
    }

    fn fail(&mut self, message: &str) {
        if self.failed {
            return;
        }
        self.failed = true;
        self.checker.violations.push(Violation {
            property: self.property.to_string(),
            message: message.to_string(),
        });
    }

    fn check(mut self, ok: impl FnOnce(&T) -> bool, message: &str) -> Self {
        if let Some(value) = self.value {
            if !self.failed && !ok(value) {
                self.fail(message);
            }
        }
        self
    }
}

impl Field<'_, str> {
    pub fn min_chars(self, min: usize, message: &str) -> Self {
        self.check(|value| value.chars().count() >= min, message)
    }

    pub fn max_chars(self, max: usize, message: &str) -> Self {
        self.check(|value| value.chars().count() <= max, message)
    }

    pub fn isbn13(self, message: &str) -> Self {
        self.check(is_isbn13, message)
    }

    pub fn url(self, message: &str) -> Self {
        self.check(|value| URL_PATTERN.is_match(value), message)
    }
}

impl Field<'_, f64> {
    pub fn positive(self, message: &str) -> Self {
        self.check(|value| value.is_finite() && *value > 0.0, message)
    }
}

impl Field<'_, i32> {
    pub fn positive(self, message: &str) -> Self {
        self.check(|value| *value > 0, message)
    }

    pub fn one_of(self, allowed: &[i32], message: &str) -> Self {
        self.check(|value| allowed.contains(value), message)
    }
}

/// 13 digits (hyphens ignored) with a valid EAN-13 checksum.
pub fn is_isbn13(value: &str) -> bool {
    let digits: Vec<u32> = value
        .chars()
        .filter(|c| *c != '-')
        .map(|c| c.to_digit(10))
        .collect::<Option<_>>()
        .unwrap_or_default();
    if digits.len() != 13 {
        return false;
    }
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { *d } else { d * 3 })
        .sum();
    sum % 10 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample {
        name: Option<String>,
        price: Option<f64>,
        status: Option<i32>,
    }

    impl Validate for Sample {
        fn validate(&self, group: RuleGroup) -> Vec<Violation> {
            let mut check = Checker::new(group);
            check
                .field("name", self.name.as_deref())
                .required()
                .min_chars(2, "too short")
                .max_chars(5, "too long");
            check
                .field("price", self.price.as_ref())
                .required()
                .positive("must be positive");
            check
                .field("status", self.status.as_ref())
                .one_of(&[1, 0], "not allowed");
            check.finish()
        }
    }

    fn properties(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.property.as_str()).collect()
    }

    #[test]
    fn create_group_requires_missing_fields() {
        let sample = Sample {
            name: None,
            price: None,
            status: None,
        };
        let violations = sample.validate(RuleGroup::Create);
        assert_eq!(properties(&violations), ["name", "price"]);
        assert!(violations.iter().all(|v| v.message == NOT_BLANK));
    }

    #[test]
    fn update_group_skips_missing_fields() {
        let sample = Sample {
            name: None,
            price: None,
            status: None,
        };
        assert!(sample.validate(RuleGroup::Update).is_empty());
    }

    #[test]
    fn update_group_checks_present_fields() {
        let sample = Sample {
            name: Some("A".into()),
            price: Some(-1.0),
            status: Some(7),
        };
        let violations = sample.validate(RuleGroup::Update);
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        assert_eq!(messages, ["too short", "must be positive", "not allowed"]);
    }

    #[test]
    fn blank_string_reports_only_first_rule() {
        let sample = Sample {
            name: Some("  ".into()),
            price: Some(1.0),
            status: Some(1),
        };
        let violations = sample.validate(RuleGroup::Create);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, NOT_BLANK);
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let sample = Sample {
            name: Some("ééééé".into()),
            price: Some(1.0),
            status: None,
        };
        assert!(sample.validate(RuleGroup::Create).is_empty());
    }

    #[test]
    fn isbn13_checksum() {
        assert!(is_isbn13("9781234567897"));
        assert!(is_isbn13("978-1-234-56789-7"));
        assert!(!is_isbn13("9781234567890"));
        assert!(!is_isbn13("978123456789"));
        assert!(!is_isbn13("97812345678x7"));
    }

    #[test]
    fn url_rule_accepts_http_and_https_only() {
        let mut check = Checker::new(RuleGroup::Update);
        check.field("a", Some("https://x/1.png")).url("bad");
        check.field("b", Some("http://example.com")).url("bad");
        check.field("c", Some("ftp://example.com")).url("bad");
        check.field("d", Some("not a url")).url("bad");
        assert_eq!(properties(&check.finish()), ["c", "d"]);
    }
}
