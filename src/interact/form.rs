use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::collections::BTreeMap;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Email,
    TextArea,
}

/// Native constraints of one form control.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldRule {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    pub min_length: Option<usize>,
}

impl FieldRule {
    fn from_element(el: ElementRef<'_>) -> Option<FieldRule> {
        let v = el.value();
        let name = v.attr("name")?.to_string();
        let kind = match (v.name(), v.attr("type")) {
            ("textarea", _) => FieldKind::TextArea,
            (_, Some(t)) if t.eq_ignore_ascii_case("email") => FieldKind::Email,
            _ => FieldKind::Text,
        };
        Some(FieldRule {
            name,
            kind,
            required: v.attr("required").is_some(),
            min_length: v.attr("minlength").and_then(|m| m.trim().parse().ok()),
        })
    }

    /// Mirrors browser constraint validation for the supported attributes.
    /// An empty optional field is always valid.
    pub fn accepts(&self, value: &str) -> bool {
        if value.trim().is_empty() {
            return !self.required;
        }
        if let Some(min) = self.min_length {
            if value.chars().count() < min {
                return false;
            }
        }
        match self.kind {
            FieldKind::Email => is_valid_email(value.trim()),
            FieldKind::Text | FieldKind::TextArea => true,
        }
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    // The HTML "valid e-mail address" production
    EMAIL.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
        )
        .expect("email pattern")
    })
}

pub fn is_valid_email(value: &str) -> bool {
    email_pattern().is_match(value)
}

/// Enables submit only while every field passes its constraints.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormGate {
    pub fields: Vec<FieldRule>,
}

impl FormGate {
    pub fn scan(document: &Html) -> FormGate {
        let inputs = Selector::parse("[data-form] [data-form-input]").expect("form input selector");
        FormGate {
            fields: document
                .select(&inputs)
                .filter_map(FieldRule::from_element)
                .collect(),
        }
    }

    #[cfg(test)]
    fn field(&self, name: &str) -> Option<&FieldRule> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of fields whose current value fails validation.
    pub fn invalid_fields<'a>(&'a self, values: &BTreeMap<String, String>) -> Vec<&'a str> {
        self.fields
            .iter()
            .filter(|f| !f.accepts(values.get(&f.name).map(String::as_str).unwrap_or("")))
            .map(|f| f.name.as_str())
            .collect()
    }

    /// A page without form fields never enables submit.
    pub fn allows_submit(&self, values: &BTreeMap<String, String>) -> bool {
        !self.fields.is_empty() && self.invalid_fields(values).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM: &str = r#"<form data-form>
        <input type="text" name="fullname" required data-form-input>
        <input type="email" name="email" required data-form-input>
        <input type="text" name="company" data-form-input>
        <textarea name="message" required minlength="10" data-form-input></textarea>
        <input type="text" name="untracked" required>
    </form>"#;

    fn values(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_scan_reads_constraints() {
        let gate = FormGate::scan(&Html::parse_document(FORM));
        assert_eq!(gate.fields.len(), 4);
        assert_eq!(gate.field("email").unwrap().kind, FieldKind::Email);
        assert_eq!(gate.field("message").unwrap().kind, FieldKind::TextArea);
        assert_eq!(gate.field("message").unwrap().min_length, Some(10));
        assert!(!gate.field("company").unwrap().required);
        assert!(gate.field("untracked").is_none());
    }

    #[test]
    fn test_gate_opens_when_all_valid() {
        let gate = FormGate::scan(&Html::parse_document(FORM));
        let ok = values(&[
            ("fullname", "Ada"),
            ("email", "ada@example.com"),
            ("message", "Hello there, engines!"),
        ]);
        assert!(gate.allows_submit(&ok));
    }

    #[test]
    fn test_gate_reports_each_failure() {
        let gate = FormGate::scan(&Html::parse_document(FORM));
        let bad = values(&[("fullname", "  "), ("email", "ada@"), ("message", "short")]);
        assert!(!gate.allows_submit(&bad));
        assert_eq!(gate.invalid_fields(&bad), vec!["fullname", "email", "message"]);
    }

    #[test]
    fn test_no_fields_never_submits() {
        let gate = FormGate::default();
        assert!(!gate.allows_submit(&BTreeMap::new()));
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("a.b+c@sub.example.org"));
        assert!(is_valid_email("user@localhost"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("x@-bad.com"));
    }
}
