use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationErrors;

lazy_static! {
    /// Regex for customer phone numbers
    /// Digits with optional leading plus, spaces, dashes and parentheses
    /// - Valid: "555-0100", "+1 (555) 010-0100", "0812345678"
    /// - Invalid: "call me", "12", "555_0100"
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9][0-9 ()\-]{5,14}$").unwrap();
}

/// Flatten validation errors into user-facing messages, ordered by field name.
pub fn error_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("Invalid {}", field),
            })
        })
        .collect()
}
