use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::shared::validation::PHONE_REGEX;

/// Login form
#[derive(Debug, Deserialize, Validate)]
pub struct LoginFormDto {
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Customer signup form
///
/// Serialized back into the page when validation fails, minus the password.
#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct CustomerSignupFormDto {
    #[validate(length(min = 1, max = 50, message = "First name must be 1-50 characters"))]
    pub firstname: String,

    #[validate(length(min = 1, max = 50, message = "Last name must be 1-50 characters"))]
    pub lastname: String,

    #[validate(
        email(message = "Invalid email format"),
        length(max = 100, message = "Email must be at most 100 characters")
    )]
    pub email: String,

    #[validate(
        length(max = 15, message = "Phone number is too long"),
        regex(path = *PHONE_REGEX, message = "Invalid phone number")
    )]
    pub phones: String,

    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,

    #[validate(length(min = 1, message = "Password is required"))]
    #[serde(skip_serializing)]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_signup() -> CustomerSignupFormDto {
        CustomerSignupFormDto {
            firstname: "Ada".to_string(),
            lastname: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            phones: "555-0100".to_string(),
            address: "12 Analytical Way".to_string(),
            password: "engine".to_string(),
        }
    }

    #[test]
    fn test_valid_signup_passes() {
        assert!(valid_signup().validate().is_ok());
    }

    #[test]
    fn test_signup_rejects_bad_email_and_phone() {
        let dto = CustomerSignupFormDto {
            email: "not-an-email".to_string(),
            phones: "call me maybe".to_string(),
            ..valid_signup()
        };

        let errors = dto.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("phones"));
        assert!(!fields.contains_key("firstname"));
    }

    #[test]
    fn test_signup_rejects_empty_names() {
        let dto = CustomerSignupFormDto {
            firstname: String::new(),
            lastname: String::new(),
            ..valid_signup()
        };

        let errors = dto.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("firstname"));
        assert!(errors.field_errors().contains_key("lastname"));
    }

    #[test]
    fn test_login_requires_both_fields() {
        let dto = LoginFormDto {
            email: String::new(),
            password: "x".to_string(),
        };
        assert!(dto.validate().is_err());
    }
}
