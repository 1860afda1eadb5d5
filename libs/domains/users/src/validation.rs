//! Field rules for user input.

use std::borrow::Cow;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

use crate::models::CreateUser;

pub const NAME_REQUIRED: &str = "Name is required.";
pub const EMAIL_INVALID: &str = "Email must be a valid email address.";

/// Check `name` and `email` of a create request.
///
/// Age is left to the service so its rejection carries the `age_too_low` reason.
pub fn validate_create_user(input: &CreateUser) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if input.name.trim().is_empty() {
        errors.add(
            "name",
            ValidationError::new("required").with_message(Cow::Borrowed(NAME_REQUIRED)),
        );
    }

    if !is_valid_email(&input.email) {
        let mut error =
            ValidationError::new("email").with_message(Cow::Borrowed(EMAIL_INVALID));
        error.add_param(Cow::Borrowed("value"), &input.email);
        errors.add("email", error);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// HTML5 address syntax plus a dotted domain ending in an alphabetic TLD of
/// at least two characters (or a `xn--` punycode label).
fn is_valid_email(email: &str) -> bool {
    if !email.validate_email() {
        return false;
    }

    let Some((_, domain)) = email.rsplit_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    let tld_ok = if let Some(puny) = tld.strip_prefix("xn--") {
        !puny.is_empty() && puny.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    } else {
        tld.chars().count() >= 2 && tld.chars().all(char::is_alphabetic)
    };

    !host.is_empty() && tld_ok
}
