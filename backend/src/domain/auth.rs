//! Login form parsing.
//!
//! Blank inputs are rejected with the same field-error shape as signup so
//! clients render both forms the same way.

use zeroize::Zeroizing;

use crate::domain::{Error, FieldErrors};

/// Message attached to a blank login field.
pub const FIELD_REQUIRED: &str = "This field may not be blank.";

/// Validated login credentials.
///
/// The username is trimmed; the password keeps caller-provided whitespace so
/// it is verified exactly as typed.
///
/// # Examples
/// ```
/// use jobboard::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" ada ", "correct horse").unwrap();
/// assert_eq!(creds.username(), "ada");
/// assert_eq!(creds.password(), "correct horse");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Parse raw form values, reporting every blank field at once.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, Error> {
        let username = username.trim();
        let mut errors = FieldErrors::default();
        if username.is_empty() {
            errors.push("username", FIELD_REQUIRED);
        }
        if password.is_empty() {
            errors.push("password", FIELD_REQUIRED);
        }
        errors.into_result("login payload is invalid")?;

        Ok(Self {
            username: username.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", &["username"])]
    #[case("   ", "pw", &["username"])]
    #[case("user", "", &["password"])]
    #[case(" ", "", &["password", "username"])]
    fn blank_fields_are_reported(
        #[case] username: &str,
        #[case] password: &str,
        #[case] fields: &[&str],
    ) {
        let err = LoginCredentials::try_from_parts(username, password)
            .expect_err("blank inputs must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err.details().expect("field errors");
        let reported: Vec<&str> = details["fieldErrors"]
            .as_object()
            .expect("object")
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(reported, fields);
    }

    #[rstest]
    #[case("  recruiter  ", "secret")]
    #[case("alice", " leading space kept")]
    fn username_is_trimmed_password_is_not(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password).expect("valid inputs");
        assert_eq!(creds.username(), username.trim());
        assert_eq!(creds.password(), password);
    }
}
