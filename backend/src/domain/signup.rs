//! Signup payload validation.
//!
//! [`SignupForm`] carries raw caller input. [`SignupForm::validate`] collects
//! every field problem into [`FieldErrors`] before failing, so a client sees
//! all of them at once.

use zeroize::Zeroizing;

use crate::domain::{
    EmailAddress, Error, FieldErrors, Role, UserValidationError, Username, validate_password,
};

/// Message reported when the requested username is already registered.
pub const USERNAME_TAKEN: &str = "A user with that username already exists.";

/// Raw signup input as received from a client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: Zeroizing<String>,
    pub password2: Zeroizing<String>,
    /// Requested role; `None` means the default role.
    pub role: Option<String>,
}

/// Validated signup request ready for provisioning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupRequest {
    username: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
    role: Role,
}

impl SignupRequest {
    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    pub fn role(&self) -> Role {
        self.role
    }
}

impl SignupForm {
    /// Validate every field and return either a request or an
    /// `invalid_request` error with `details.fieldErrors`.
    ///
    /// `username_taken` reports whether an account already uses the
    /// requested username.
    pub fn validate(self, username_taken: bool) -> Result<SignupRequest, Error> {
        let role = parse_role(self.role.as_deref());
        self.validate_with_role(username_taken, role)
    }

    /// Validate the form for the bootstrap administrator. The `role` field is
    /// ignored and the account is always [`Role::Admin`].
    pub fn validate_admin(self, username_taken: bool) -> Result<SignupRequest, Error> {
        self.validate_with_role(username_taken, Ok(Role::Admin))
    }

    fn validate_with_role(
        self,
        username_taken: bool,
        role: Result<Role, String>,
    ) -> Result<SignupRequest, Error> {
        let mut errors = FieldErrors::default();

        let username = Username::new(self.username.trim())
            .map_err(|err| errors.push("username", err.to_string()))
            .ok();
        if username_taken {
            errors.push("username", USERNAME_TAKEN);
        }
        let email = EmailAddress::new(&self.email)
            .map_err(|err| errors.push("email", err.to_string()))
            .ok();
        let role = role.map_err(|message| errors.push("role", message)).ok();

        if self.password.as_str() != self.password2.as_str() {
            errors.push("password", "Passwords do not match.");
        }
        let attributes: Vec<&str> = username
            .iter()
            .map(Username::as_ref)
            .chain(email.iter().map(EmailAddress::as_ref))
            .collect();
        errors.extend("password", validate_password(&self.password, &attributes));

        errors.into_result("signup payload is invalid")?;

        match (username, email, role) {
            (Some(username), Some(email), Some(role)) => Ok(SignupRequest {
                username,
                email,
                password: self.password,
                role,
            }),
            _ => Err(Error::internal("signup validation lost a field error")),
        }
    }
}

fn parse_role(raw: Option<&str>) -> Result<Role, String> {
    let Some(raw) = raw.map(str::trim).filter(|value| !value.is_empty()) else {
        return Ok(Role::default());
    };
    match raw.parse::<Role>() {
        Ok(Role::Admin) => Err("Admin accounts cannot be self-registered.".to_owned()),
        Ok(role) => Ok(role),
        Err(UserValidationError::UnknownRole(role)) => {
            Err(format!("\"{role}\" is not a valid choice."))
        }
        Err(other) => Err(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::{fixture, rstest};

    #[fixture]
    fn form() -> SignupForm {
        SignupForm {
            username: "recruiter1".to_owned(),
            email: "recruiter1@example.com".to_owned(),
            password: Zeroizing::new("s3cure-Passphrase".to_owned()),
            password2: Zeroizing::new("s3cure-Passphrase".to_owned()),
            role: Some("recruiter".to_owned()),
        }
    }

    fn field_errors(err: &Error) -> serde_json::Value {
        err.details()
            .and_then(|details| details.get("fieldErrors"))
            .cloned()
            .expect("fieldErrors present")
    }

    #[rstest]
    fn valid_form_produces_request(form: SignupForm) {
        let request = form.validate(false).expect("valid form");
        assert_eq!(request.username().as_ref(), "recruiter1");
        assert_eq!(request.email().as_ref(), "recruiter1@example.com");
        assert_eq!(request.role(), Role::Recruiter);
        assert_eq!(request.password(), "s3cure-Passphrase");
    }

    #[rstest]
    fn missing_role_defaults_to_seeker(mut form: SignupForm) {
        form.role = None;
        assert_eq!(form.validate(false).expect("valid form").role(), Role::Seeker);
    }

    #[rstest]
    fn collects_every_field_error() {
        let form = SignupForm {
            username: "ab".to_owned(),
            email: "invalid@".to_owned(),
            password: Zeroizing::new("123".to_owned()),
            password2: Zeroizing::new("123".to_owned()),
            role: None,
        };

        let err = form.validate(false).expect_err("invalid form");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let fields = field_errors(&err);
        assert!(fields.get("username").is_some());
        assert!(fields.get("email").is_some());
        assert!(fields.get("password").is_some());
        assert!(fields.get("role").is_none());
    }

    #[rstest]
    fn mismatched_passwords_are_reported(mut form: SignupForm) {
        form.password2 = Zeroizing::new("different-Passphrase".to_owned());
        let err = form.validate(false).expect_err("mismatch");
        assert_eq!(
            field_errors(&err)["password"][0],
            serde_json::json!("Passwords do not match.")
        );
    }

    #[rstest]
    fn taken_username_is_reported(form: SignupForm) {
        let err = form.validate(true).expect_err("taken username");
        assert_eq!(
            field_errors(&err)["username"],
            serde_json::json!([USERNAME_TAKEN])
        );
    }

    #[rstest]
    fn huge_password_reports_only_its_length(mut form: SignupForm) {
        let huge = "x".repeat(1_000_000);
        form.username = huge.clone();
        form.email = format!("{huge}@example.com");
        form.password = Zeroizing::new(huge.clone());
        form.password2 = Zeroizing::new(huge);

        let err = form.validate(false).expect_err("huge form");
        let fields = field_errors(&err);
        assert_eq!(
            fields["password"],
            serde_json::json!(["This password is too long. It must contain at most 4096 characters."])
        );
        assert!(fields.get("username").is_some());
        assert!(fields.get("email").is_some());
    }

    #[rstest]
    fn invalid_username_is_not_used_for_similarity(mut form: SignupForm) {
        form.username = "mar garet".to_owned();
        form.password = Zeroizing::new("margaret!".to_owned());
        form.password2 = Zeroizing::new("margaret!".to_owned());

        let err = form.validate(false).expect_err("bad username");
        let fields = field_errors(&err);
        assert!(fields.get("password").is_none(), "{fields}");
    }

    #[rstest]
    fn admin_validation_forces_the_admin_role(mut form: SignupForm) {
        form.role = Some("seeker".to_owned());
        let request = form.validate_admin(false).expect("valid admin form");
        assert_eq!(request.role(), Role::Admin);
    }

    #[rstest]
    #[case("admin", "Admin accounts cannot be self-registered.")]
    #[case("owner", "\"owner\" is not a valid choice.")]
    fn rejected_roles(mut form: SignupForm, #[case] role: &str, #[case] expected: &str) {
        form.role = Some(role.to_owned());
        let err = form.validate(false).expect_err("rejected role");
        assert_eq!(field_errors(&err)["role"][0], serde_json::json!(expected));
    }
}
