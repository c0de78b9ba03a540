//! Candidate profiles.
//!
//! Each identity has at most one [`Profile`]; it is created alongside the
//! account at signup or lazily on first "my profile" access. Absent text
//! fields are stored as empty strings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::resource_id::resource_id;
use crate::domain::{Error, FieldErrors, UserId};

resource_id! {
    /// Stable profile identifier.
    ProfileId
}

/// Maximum number of characters for the short profile fields.
pub const PROFILE_SHORT_FIELD_MAX: usize = 255;

/// Profile attached one-to-one to a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: ProfileId,
    pub user: UserId,
    pub bio: String,
    pub location: String,
    pub birth_date: Option<NaiveDate>,
    /// Comma-separated skills.
    pub skills: String,
    pub contact: String,
}

impl Profile {
    /// Empty profile for `user`.
    pub fn empty(user: UserId) -> Self {
        Self {
            id: ProfileId::random(),
            user,
            bio: String::new(),
            location: String::new(),
            birth_date: None,
            skills: String::new(),
            contact: String::new(),
        }
    }
}

/// Caller-supplied profile fields. Used for both create and partial update:
/// `None` means "not supplied".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileFields {
    pub bio: Option<String>,
    pub location: Option<String>,
    pub birth_date: Option<Option<NaiveDate>>,
    pub skills: Option<String>,
    pub contact: Option<String>,
}

impl ProfileFields {
    fn validate(&self) -> Result<(), Error> {
        let mut errors = FieldErrors::default();
        for (field, value) in [("location", &self.location), ("contact", &self.contact)] {
            if value
                .as_deref()
                .is_some_and(|value| value.chars().count() > PROFILE_SHORT_FIELD_MAX)
            {
                errors.push(
                    field,
                    format!("Ensure this field has no more than {PROFILE_SHORT_FIELD_MAX} characters."),
                );
            }
        }
        errors.into_result("profile payload is invalid")
    }

    /// Build a new profile for `user`, filling absent fields with blanks.
    pub fn into_profile(self, user: UserId) -> Result<Profile, Error> {
        let mut profile = Profile::empty(user);
        self.apply_to(&mut profile)?;
        Ok(profile)
    }

    /// Overwrite the supplied fields on `profile`. The owner never changes.
    pub fn apply_to(self, profile: &mut Profile) -> Result<(), Error> {
        self.validate()?;
        if let Some(bio) = self.bio {
            profile.bio = bio;
        }
        if let Some(location) = self.location {
            profile.location = location;
        }
        if let Some(birth_date) = self.birth_date {
            profile.birth_date = birth_date;
        }
        if let Some(skills) = self.skills {
            profile.skills = skills;
        }
        if let Some(contact) = self.contact {
            profile.contact = contact;
        }
        Ok(())
    }
}
