//! Job postings.
//!
//! A [`Job`] is owned by the recruiter or admin who posted it. The owner is
//! assigned from the creating principal and never changes afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::resource_id::resource_id;
use crate::domain::{Error, FieldErrors, UserId};

resource_id! {
    /// Stable job identifier.
    JobId
}

/// Minimum number of characters in a job title.
pub const JOB_TITLE_MIN: usize = 3;
/// Maximum number of characters in a job title.
pub const JOB_TITLE_MAX: usize = 255;
/// Maximum number of characters in a job location.
pub const JOB_LOCATION_MAX: usize = 255;

/// Posted job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub description: String,
    pub location: String,
    /// Annual salary in whole currency units.
    pub salary: Option<i64>,
    pub posted_by: UserId,
    pub created_at: DateTime<Utc>,
}

/// Validated content for a new job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDraft {
    title: String,
    description: String,
    location: String,
    salary: Option<i64>,
}

impl JobDraft {
    /// Validate raw job fields, collecting every problem.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        location: impl Into<String>,
        salary: Option<i64>,
    ) -> Result<Self, Error> {
        let draft = Self {
            title: title.into().trim().to_owned(),
            description: description.into(),
            location: location.into().trim().to_owned(),
            salary,
        };

        let mut errors = FieldErrors::default();
        check_title(&draft.title, &mut errors);
        check_location(&draft.location, &mut errors);
        check_salary(draft.salary, &mut errors);
        errors.into_result("job payload is invalid")?;

        Ok(draft)
    }

    /// Materialise the draft as a job owned by `posted_by`.
    pub fn into_job(self, posted_by: UserId) -> Job {
        Job {
            id: JobId::random(),
            title: self.title,
            description: self.description,
            location: self.location,
            salary: self.salary,
            posted_by,
            created_at: Utc::now(),
        }
    }
}

/// Partial update for a job. `None` leaves the field unchanged; for `salary`,
/// `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub salary: Option<Option<i64>>,
}

impl JobPatch {
    /// Apply the patch to `job`, validating the changed fields.
    ///
    /// The owner and creation time are never touched.
    pub fn apply_to(self, job: &mut Job) -> Result<(), Error> {
        let mut errors = FieldErrors::default();
        let title = self.title.map(|title| title.trim().to_owned());
        let location = self.location.map(|location| location.trim().to_owned());

        if let Some(title) = &title {
            check_title(title, &mut errors);
        }
        if let Some(location) = &location {
            check_location(location, &mut errors);
        }
        if let Some(salary) = self.salary {
            check_salary(salary, &mut errors);
        }
        errors.into_result("job payload is invalid")?;

        if let Some(title) = title {
            job.title = title;
        }
        if let Some(description) = self.description {
            job.description = description;
        }
        if let Some(location) = location {
            job.location = location;
        }
        if let Some(salary) = self.salary {
            job.salary = salary;
        }
        Ok(())
    }
}

fn check_title(title: &str, errors: &mut FieldErrors) {
    let length = title.chars().count();
    if length < JOB_TITLE_MIN {
        errors.push(
            "title",
            format!("Title must have at least {JOB_TITLE_MIN} characters."),
        );
    } else if length > JOB_TITLE_MAX {
        errors.push(
            "title",
            format!("Title must have at most {JOB_TITLE_MAX} characters."),
        );
    }
}

fn check_location(location: &str, errors: &mut FieldErrors) {
    if location.chars().count() > JOB_LOCATION_MAX {
        errors.push(
            "location",
            format!("Location must have at most {JOB_LOCATION_MAX} characters."),
        );
    }
}

fn check_salary(salary: Option<i64>, errors: &mut FieldErrors) {
    if salary.is_some_and(|value| value < 0) {
        errors.push("salary", "Salary must be positive.");
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::{fixture, rstest};

    #[fixture]
    fn job() -> Job {
        JobDraft::new("Backend Engineer", "Rust services", "Remote", Some(90_000))
            .expect("valid draft")
            .into_job(UserId::random())
    }

    #[rstest]
    fn draft_trims_title_and_location() {
        let draft = JobDraft::new("  Engineer ", "desc", " Berlin ", None).expect("valid draft");
        let job = draft.into_job(UserId::random());
        assert_eq!(job.title, "Engineer");
        assert_eq!(job.location, "Berlin");
    }

    #[rstest]
    fn draft_assigns_owner() {
        let owner = UserId::random();
        let job = JobDraft::new("Engineer", "", "", None)
            .expect("valid draft")
            .into_job(owner);
        assert_eq!(job.posted_by, owner);
    }

    #[rstest]
    #[case("ab", Some(0), &["title"])]
    #[case("Engineer", Some(-1), &["salary"])]
    #[case("x", Some(-5), &["salary", "title"])]
    fn draft_reports_invalid_fields(
        #[case] title: &str,
        #[case] salary: Option<i64>,
        #[case] fields: &[&str],
    ) {
        let err = JobDraft::new(title, "", "", salary).expect_err("invalid draft");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let reported = err
            .details()
            .and_then(|details| details.get("fieldErrors"))
            .and_then(|value| value.as_object())
            .expect("field errors");
        let mut keys: Vec<_> = reported.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(keys, fields);
    }

    #[rstest]
    fn zero_salary_is_accepted() {
        assert!(JobDraft::new("Volunteer", "", "", Some(0)).is_ok());
    }

    #[rstest]
    fn patch_updates_only_supplied_fields(mut job: Job) {
        let owner = job.posted_by;
        let patch = JobPatch {
            title: Some("Staff Engineer".to_owned()),
            salary: Some(None),
            ..JobPatch::default()
        };
        patch.apply_to(&mut job).expect("valid patch");

        assert_eq!(job.title, "Staff Engineer");
        assert_eq!(job.description, "Rust services");
        assert_eq!(job.salary, None);
        assert_eq!(job.posted_by, owner);
    }

    #[rstest]
    fn invalid_patch_leaves_job_untouched(mut job: Job) {
        let before = job.clone();
        let patch = JobPatch {
            title: Some("Principal".to_owned()),
            salary: Some(Some(-10)),
            ..JobPatch::default()
        };
        assert!(patch.apply_to(&mut job).is_err());
        assert_eq!(job, before);
    }
}
