//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. Conversions into domain types re-run the
//! domain validators, so a row that violates an invariant surfaces as a query
//! error rather than as a malformed entity.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Application, ApplicationId, EmailAddress, Job, JobId, Profile, ProfileId, User, UserId,
    Username,
};

use super::schema::{applications, jobs, profiles, users};

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Public user columns. The password hash is deliberately absent.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: Option<String>,
    pub role: String,
    pub date_joined: DateTime<Utc>,
}

impl UserRow {
    pub(crate) fn into_domain(self) -> Result<User, String> {
        Ok(User {
            id: UserId::from_uuid(self.id),
            username: Username::new(self.username).map_err(|err| err.to_string())?,
            email: EmailAddress::new(&self.email).map_err(|err| err.to_string())?,
            first_name: self.first_name,
            last_name: self.last_name,
            phone_number: self.phone_number,
            role: self.role.parse().map_err(|err: crate::domain::UserValidationError| {
                err.to_string()
            })?,
            date_joined: self.date_joined,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub phone_number: Option<&'a str>,
    pub role: &'a str,
    pub password_hash: &'a str,
    pub date_joined: DateTime<Utc>,
}

impl<'a> NewUserRow<'a> {
    pub(crate) fn new(user: &'a User, password_hash: &'a str) -> Self {
        Self {
            id: *user.id.as_uuid(),
            username: user.username.as_ref(),
            email: user.email.as_ref(),
            first_name: &user.first_name,
            last_name: &user.last_name,
            phone_number: user.phone_number.as_deref(),
            role: user.role.as_str(),
            password_hash,
            date_joined: user.date_joined,
        }
    }
}

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JobRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub location: String,
    pub salary: Option<i64>,
    pub posted_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<JobRow> for Job {
    fn from(row: JobRow) -> Self {
        Self {
            id: JobId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            location: row.location,
            salary: row.salary,
            posted_by: UserId::from_uuid(row.posted_by),
            created_at: row.created_at,
        }
    }
}

impl From<&Job> for JobRow {
    fn from(job: &Job) -> Self {
        Self {
            id: *job.id.as_uuid(),
            title: job.title.clone(),
            description: job.description.clone(),
            location: job.location.clone(),
            salary: job.salary,
            posted_by: *job.posted_by.as_uuid(),
            created_at: job.created_at,
        }
    }
}

/// Mutable job columns; owner and creation time never change.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = jobs)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct JobChangeset<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub location: &'a str,
    pub salary: Option<i64>,
}

impl<'a> From<&'a Job> for JobChangeset<'a> {
    fn from(job: &'a Job) -> Self {
        Self {
            title: &job.title,
            description: &job.description,
            location: &job.location,
            salary: job.salary,
        }
    }
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = applications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ApplicationRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub applicant: Uuid,
    pub cover_letter: String,
    pub status: String,
    pub applied_at: DateTime<Utc>,
}

impl ApplicationRow {
    pub(crate) fn into_domain(self) -> Result<Application, String> {
        Ok(Application {
            id: ApplicationId::from_uuid(self.id),
            job_id: JobId::from_uuid(self.job_id),
            applicant: UserId::from_uuid(self.applicant),
            cover_letter: self.cover_letter,
            status: self.status.parse().map_err(
                |err: crate::domain::UnknownApplicationStatus| err.to_string(),
            )?,
            applied_at: self.applied_at,
        })
    }
}

impl From<&Application> for ApplicationRow {
    fn from(application: &Application) -> Self {
        Self {
            id: *application.id.as_uuid(),
            job_id: *application.job_id.as_uuid(),
            applicant: *application.applicant.as_uuid(),
            cover_letter: application.cover_letter.clone(),
            status: application.status.as_str().to_owned(),
            applied_at: application.applied_at,
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = applications)]
pub(crate) struct ApplicationChangeset<'a> {
    pub cover_letter: &'a str,
    pub status: &'a str,
}

impl<'a> From<&'a Application> for ApplicationChangeset<'a> {
    fn from(application: &'a Application) -> Self {
        Self {
            cover_letter: &application.cover_letter,
            status: application.status.as_str(),
        }
    }
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = profiles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: String,
    pub location: String,
    pub birth_date: Option<NaiveDate>,
    pub skills: String,
    pub contact: String,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: ProfileId::from_uuid(row.id),
            user: UserId::from_uuid(row.user_id),
            bio: row.bio,
            location: row.location,
            birth_date: row.birth_date,
            skills: row.skills,
            contact: row.contact,
        }
    }
}

impl From<&Profile> for ProfileRow {
    fn from(profile: &Profile) -> Self {
        Self {
            id: *profile.id.as_uuid(),
            user_id: *profile.user.as_uuid(),
            bio: profile.bio.clone(),
            location: profile.location.clone(),
            birth_date: profile.birth_date,
            skills: profile.skills.clone(),
            contact: profile.contact.clone(),
        }
    }
}

#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = profiles)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ProfileChangeset<'a> {
    pub bio: &'a str,
    pub location: &'a str,
    pub birth_date: Option<NaiveDate>,
    pub skills: &'a str,
    pub contact: &'a str,
}

impl<'a> From<&'a Profile> for ProfileChangeset<'a> {
    fn from(profile: &'a Profile) -> Self {
        Self {
            bio: &profile.bio,
            location: &profile.location,
            birth_date: profile.birth_date,
            skills: &profile.skills,
            contact: &profile.contact,
        }
    }
}
