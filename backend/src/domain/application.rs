//! Job applications.
//!
//! An [`Application`] belongs to the identity that submitted it. At most one
//! application exists per `(job, applicant)` pair; persistence enforces this
//! and reports a conflict for the second writer.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::resource_id::resource_id;
use crate::domain::{Job, JobId, UserId};

resource_id! {
    /// Stable application identifier.
    ApplicationId
}

/// Review state of an application.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Applied,
    Viewed,
    Rejected,
    Accepted,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Viewed => "viewed",
            Self::Rejected => "rejected",
            Self::Accepted => "accepted",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognised stored status.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application status: {0}")]
pub struct UnknownApplicationStatus(pub String);

impl std::str::FromStr for ApplicationStatus {
    type Err = UnknownApplicationStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "applied" => Ok(Self::Applied),
            "viewed" => Ok(Self::Viewed),
            "rejected" => Ok(Self::Rejected),
            "accepted" => Ok(Self::Accepted),
            other => Err(UnknownApplicationStatus(other.to_owned())),
        }
    }
}

/// Submitted application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: ApplicationId,
    pub job_id: JobId,
    pub applicant: UserId,
    pub cover_letter: String,
    pub status: ApplicationStatus,
    pub applied_at: DateTime<Utc>,
}

impl Application {
    /// New application in the [`ApplicationStatus::Applied`] state.
    pub fn submit(job_id: JobId, applicant: UserId, cover_letter: impl Into<String>) -> Self {
        Self {
            id: ApplicationId::random(),
            job_id,
            applicant,
            cover_letter: cover_letter.into(),
            status: ApplicationStatus::default(),
            applied_at: Utc::now(),
        }
    }
}

/// Application together with the job it targets, as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationDetails {
    pub application: Application,
    pub job: Job,
}
