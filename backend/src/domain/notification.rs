//! Outbound notifications.

use serde::{Deserialize, Serialize};

use crate::domain::{EmailAddress, Username};

/// Message delivered to a single recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub to: EmailAddress,
    pub subject: String,
    pub body: String,
}

impl Notification {
    /// Greeting sent once an account has been provisioned.
    pub fn welcome(to: EmailAddress, username: &Username) -> Self {
        Self {
            to,
            subject: "Welcome to the job board".to_owned(),
            body: format!(
                "Hello {username},\n\nYour account is ready. Complete your profile to get noticed by recruiters."
            ),
        }
    }

    /// Alert to a job's owner that someone applied.
    pub fn application_received(to: EmailAddress, applicant: &Username, job_title: &str) -> Self {
        Self {
            to,
            subject: "New Job Application Received".to_owned(),
            body: format!(
                "Hello,\n\n{applicant} has applied for your job posting '{job_title}'."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn application_received_names_applicant_and_job() {
        let to = EmailAddress::new("recruiter@example.com").expect("email");
        let applicant = Username::new("ada").expect("username");
        let notification = Notification::application_received(to.clone(), &applicant, "Engineer");

        assert_eq!(notification.to, to);
        assert!(notification.subject.contains("New Job Application"));
        assert_eq!(
            notification.body,
            "Hello,\n\nada has applied for your job posting 'Engineer'."
        );
    }

    #[rstest]
    fn welcome_subject_mentions_welcome() {
        let to = EmailAddress::new("ada@example.com").expect("email");
        let username = Username::new("ada").expect("username");
        let notification = Notification::welcome(to, &username);
        assert!(notification.subject.contains("Welcome"));
        assert!(notification.body.contains("ada"));
    }
}
