//! Resource ownership.
//!
//! Every mutable resource is anchored to exactly one identity. Owners are
//! assigned by the services from the creating principal; no public operation
//! reassigns them.

use crate::domain::{Application, Job, Profile, UserId};

/// Resource with a single owning identity.
pub trait Owned {
    /// Identity the resource's access rules are anchored to.
    fn owner(&self) -> &UserId;

    /// Whether `user` owns this resource.
    fn is_owned_by(&self, user: &UserId) -> bool {
        self.owner() == user
    }
}

impl Owned for Job {
    fn owner(&self) -> &UserId {
        &self.posted_by
    }
}

impl Owned for Application {
    fn owner(&self) -> &UserId {
        &self.applicant
    }
}

impl Owned for Profile {
    fn owner(&self) -> &UserId {
        &self.user
    }
}
