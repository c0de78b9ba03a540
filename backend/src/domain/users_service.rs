//! Read-only user directory.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error_mapping::map_user_error;
use crate::domain::ports::{UserRepository, UsersQuery};
use crate::domain::{
    AccessPolicy, Action, Error, Principal, Resource, User, UserId, authorize, not_found,
};

/// [`UsersQuery`] over the user repository.
pub struct UserDirectoryService<U: ?Sized> {
    users: Arc<U>,
    policy: AccessPolicy,
}

impl<U: ?Sized> UserDirectoryService<U> {
    pub fn new(users: Arc<U>, policy: AccessPolicy) -> Self {
        Self { users, policy }
    }
}

#[async_trait]
impl<U> UsersQuery for UserDirectoryService<U>
where
    U: UserRepository + ?Sized,
{
    async fn list_users(&self, principal: Option<Principal>) -> Result<Vec<User>, Error> {
        authorize(
            self.policy,
            principal.as_ref(),
            Action::List,
            Resource::UserDirectory,
        )?;
        self.users.list().await.map_err(map_user_error)
    }

    async fn get_user(&self, principal: Option<Principal>, id: UserId) -> Result<User, Error> {
        authorize(
            self.policy,
            principal.as_ref(),
            Action::Read,
            Resource::UserDirectory,
        )?;
        self.users
            .find_by_id(&id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| not_found("user"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockUserRepository;
    use crate::domain::{EmailAddress, ErrorCode, Role, Username};
    use rstest::rstest;

    fn service(users: MockUserRepository) -> UserDirectoryService<MockUserRepository> {
        UserDirectoryService::new(Arc::new(users), AccessPolicy::default())
    }

    #[rstest]
    #[tokio::test]
    async fn anonymous_listing_is_unauthorized() {
        let mut users = MockUserRepository::new();
        users.expect_list().never();
        let err = service(users)
            .list_users(None)
            .await
            .expect_err("anonymous");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[rstest]
    #[tokio::test]
    async fn any_principal_can_read_another_user() {
        let other = User::register(
            Username::new("grace").expect("username"),
            EmailAddress::new("grace@example.com").expect("email"),
            Role::Recruiter,
        );
        let expected = other.clone();
        let mut users = MockUserRepository::new();
        users
            .expect_find_by_id()
            .return_once(move |_| Ok(Some(other)));

        let seeker = Principal::new(UserId::random(), Role::Seeker);
        let user = service(users)
            .get_user(Some(seeker), expected.id)
            .await
            .expect("directory read");
        assert_eq!(user, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn missing_user_is_not_found() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_id().return_once(|_| Ok(None));
        let seeker = Principal::new(UserId::random(), Role::Seeker);
        let err = service(users)
            .get_user(Some(seeker), UserId::random())
            .await
            .expect_err("missing");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
