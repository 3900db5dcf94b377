//! Login decorator that mirrors authenticated users into the user store.
//!
//! Recipes, comments, and notifications refer to users by id only, so every
//! successful login refreshes the stored profile the rest of the domain
//! renders from.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::port_errors::map_user_error;
use crate::domain::ports::{LoginService, UserRepository};
use crate::domain::{Error, LoginCredentials, User};

/// [`LoginService`] that upserts each authenticated user.
pub struct RegisteringLoginService<L: ?Sized, U> {
    inner: Arc<L>,
    users: Arc<U>,
}

impl<L: ?Sized, U> RegisteringLoginService<L, U> {
    /// Wrap `inner`, recording its users in `users`.
    pub fn new(inner: Arc<L>, users: Arc<U>) -> Self {
        Self { inner, users }
    }
}

#[async_trait]
impl<L, U> LoginService for RegisteringLoginService<L, U>
where
    L: LoginService + ?Sized,
    U: UserRepository,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let user = self.inner.authenticate(credentials).await?;
        self.users.upsert(&user).await.map_err(map_user_error)?;
        info!(user_id = %user.id, "user signed in");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{FixtureLoginService, MockUserRepository, UserPersistenceError};

    fn credentials(password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts("ada", password).expect("credentials")
    }

    #[tokio::test]
    async fn successful_login_upserts_the_user() {
        let mut users = MockUserRepository::new();
        users
            .expect_upsert()
            .times(1)
            .withf(|user| user.name.as_str() == "Ada Lovelace")
            .returning(|_| Ok(()));
        let service = RegisteringLoginService::new(Arc::new(FixtureLoginService), Arc::new(users));

        let user = service.authenticate(&credentials("password")).await.expect("login");
        assert_eq!(user.email.as_str(), "ada@example.com");
    }

    #[tokio::test]
    async fn failed_login_touches_nothing() {
        let mut users = MockUserRepository::new();
        users.expect_upsert().never();
        let service = RegisteringLoginService::new(Arc::new(FixtureLoginService), Arc::new(users));

        let err = service
            .authenticate(&credentials("nope"))
            .await
            .expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
    }

    #[tokio::test]
    async fn store_outage_fails_the_login() {
        let mut users = MockUserRepository::new();
        users
            .expect_upsert()
            .returning(|_| Err(UserPersistenceError::connection("down")));
        let service = RegisteringLoginService::new(Arc::new(FixtureLoginService), Arc::new(users));

        let err = service
            .authenticate(&credentials("password"))
            .await
            .expect_err("unavailable");
        assert_eq!(err.code(), ErrorCode::ServiceUnavailable);
    }
}
