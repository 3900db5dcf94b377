//! Port for credential checks.
//!
//! Identity is owned by an external provider; this backend only needs the
//! authenticated user's profile. The fixture stands in for the provider in
//! development and tests.

use async_trait::async_trait;

use crate::domain::{DisplayName, EmailAddress, Error, LoginCredentials, User, UserId};

/// Authenticates credentials against an identity provider.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}

struct FixtureAccount {
    username: &'static str,
    id: &'static str,
    name: &'static str,
    email: &'static str,
}

const FIXTURE_PASSWORD: &str = "password";

const FIXTURE_ACCOUNTS: [FixtureAccount; 2] = [
    FixtureAccount {
        username: "ada",
        id: "123e4567-e89b-12d3-a456-426614174000",
        name: "Ada Lovelace",
        email: "ada@example.com",
    },
    FixtureAccount {
        username: "grace",
        id: "3fa85f64-5717-4562-b3fc-2c963f66afa6",
        name: "Grace Hopper",
        email: "grace@example.com",
    },
];

/// Development identity provider with two demo accounts, `ada` and `grace`,
/// both using the password `password`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

impl FixtureAccount {
    fn to_user(&self) -> Result<User, Error> {
        let invalid = |err: crate::domain::UserValidationError| {
            Error::internal(format!("invalid fixture account {}: {err}", self.username))
        };
        Ok(User {
            id: UserId::new(self.id).map_err(invalid)?,
            name: DisplayName::new(self.name).map_err(invalid)?,
            email: EmailAddress::new(self.email).map_err(invalid)?,
            image: None,
        })
    }
}

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let account = FIXTURE_ACCOUNTS
            .iter()
            .find(|account| account.username.eq_ignore_ascii_case(credentials.username()))
            .filter(|_| credentials.password() == FIXTURE_PASSWORD)
            .ok_or_else(|| Error::unauthorized("invalid credentials"))?;
        account.to_user()
    }
}
