//! In-memory implementations of the driven ports.
//!
//! The score store and the user directory back the binary and the handler
//! tests. A poisoned lock is reported as a query failure rather than a panic
//! so the service maps it like any other store fault.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;

use crate::domain::ports::{
    LoginService, ScoreRepository, ScoreRepositoryError, UserDirectory, UserDirectoryError,
};
use crate::domain::{
    Error, LoginCredentials, NewScore, Principal, Role, Score, ScoreId, User, UserId,
};

/// Score store backed by a `HashMap` behind a read-write lock.
#[derive(Debug)]
pub struct InMemoryScoreRepository {
    scores: RwLock<HashMap<i64, Score>>,
    next_id: AtomicI64,
}

impl Default for InMemoryScoreRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryScoreRepository {
    /// Create an empty store starting ids at 1.
    pub fn new() -> Self {
        Self {
            scores: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl ScoreRepository for InMemoryScoreRepository {
    async fn find_by_id(&self, id: ScoreId) -> Result<Option<Score>, ScoreRepositoryError> {
        let scores = self
            .scores
            .read()
            .map_err(|_| ScoreRepositoryError::query("score store lock poisoned"))?;
        Ok(scores.get(&id.get()).cloned())
    }

    async fn insert(&self, score: NewScore) -> Result<Score, ScoreRepositoryError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let persisted = Score::new(ScoreId::new(id), score.user_id, score.value, score.recorded_at);
        let mut scores = self
            .scores
            .write()
            .map_err(|_| ScoreRepositoryError::query("score store lock poisoned"))?;
        scores.insert(id, persisted.clone());
        Ok(persisted)
    }

    async fn update(&self, score: &Score) -> Result<(), ScoreRepositoryError> {
        let mut scores = self
            .scores
            .write()
            .map_err(|_| ScoreRepositoryError::query("score store lock poisoned"))?;
        match scores.get_mut(&score.id().get()) {
            Some(stored) => {
                *stored = score.clone();
                Ok(())
            }
            None => Err(ScoreRepositoryError::query(format!(
                "no stored score with id {}",
                score.id()
            ))),
        }
    }

    async fn delete(&self, id: ScoreId) -> Result<bool, ScoreRepositoryError> {
        let mut scores = self
            .scores
            .write()
            .map_err(|_| ScoreRepositoryError::query("score store lock poisoned"))?;
        Ok(scores.remove(&id.get()).is_some())
    }
}

struct UserAccount {
    user: User,
    password: String,
}

/// User directory with fixed accounts, doubling as the login service.
pub struct InMemoryUserDirectory {
    accounts: Vec<UserAccount>,
}

impl InMemoryUserDirectory {
    /// Directory with no accounts.
    pub fn new() -> Self {
        Self {
            accounts: Vec::new(),
        }
    }

    /// Directory seeded with the fixture accounts used by the binary: an
    /// admin (`admin`/`password`, id 1) and a regular user
    /// (`ada`/`wonderland`, id 2).
    pub fn seeded() -> Self {
        let mut directory = Self::new();
        directory.add_account(
            User::new(UserId::new(1), "admin", vec![Role::User, Role::Admin]),
            "password",
        );
        directory.add_account(User::new(UserId::new(2), "ada", vec![Role::User]), "wonderland");
        directory
    }

    /// Register an account.
    pub fn add_account(&mut self, user: User, password: impl Into<String>) {
        self.accounts.push(UserAccount {
            user,
            password: password.into(),
        });
    }
}

impl Default for InMemoryUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserDirectoryError> {
        Ok(self
            .accounts
            .iter()
            .map(|account| &account.user)
            .find(|user| user.id() == id)
            .cloned())
    }
}

#[async_trait]
impl LoginService for InMemoryUserDirectory {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Principal, Error> {
        // Same message for unknown user and wrong password.
        self.accounts
            .iter()
            .find(|account| {
                account.user.username() == credentials.username()
                    && account.password == credentials.password()
            })
            .map(|account| {
                Principal::new(account.user.id(), account.user.roles().to_vec())
            })
            .ok_or_else(|| Error::unauthorized("invalid credentials"))
    }
}
