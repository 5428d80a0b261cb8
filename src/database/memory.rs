use crate::{
    database::{Page, UserStore},
    models::{Profile, User},
    utils::AppError,
};
use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::sync::Mutex;

/// In-process store with the same uniqueness rule as the MongoDB index.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count_by_email(&self, email: &str) -> usize {
        self.lock().iter().filter(|u| u.email == email).count()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<User>> {
        self.users.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.lock().iter().find(|u| u.email == email).cloned())
    }

    async fn find_all(&self, page: Page) -> Result<Vec<User>, AppError> {
        let users = self.lock();
        let skip = page.skip.unwrap_or(0) as usize;
        // Same reading of the limit as the MongoDB driver: 0 means unbounded
        let take = match page.limit {
            Some(limit) if limit > 0 => limit as usize,
            _ => usize::MAX,
        };
        Ok(users.iter().skip(skip).take(take).cloned().collect())
    }

    async fn insert(&self, mut user: User) -> Result<String, AppError> {
        let mut users = self.lock();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(format!(
                "User already exists with email {}",
                user.email
            )));
        }

        let id = ObjectId::new();
        user.id = Some(id);
        users.push(user);
        Ok(id.to_hex())
    }

    async fn update_profile(
        &self,
        email: &str,
        profile: &Profile,
        progress: u32,
    ) -> Result<Option<User>, AppError> {
        let mut users = self.lock();
        Ok(users.iter_mut().find(|u| u.email == email).map(|user| {
            user.profile = profile.clone();
            user.progress = progress;
            user.updated_at = Some(chrono::Utc::now().to_rfc3339());
            user.clone()
        }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
