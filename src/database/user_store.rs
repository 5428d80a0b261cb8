use crate::{
    database::{MongoDB, USERS_COLLECTION},
    models::{Profile, User},
    utils::AppError,
};
use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, to_bson, Bson};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::ReturnDocument;
use mongodb::Collection;

const DUPLICATE_KEY: i32 = 11000;

/// Window over the users collection. `None` fields mean "unbounded";
/// a `limit` of 0 is also unbounded, as in the MongoDB driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub skip: Option<u64>,
    pub limit: Option<i64>,
}

/// Persistence boundary for user documents, keyed by email.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_all(&self, page: Page) -> Result<Vec<User>, AppError>;

    /// Inserts a new document and returns its id as hex.
    /// A second document with the same email fails with [`AppError::Conflict`].
    async fn insert(&self, user: User) -> Result<String, AppError>;

    /// Replaces `profile` and `progress` in one atomic update.
    /// Returns the document after the update, or `None` when no email matched.
    async fn update_profile(
        &self,
        email: &str,
        profile: &Profile,
        progress: u32,
    ) -> Result<Option<User>, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}

pub struct MongoUserStore {
    db: MongoDB,
}

impl MongoUserStore {
    pub fn new(db: MongoDB) -> Self {
        Self { db }
    }

    fn users(&self) -> Collection<User> {
        self.db.collection::<User>(USERS_COLLECTION)
    }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self.users().find_one(doc! { "email": email }).await?)
    }

    async fn find_all(&self, page: Page) -> Result<Vec<User>, AppError> {
        let users = self.users();
        let mut find = users.find(doc! {});
        if let Some(skip) = page.skip {
            find = find.skip(skip);
        }
        if let Some(limit) = page.limit {
            find = find.limit(limit);
        }

        let cursor = find.await?;
        Ok(cursor.try_collect::<Vec<User>>().await?)
    }

    async fn insert(&self, user: User) -> Result<String, AppError> {
        let email = user.email.clone();
        match self.users().insert_one(user).await {
            Ok(result) => Ok(match result.inserted_id {
                Bson::ObjectId(oid) => oid.to_hex(),
                other => other.to_string(),
            }),
            Err(e) if is_duplicate_key(&e) => {
                log::warn!("⚠️  Duplicate key on insert for {}", email);
                Err(AppError::Conflict(format!("User already exists with email {}", email)))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update_profile(
        &self,
        email: &str,
        profile: &Profile,
        progress: u32,
    ) -> Result<Option<User>, AppError> {
        let update = doc! {
            "$set": {
                "profile": to_bson(profile)?,
                "progress": progress as i64,
                "updatedAt": chrono::Utc::now().to_rfc3339(),
            }
        };

        Ok(self
            .users()
            .find_one_and_update(doc! { "email": email }, update)
            .return_document(ReturnDocument::After)
            .await?)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(self.db.ping().await?)
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(write_error)) if write_error.code == DUPLICATE_KEY
    )
}
