// ==================== USER MANAGEMENT ====================
// Registration, lookup and profile updates over the users collection.
// Progress is only ever written together with the profile it was scored from.

use crate::{
    database::{Page, UserStore},
    models::{Profile, User},
    services::profile_scorer,
    utils::AppError,
};
use serde::{Deserialize, Serialize};

/// Hard ceiling for one page of `/users`. MongoDB reads a limit of 0 as
/// "no limit", so requested limits never go below 1.
pub const MAX_PAGE_SIZE: i64 = 500;

// ==================== REQUEST/RESPONSE MODELS ====================

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub display_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub db_photo: Option<String>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct UpdateProfileRequest {
    pub profile: Option<Profile>,
}

#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    pub skip: Option<u64>,
    pub limit: Option<i64>,
}

impl ListUsersQuery {
    pub fn page(&self) -> Page {
        Page {
            skip: self.skip,
            limit: self.limit.map(|l| l.clamp(1, MAX_PAGE_SIZE)),
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub success: bool,
    pub acknowledged: bool,
    pub inserted_id: String,
}

/// Result of a registration attempt that reached the store.
#[derive(Debug, PartialEq)]
pub enum RegisterOutcome {
    Created { inserted_id: String },
    AlreadyExists,
}

// ==================== SERVICE FUNCTIONS ====================

pub async fn register(
    store: &dyn UserStore,
    request: RegisterRequest,
) -> Result<RegisterOutcome, AppError> {
    let (Some(display_name), Some(email)) = (
        non_empty(request.display_name),
        non_empty(request.email),
    ) else {
        return Err(AppError::Validation(
            "Email and Display Name are required.".to_string(),
        ));
    };

    // Fast path only; the unique index settles concurrent registrations
    if store.find_by_email(&email).await?.is_some() {
        log::info!("ℹ️  User already registered: {}", email);
        return Ok(RegisterOutcome::AlreadyExists);
    }

    let avatar = non_empty(request.photo_url)
        .or_else(|| non_empty(request.db_photo))
        .unwrap_or_default();

    match store.insert(User::new(display_name, email.clone(), avatar)).await {
        Ok(inserted_id) => {
            log::info!("✅ User registered: {} ({})", email, inserted_id);
            Ok(RegisterOutcome::Created { inserted_id })
        }
        Err(AppError::Conflict(_)) => Ok(RegisterOutcome::AlreadyExists),
        Err(e) => Err(e),
    }
}

pub async fn get_by_email(store: &dyn UserStore, email: &str) -> Result<User, AppError> {
    store
        .find_by_email(email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

pub async fn list_all(store: &dyn UserStore, page: Page) -> Result<Vec<User>, AppError> {
    store.find_all(page).await
}

pub async fn update_profile(
    store: &dyn UserStore,
    email: &str,
    profile: Option<Profile>,
) -> Result<User, AppError> {
    let profile = match profile {
        Some(profile) if !email.is_empty() => profile,
        _ => {
            return Err(AppError::Validation(
                "Email and profile data are required.".to_string(),
            ))
        }
    };

    let progress = profile_scorer::score(&profile);
    log::debug!("Profile score for {}: {}", email, progress);

    store
        .update_profile(email, &profile, progress)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryUserStore;
    use crate::models::BASELINE_PROGRESS;
    use serde_json::json;

    fn registration(name: Option<&str>, email: Option<&str>) -> RegisterRequest {
        RegisterRequest {
            display_name: name.map(str::to_string),
            email: email.map(str::to_string),
            photo_url: None,
            db_photo: None,
        }
    }

    #[tokio::test]
    async fn register_seeds_baseline_document() {
        let store = MemoryUserStore::new();
        let outcome = register(&store, registration(Some("Ada"), Some("ada@x.com")))
            .await
            .unwrap();
        assert!(matches!(outcome, RegisterOutcome::Created { .. }));

        let user = get_by_email(&store, "ada@x.com").await.unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.progress, BASELINE_PROGRESS);
        assert!(user.profile.skills.is_empty());
        assert_eq!(user.avatar, "");
        assert_eq!(user.role, "user");
    }

    #[tokio::test]
    async fn register_twice_keeps_one_document() {
        let store = MemoryUserStore::new();
        register(&store, registration(Some("Ada"), Some("ada@x.com"))).await.unwrap();

        let second = register(&store, registration(Some("Ada L."), Some("ada@x.com")))
            .await
            .unwrap();
        assert_eq!(second, RegisterOutcome::AlreadyExists);
        assert_eq!(store.count_by_email("ada@x.com"), 1);
        assert_eq!(get_by_email(&store, "ada@x.com").await.unwrap().name, "Ada");
    }

    #[tokio::test]
    async fn register_requires_name_and_email() {
        let store = MemoryUserStore::new();

        for request in [
            registration(None, Some("ada@x.com")),
            registration(Some("Ada"), None),
            registration(Some(""), Some("ada@x.com")),
        ] {
            let err = register(&store, request).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
        assert!(list_all(&store, Page::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn avatar_falls_back_to_db_photo() {
        let store = MemoryUserStore::new();
        let mut request = registration(Some("Ada"), Some("ada@x.com"));
        request.db_photo = Some("https://cdn/ada.png".into());
        register(&store, request).await.unwrap();

        let user = get_by_email(&store, "ada@x.com").await.unwrap();
        assert_eq!(user.avatar, "https://cdn/ada.png");
    }

    #[tokio::test]
    async fn unknown_email_is_not_found() {
        let store = MemoryUserStore::new();
        let err = get_by_email(&store, "ghost@x.com").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_profile_stores_profile_and_score() {
        let store = MemoryUserStore::new();
        register(&store, registration(Some("Ada"), Some("ada@x.com"))).await.unwrap();

        let profile: Profile = serde_json::from_value(json!({
            "headline": "Engineer",
            "skills": ["Go"],
            "bio": null
        }))
        .unwrap();

        let updated = update_profile(&store, "ada@x.com", Some(profile.clone()))
            .await
            .unwrap();
        assert_eq!(updated.progress, 20);

        let stored = get_by_email(&store, "ada@x.com").await.unwrap();
        assert_eq!(stored.progress, profile_scorer::score(&profile));
        assert_eq!(stored.profile, profile);
    }

    #[tokio::test]
    async fn update_profile_for_unknown_email_changes_nothing() {
        let store = MemoryUserStore::new();
        register(&store, registration(Some("Ada"), Some("ada@x.com"))).await.unwrap();

        let err = update_profile(&store, "ghost@x.com", Some(Profile::default()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let users = list_all(&store, Page::default()).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].progress, BASELINE_PROGRESS);
    }

    #[tokio::test]
    async fn update_profile_requires_payload() {
        let store = MemoryUserStore::new();
        let err = update_profile(&store, "ada@x.com", None).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn list_all_honours_window() {
        let store = MemoryUserStore::new();
        for i in 0..5 {
            let email = format!("user{}@x.com", i);
            register(&store, registration(Some("U"), Some(&email))).await.unwrap();
        }

        let page = ListUsersQuery { skip: Some(1), limit: Some(2) }.page();
        let users = list_all(&store, page).await.unwrap();
        let emails: Vec<_> = users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, vec!["user1@x.com", "user2@x.com"]);

        assert_eq!(list_all(&store, Page::default()).await.unwrap().len(), 5);
    }

    #[test]
    fn page_limit_is_clamped() {
        let page = ListUsersQuery { skip: None, limit: Some(10_000) }.page();
        assert_eq!(page.limit, Some(MAX_PAGE_SIZE));
    }

    #[test]
    fn zero_or_negative_limit_still_bounds_the_page() {
        for limit in [0, -5, i64::MIN] {
            let page = ListUsersQuery { skip: None, limit: Some(limit) }.page();
            assert_eq!(page.limit, Some(1));
        }
        assert_eq!(ListUsersQuery { skip: None, limit: None }.page().limit, None);
    }

    #[tokio::test]
    async fn zero_limit_returns_one_user_not_the_collection() {
        let store = MemoryUserStore::new();
        for i in 0..3 {
            let email = format!("user{}@x.com", i);
            register(&store, registration(Some("U"), Some(&email))).await.unwrap();
        }

        let page = ListUsersQuery { skip: None, limit: Some(0) }.page();
        assert_eq!(list_all(&store, page).await.unwrap().len(), 1);
    }
}
