use actix_web::{web, HttpResponse};
use crate::{
    database::UserStore,
    middleware::auth::Claims,
    models::User,
    services::user_service::{
        self, ListUsersQuery, RegisterOutcome, RegisterRequest, RegisterResponse,
        UpdateProfileRequest,
    },
    utils::AppError,
};

/// POST /user - Registers a user
///
/// An email that is already registered still answers 201, with
/// `success: false` and a message instead of the insert result.
#[utoipa::path(
    post,
    path = "/user",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "User created, or already registered (success = false)", body = RegisterResponse),
        (status = 400, description = "displayName or email missing"),
        (status = 500, description = "Store failure")
    )
)]
pub async fn register(
    store: web::Data<dyn UserStore>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let email = request.email.clone().unwrap_or_default();
    log::info!("📝 POST /user - email: {}", email);

    match user_service::register(store.get_ref(), request.into_inner()).await? {
        RegisterOutcome::Created { inserted_id } => {
            Ok(HttpResponse::Created().json(RegisterResponse {
                success: true,
                acknowledged: true,
                inserted_id,
            }))
        }
        RegisterOutcome::AlreadyExists => {
            log::warn!("⚠️ Registration skipped, email exists: {}", email);
            Ok(HttpResponse::Created().json(serde_json::json!({
                "success": false,
                "message": "User already exists with this email."
            })))
        }
    }
}

/// GET /users - Lists users, optionally windowed with `skip`/`limit`
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "User documents", body = Vec<User>)
    )
)]
pub async fn list_users(
    store: web::Data<dyn UserStore>,
    query: web::Query<ListUsersQuery>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /users - skip: {:?}, limit: {:?}", query.skip, query.limit);

    let users = user_service::list_all(store.get_ref(), query.page()).await?;

    log::info!("✅ Listed {} users", users.len());
    Ok(HttpResponse::Ok().json(users))
}

/// GET /user/{email}
#[utoipa::path(
    get,
    path = "/user/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "Registered email address")),
    responses(
        (status = 200, description = "User document", body = User),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    store: web::Data<dyn UserStore>,
    email: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("👤 GET /user/{}", email);

    let user = user_service::get_by_email(store.get_ref(), &email).await?;
    Ok(HttpResponse::Ok().json(user))
}

/// PATCH /user/{email} - Replaces the profile and recomputes progress
#[utoipa::path(
    patch,
    path = "/user/{email}",
    tag = "Users",
    params(("email" = String, Path, description = "Registered email address")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated user document", body = User),
        (status = 400, description = "Profile missing"),
        (status = 401, description = "No session cookie"),
        (status = 403, description = "Invalid or expired session"),
        (status = 404, description = "User not found")
    ),
    security(
        ("cookie_auth" = [])
    )
)]
pub async fn update_profile(
    caller: web::ReqData<Claims>,
    store: web::Data<dyn UserStore>,
    email: web::Path<String>,
    request: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!(
        "🔧 PATCH /user/{} - by {}",
        email,
        caller.email().unwrap_or("unknown")
    );

    let user =
        user_service::update_profile(store.get_ref(), &email, request.into_inner().profile).await?;

    log::info!("✅ Profile updated: {} (progress {})", user.email, user.progress);
    Ok(HttpResponse::Ok().json(user))
}
