use actix_web::{web, HttpResponse};
use crate::{services::auth_service::CredentialIssuer, utils::AppError};

/// POST /jwt - Signs the posted identity and stores it in the session cookie
#[utoipa::path(
    post,
    path = "/jwt",
    tag = "Auth",
    responses(
        (status = 200, description = "Credential issued and `token` cookie set"),
        (status = 400, description = "Identity payload is not a JSON object")
    )
)]
pub async fn issue_token(
    issuer: web::Data<CredentialIssuer>,
    identity: web::Json<serde_json::Value>,
) -> Result<HttpResponse, AppError> {
    let identity = identity.into_inner();
    let who = identity
        .get("email")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown")
        .to_string();
    log::info!("🔐 POST /jwt - email: {}", who);

    let token = issuer.issue(identity)?;

    log::info!("✅ Credential issued: {}", who);
    Ok(HttpResponse::Ok()
        .cookie(issuer.session_cookie(token))
        .json(serde_json::json!({ "success": true })))
}

/// POST /logout - Clears the session cookie; always succeeds
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Cookie cleared")
    )
)]
pub async fn logout(issuer: web::Data<CredentialIssuer>) -> HttpResponse {
    log::info!("👋 POST /logout");

    HttpResponse::Ok()
        .cookie(issuer.removal_cookie())
        .json(serde_json::json!({ "success": true }))
}
