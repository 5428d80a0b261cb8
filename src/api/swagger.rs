use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "JobSpark API",
        version = "1.0.0",
        description = "Session tokens and user profile documents for the JobSpark job tracker.\n\n**Authentication:** `POST /jwt` sets an HttpOnly `token` cookie. Only profile updates require it.",
    ),
    paths(
        // Health
        crate::api::health::root,
        crate::api::health::health_check,

        // Auth
        crate::api::auth::issue_token,
        crate::api::auth::logout,

        // Users
        crate::api::users::register,
        crate::api::users::list_users,
        crate::api::users::get_user,
        crate::api::users::update_profile,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::User,
            crate::models::Profile,
            crate::models::JobPreferences,
            crate::models::Salary,
            crate::models::ApplicationStats,
            crate::services::user_service::RegisterRequest,
            crate::services::user_service::RegisterResponse,
            crate::services::user_service::UpdateProfileRequest,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and database health."),
        (name = "Auth", description = "Session credential issue and logout."),
        (name = "Users", description = "Registration, lookup and profile updates."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "cookie_auth",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("token"))),
            );
        }
    }
}
