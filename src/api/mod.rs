pub mod auth;
pub mod health;
pub mod swagger;
pub mod users;

use actix_web::web;
use crate::{middleware::AuthGuard, utils::AppError};

/// Route table.
///
/// | Route                | Access         |
/// |----------------------|----------------|
/// | `GET /`              | public         |
/// | `GET /health`        | public         |
/// | `POST /jwt`          | public         |
/// | `POST /logout`       | public         |
/// | `POST /user`         | public         |
/// | `GET /users`         | public         |
/// | `GET /user/{email}`  | public         |
/// | `PATCH /user/{email}`| session cookie |
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .route("/", web::get().to(health::root))
        .route("/health", web::get().to(health::health_check))
        .route("/jwt", web::post().to(auth::issue_token))
        .route("/logout", web::post().to(auth::logout))
        .route("/user", web::post().to(users::register))
        .route("/users", web::get().to(users::list_users))
        .service(
            web::resource("/user/{email}")
                .route(web::get().to(users::get_user))
                .route(web::patch().to(users::update_profile).wrap(AuthGuard)),
        );
}

/// Malformed bodies answer with the same JSON error shape as everything else.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::Validation(format!("Invalid request body: {}", err)).into())
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default()
        .error_handler(|err, _req| AppError::Validation(format!("Invalid query string: {}", err)).into())
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default()
        .error_handler(|err, _req| AppError::Validation(format!("Invalid path: {}", err)).into())
}
