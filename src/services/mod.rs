pub mod auth_service;
pub mod profile_scorer;
pub mod user_service;
