pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::state::AppState;
use crate::{auth, careers, resources, users};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/auth/signup", post(auth::handlers::signup))
        .route("/api/auth/login", post(auth::handlers::login))
        // User profile & skills
        .route("/api/user/profile", get(users::handlers::get_profile))
        .route("/api/user/skills", put(users::handlers::update_skills))
        .route("/api/user/approve/:id", patch(users::handlers::approve_user))
        .route(
            "/api/user/resources/save",
            post(users::handlers::save_resource),
        )
        .route(
            "/api/user/resources/remove",
            delete(users::handlers::remove_resource),
        )
        // Career persistence
        .route("/api/career/save", post(careers::handlers::save_career))
        .route("/api/career/my-saved", get(careers::handlers::my_saved))
        .route("/api/career/all-saved", get(careers::handlers::all_saved))
        .route(
            "/api/career/remove/:id",
            delete(careers::handlers::remove_career),
        )
        // Curated resource catalog
        .route(
            "/api/resources",
            get(resources::handlers::list).post(resources::handlers::create),
        )
        .route(
            "/api/resources/validate-link",
            post(resources::link_check::validate_link),
        )
        .route("/api/resources/:id", delete(resources::handlers::delete))
        // Legacy unnamespaced CRUD kept for the admin panel
        .route(
            "/users",
            get(users::legacy::list_users).post(users::legacy::create_user),
        )
        .route(
            "/user/:id",
            get(users::legacy::get_user)
                .put(users::legacy::update_user)
                .delete(users::legacy::delete_user),
        )
        .with_state(state)
}
