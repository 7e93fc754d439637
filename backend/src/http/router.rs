//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route("/options", get(handlers::get_options))
        // Animals
        .route(
            "/animals",
            get(handlers::list_animals).post(handlers::create_animal),
        )
        .route(
            "/animals/{id}",
            get(handlers::get_animal)
                .put(handlers::update_animal)
                .delete(handlers::delete_animal),
        )
        .route("/animals/{id}/sunrise", post(handlers::animal_sunrise))
        .route("/animals/{id}/sunset", post(handlers::animal_sunset))
        .route("/animals/{id}/feedingtime", post(handlers::animal_feeding_time))
        // Categories
        .route(
            "/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/categories/{id}",
            get(handlers::get_category)
                .put(handlers::update_category)
                .delete(handlers::delete_category),
        )
        .route("/categories/{id}/animals", get(handlers::category_animals))
        .route(
            "/categories/{id}/assign/{animal_id}",
            post(handlers::category_assign_animal),
        )
        // Enclosures
        .route(
            "/enclosures",
            get(handlers::list_enclosures).post(handlers::create_enclosure),
        )
        .route(
            "/enclosures/{id}",
            get(handlers::get_enclosure)
                .put(handlers::update_enclosure)
                .delete(handlers::delete_enclosure),
        )
        .route(
            "/enclosures/{id}/addanimal/{animal_id}",
            post(handlers::enclosure_add_animal),
        )
        .route(
            "/enclosures/{id}/removeanimal/{animal_id}",
            post(handlers::enclosure_remove_animal),
        )
        .route(
            "/enclosures/{id}/assignanimal/{animal_id}",
            post(handlers::enclosure_assign_animal),
        )
        .route("/enclosures/{id}/sunrise", post(handlers::enclosure_sunrise))
        .route("/enclosures/{id}/sunset", post(handlers::enclosure_sunset))
        .route(
            "/enclosures/{id}/feedingtime",
            post(handlers::enclosure_feeding_time),
        )
        .route(
            "/enclosures/{id}/checkconstraints",
            post(handlers::enclosure_check_constraints),
        )
        // Zoos
        .route("/zoos", get(handlers::list_zoos).post(handlers::create_zoo))
        .route(
            "/zoos/{id}",
            get(handlers::get_zoo)
                .put(handlers::update_zoo)
                .delete(handlers::delete_zoo),
        )
        .route(
            "/zoos/{id}/addanimal/{animal_id}",
            post(handlers::zoo_add_animal),
        )
        .route(
            "/zoos/{id}/removeanimal/{animal_id}",
            post(handlers::zoo_remove_animal),
        )
        .route("/zoos/{id}/sunrise", post(handlers::zoo_sunrise))
        .route("/zoos/{id}/sunset", post(handlers::zoo_sunset))
        .route("/zoos/{id}/feeding-time", post(handlers::zoo_feeding_time))
        .route("/zoos/{id}/auto-assign", post(handlers::zoo_auto_assign))
        .route(
            "/zoos/{id}/check-constraints",
            post(handlers::zoo_check_constraints),
        );

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
