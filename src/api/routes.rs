//! Routing definitions for the Todo API.

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    AppState, create_todo, delete_todo, get_todo, health_check, list_todos, update_todo, welcome,
};
use crate::infrastructure::TodoRepository;

/// Creates the API router with all routes and middleware.
///
/// # Examples
///
/// ```ignore
/// use todo_sync::api::{AppState, create_router};
/// use todo_sync::infrastructure::InMemoryTodoRepository;
///
/// let state = AppState::new(InMemoryTodoRepository::with_seed_data());
/// let router = create_router(state);
///
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:5002").await?;
/// axum::serve(listener, router).await?;
/// ```
pub fn create_router<Repository>(state: AppState<Repository>) -> Router
where
    Repository: TodoRepository + 'static,
{
    let todos = Router::new()
        .route(
            "/todos",
            get(list_todos::<Repository>).post(create_todo::<Repository>),
        )
        .route(
            "/todos/{id}",
            get(get_todo::<Repository>)
                .put(update_todo::<Repository>)
                .delete(delete_todo::<Repository>),
        );

    Router::new()
        .route("/", get(welcome))
        .route("/health", get(health_check))
        .nest("/api", todos)
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer())
        .with_state(state)
}

/// Any origin may call the API; there is no authentication to protect.
fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}

// =============================================================================
// Tests
// =============================================================================
