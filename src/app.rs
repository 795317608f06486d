use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post, put}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/tasks", post(handlers::add_task_form))
        .route("/tasks/:index/toggle", post(handlers::toggle_task_form))
        .route("/tasks/:index/edit", post(handlers::edit_task_form))
        .route("/tasks/:index/delete", post(handlers::delete_task_form))
        .route("/meals", post(handlers::add_meal_form))
        .route("/meals/:index/delete", post(handlers::delete_meal_form))
        .route("/settings", post(handlers::save_settings_form))
        .route("/api/state", get(handlers::get_state))
        .route("/api/today", get(handlers::get_today))
        .route("/api/tasks", post(handlers::add_task_api))
        .route("/api/tasks/:index/toggle", post(handlers::toggle_task_api))
        .route(
            "/api/tasks/:index",
            put(handlers::edit_task_api).delete(handlers::delete_task_api),
        )
        .route("/api/meals", post(handlers::add_meal_api))
        .route("/api/meals/:index", delete(handlers::delete_meal_api))
        .route("/api/settings", put(handlers::save_settings_api))
        .with_state(state)
}
