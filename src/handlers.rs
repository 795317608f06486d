use crate::day::DayKey;
use crate::errors::AppError;
use crate::goals::{apply_settings, progress};
use crate::meals::{add_meal_raw, delete_by_today_index, todays_meals, totals};
use crate::models::{MealRequest, SettingsRequest, StateDocument, TaskTextRequest, TodayResponse};
use crate::state::AppState;
use crate::storage::persist_state;
use crate::tasks::{add_task, delete_task, edit_task, toggle_done};
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use tracing::debug;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = DayKey::today();
    let data = state.data.lock().await;
    Html(render_index(&data, &today))
}

pub async fn get_state(State(state): State<AppState>) -> Json<StateDocument> {
    let data = state.data.lock().await;
    Json(data.clone())
}

pub async fn get_today(State(state): State<AppState>) -> Json<TodayResponse> {
    let today = DayKey::today();
    let data = state.data.lock().await;
    Json(today_view(&data, &today))
}

pub async fn add_task_api(
    State(state): State<AppState>,
    Json(payload): Json<TaskTextRequest>,
) -> Result<Json<TodayResponse>, AppError> {
    apply(&state, |doc, _| Ok(add_task(&mut doc.tasks, &payload.text))).await.map(Json)
}

pub async fn toggle_task_api(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<TodayResponse>, AppError> {
    apply(&state, |doc, _| toggle(doc, index)).await.map(Json)
}

pub async fn edit_task_api(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Json(payload): Json<TaskTextRequest>,
) -> Result<Json<TodayResponse>, AppError> {
    apply(&state, |doc, _| edit(doc, index, &payload.text)).await.map(Json)
}

pub async fn delete_task_api(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<TodayResponse>, AppError> {
    apply(&state, |doc, _| remove_task(doc, index)).await.map(Json)
}

pub async fn add_meal_api(
    State(state): State<AppState>,
    Json(payload): Json<MealRequest>,
) -> Result<Json<TodayResponse>, AppError> {
    apply(&state, |doc, today| Ok(add_meal(doc, &payload, today))).await.map(Json)
}

pub async fn delete_meal_api(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Json<TodayResponse>, AppError> {
    apply(&state, |doc, today| remove_meal(doc, today, index)).await.map(Json)
}

pub async fn save_settings_api(
    State(state): State<AppState>,
    Json(payload): Json<SettingsRequest>,
) -> Result<Json<TodayResponse>, AppError> {
    apply(&state, |doc, _| save_settings(doc, &payload)).await.map(Json)
}

pub async fn add_task_form(
    State(state): State<AppState>,
    Form(payload): Form<TaskTextRequest>,
) -> Result<Redirect, AppError> {
    apply(&state, |doc, _| Ok(add_task(&mut doc.tasks, &payload.text))).await?;
    Ok(Redirect::to("/"))
}

pub async fn toggle_task_form(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Redirect, AppError> {
    apply(&state, |doc, _| toggle(doc, index)).await?;
    Ok(Redirect::to("/"))
}

pub async fn edit_task_form(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Form(payload): Form<TaskTextRequest>,
) -> Result<Redirect, AppError> {
    apply(&state, |doc, _| edit(doc, index, &payload.text)).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete_task_form(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Redirect, AppError> {
    apply(&state, |doc, _| remove_task(doc, index)).await?;
    Ok(Redirect::to("/"))
}

pub async fn add_meal_form(
    State(state): State<AppState>,
    Form(payload): Form<MealRequest>,
) -> Result<Redirect, AppError> {
    apply(&state, |doc, today| Ok(add_meal(doc, &payload, today))).await?;
    Ok(Redirect::to("/"))
}

pub async fn delete_meal_form(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<Redirect, AppError> {
    apply(&state, |doc, today| remove_meal(doc, today, index)).await?;
    Ok(Redirect::to("/"))
}

pub async fn save_settings_form(
    State(state): State<AppState>,
    Form(payload): Form<SettingsRequest>,
) -> Result<Redirect, AppError> {
    apply(&state, |doc, _| save_settings(doc, &payload)).await?;
    Ok(Redirect::to("/"))
}

/// Runs one mutation against a copy of the document under the lock. The copy
/// replaces the live document only once it has been persisted, so a failed
/// save leaves memory as it was. `change` reports whether anything was modified.
async fn apply<F>(state: &AppState, change: F) -> Result<TodayResponse, AppError>
where
    F: FnOnce(&mut StateDocument, &DayKey) -> Result<bool, AppError>,
{
    let today = DayKey::today();
    let mut data = state.data.lock().await;
    let mut next = data.clone();
    if change(&mut next, &today)? {
        persist_state(&state.data_path, &next).await?;
        *data = next;
    } else {
        debug!("request left the document unchanged");
    }
    Ok(today_view(&data, &today))
}

fn toggle(doc: &mut StateDocument, index: usize) -> Result<bool, AppError> {
    toggle_done(&mut doc.tasks, index)
        .map(|_| true)
        .ok_or_else(|| AppError::task_index(index))
}

fn edit(doc: &mut StateDocument, index: usize, text: &str) -> Result<bool, AppError> {
    edit_task(&mut doc.tasks, index, text).ok_or_else(|| AppError::task_index(index))
}

fn remove_task(doc: &mut StateDocument, index: usize) -> Result<bool, AppError> {
    delete_task(&mut doc.tasks, index)
        .map(|_| true)
        .ok_or_else(|| AppError::task_index(index))
}

fn add_meal(doc: &mut StateDocument, payload: &MealRequest, today: &DayKey) -> bool {
    add_meal_raw(
        &mut doc.meals,
        payload.calories.as_ref(),
        payload.protein.as_ref(),
        today,
    )
}

fn remove_meal(doc: &mut StateDocument, today: &DayKey, index: usize) -> Result<bool, AppError> {
    delete_by_today_index(&mut doc.meals, today, index)
        .map(|_| true)
        .ok_or_else(|| AppError::meal_index(index))
}

fn save_settings(doc: &mut StateDocument, payload: &SettingsRequest) -> Result<bool, AppError> {
    apply_settings(doc, payload);
    Ok(true)
}

pub fn today_view(doc: &StateDocument, today: &DayKey) -> TodayResponse {
    let (total_calories, total_protein) = totals(&doc.meals, today);
    TodayResponse {
        date: today.clone(),
        tasks: doc.tasks.clone(),
        meals: todays_meals(&doc.meals, today).cloned().collect(),
        total_calories,
        total_protein,
        goals: doc.goals,
        progress: progress(doc, today),
        reset_meals_daily: doc.reset_meals_daily,
    }
}
