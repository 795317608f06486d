use crate::day::DayKey;
use crate::errors::AppError;
use crate::goals::clamp_goals;
use crate::models::{StateDocument, StoredDocument};
use crate::rollover::{apply_rollover_if_stale, MealPolicy};
use std::path::Path;
use tokio::fs;
use tracing::{error, info};

/// Bump alongside breaking changes to the document layout; additive fields
/// are covered by merging over defaults.
pub const STORAGE_FILE: &str = "state.v1.json";

pub async fn load_state(path: &Path) -> StateDocument {
    load_state_at(path, &DayKey::today()).await
}

pub async fn load_state_at(path: &Path, today: &DayKey) -> StateDocument {
    let stored = match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<StoredDocument>(&bytes) {
            Ok(stored) => Some(stored),
            Err(err) => {
                error!("failed to parse data file: {err}");
                None
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            error!("failed to read data file: {err}");
            None
        }
    };

    match stored {
        Some(stored) => restore(stored, today),
        None => StateDocument::fresh(today.clone()),
    }
}

pub fn restore(stored: StoredDocument, today: &DayKey) -> StateDocument {
    let mut doc = stored.merge_over(StateDocument::fresh(today.clone()));
    clamp_goals(&mut doc.goals);
    if apply_rollover_if_stale(&mut doc, today, MealPolicy::KeepToday) {
        info!(day = %today, "applied catch-up rollover on load");
    }
    doc
}

pub async fn persist_state(path: &Path, doc: &StateDocument) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(doc).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Goals, Meal, Task};

    const TODAY: &str = "2026-01-05";

    async fn load_json(json: &str) -> StateDocument {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE);
        std::fs::write(&path, json).unwrap();
        load_state_at(&path, &DayKey::from(TODAY)).await
    }

    #[tokio::test]
    async fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let doc = load_state_at(&dir.path().join(STORAGE_FILE), &DayKey::from(TODAY)).await;
        assert_eq!(doc, StateDocument::fresh(DayKey::from(TODAY)));
    }

    #[tokio::test]
    async fn corrupt_file_yields_defaults() {
        assert_eq!(load_json("{not json").await, StateDocument::fresh(DayKey::from(TODAY)));
        assert_eq!(
            load_json(r#"{"tasks": "nope"}"#).await,
            StateDocument::fresh(DayKey::from(TODAY))
        );
    }

    #[tokio::test]
    async fn partial_document_is_merged_and_clamped() {
        let doc = load_json(r#"{"goals": {"calories": 12000}, "lastReset": "2026-01-05"}"#).await;
        assert_eq!(doc.goals, Goals { calories: 6000, protein: 150 });
        assert!(doc.tasks.is_empty());
        assert!(doc.reset_meals_daily);
        assert_eq!(doc.last_reset.as_str(), TODAY);

        let doc = load_json(r#"{"goals": {"calories": 10, "protein": 9000}}"#).await;
        assert_eq!(doc.goals, Goals { calories: 1000, protein: 400 });
    }

    #[tokio::test]
    async fn stale_document_gets_catch_up_rollover() {
        let doc = load_json(
            r#"{
                "tasks": [{"text": "Run", "done": true}],
                "meals": [
                    {"calories": 500, "protein": 30, "date": "2026-01-04"},
                    {"calories": 250, "protein": 20, "date": "2026-01-05"}
                ],
                "resetMealsDaily": true,
                "lastReset": "2026-01-04"
            }"#,
        )
        .await;
        assert_eq!(doc.tasks, vec![Task { text: "Run".into(), done: false }]);
        assert_eq!(
            doc.meals,
            vec![Meal { calories: 250, protein: 20, date: DayKey::from(TODAY) }]
        );
        assert_eq!(doc.last_reset.as_str(), TODAY);
    }

    #[tokio::test]
    async fn settled_document_keeps_done_flags() {
        let doc = load_json(
            r#"{"tasks": [{"text": "Run", "done": true}], "lastReset": "2026-01-05"}"#,
        )
        .await;
        assert!(doc.tasks[0].done);
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE);
        let today = DayKey::from(TODAY);

        let mut doc = StateDocument::fresh(today.clone());
        doc.reset_meals_daily = false;
        doc.tasks.push(Task { text: "Stretch".into(), done: true });
        doc.meals.push(Meal { calories: 700, protein: 45, date: DayKey::from("2026-01-03") });
        persist_state(&path, &doc).await.unwrap();

        let first = load_state_at(&path, &today).await;
        persist_state(&path, &first).await.unwrap();
        let second = load_state_at(&path, &today).await;
        assert_eq!(first, doc);
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn persisted_layout_uses_camel_case_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(STORAGE_FILE);
        persist_state(&path, &StateDocument::fresh(DayKey::from(TODAY))).await.unwrap();

        let value: serde_json::Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(value["resetMealsDaily"], true);
        assert_eq!(value["lastReset"], TODAY);
        assert_eq!(value["goals"]["calories"], 3000);
    }
}
