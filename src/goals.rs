use crate::day::DayKey;
use crate::meals::totals;
use crate::models::{GoalProgressView, Goals, RingProgress, SettingsRequest, StateDocument};
use std::ops::RangeInclusive;

pub const CALORIE_RANGE: RangeInclusive<i64> = 1000..=6000;
pub const PROTEIN_RANGE: RangeInclusive<i64> = 50..=400;

pub fn ratio(total: u64, goal: i64) -> f64 {
    if goal <= 0 {
        return 0.0;
    }
    (total as f64 / goal as f64).clamp(0.0, 1.0)
}

pub fn clamp_goals(goals: &mut Goals) {
    goals.calories = clamp_to(goals.calories, &CALORIE_RANGE);
    goals.protein = clamp_to(goals.protein, &PROTEIN_RANGE);
}

pub fn progress(doc: &StateDocument, today: &DayKey) -> GoalProgressView {
    let (calories, protein) = totals(&doc.meals, today);
    GoalProgressView {
        calories: ring(calories, doc.goals.calories),
        protein: ring(protein, doc.goals.protein),
    }
}

/// Commits raw settings input: numbers are rounded and clamped, non-numeric
/// values keep the current goal, and a missing flag means unchecked.
pub fn apply_settings(doc: &mut StateDocument, input: &SettingsRequest) {
    if let Some(calories) = input.calories.as_ref().and_then(|raw| raw.as_number()) {
        doc.goals.calories = clamp_number(calories, &CALORIE_RANGE);
    }
    if let Some(protein) = input.protein.as_ref().and_then(|raw| raw.as_number()) {
        doc.goals.protein = clamp_number(protein, &PROTEIN_RANGE);
    }
    clamp_goals(&mut doc.goals);
    doc.reset_meals_daily = input
        .reset_meals_daily
        .as_ref()
        .is_some_and(|flag| flag.is_set());
}

fn ring(total: u64, goal: i64) -> RingProgress {
    RingProgress {
        total,
        goal,
        ratio: ratio(total, goal),
    }
}

fn clamp_to(value: i64, range: &RangeInclusive<i64>) -> i64 {
    value.clamp(*range.start(), *range.end())
}

fn clamp_number(value: f64, range: &RangeInclusive<i64>) -> i64 {
    value.round().clamp(*range.start() as f64, *range.end() as f64) as i64
}
