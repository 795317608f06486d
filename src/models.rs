use crate::day::DayKey;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CALORIE_GOAL: i64 = 3000;
pub const DEFAULT_PROTEIN_GOAL: i64 = 150;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub text: String,
    pub done: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub calories: u32,
    pub protein: u32,
    pub date: DayKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Goals {
    pub calories: i64,
    pub protein: i64,
}

impl Default for Goals {
    fn default() -> Self {
        Self {
            calories: DEFAULT_CALORIE_GOAL,
            protein: DEFAULT_PROTEIN_GOAL,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDocument {
    pub tasks: Vec<Task>,
    pub meals: Vec<Meal>,
    pub goals: Goals,
    pub reset_meals_daily: bool,
    pub last_reset: DayKey,
}

impl StateDocument {
    pub fn fresh(today: DayKey) -> Self {
        Self {
            tasks: Vec::new(),
            meals: Vec::new(),
            goals: Goals::default(),
            reset_meals_daily: true,
            last_reset: today,
        }
    }
}

/// On-disk shape where every top-level field is optional, so older or partial
/// documents can be layered over the defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub tasks: Option<Vec<Task>>,
    pub meals: Option<Vec<Meal>>,
    pub goals: Option<Goals>,
    pub reset_meals_daily: Option<bool>,
    pub last_reset: Option<DayKey>,
}

impl StoredDocument {
    pub fn merge_over(self, defaults: StateDocument) -> StateDocument {
        StateDocument {
            tasks: self.tasks.unwrap_or(defaults.tasks),
            meals: self.meals.unwrap_or(defaults.meals),
            goals: self.goals.unwrap_or(defaults.goals),
            reset_meals_daily: self.reset_meals_daily.unwrap_or(defaults.reset_meals_daily),
            last_reset: self.last_reset.unwrap_or(defaults.last_reset),
        }
    }
}

/// A form or JSON value that may arrive as a number or as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

impl RawNumber {
    /// Integer prefix parse: leading whitespace, optional sign, then digits.
    pub fn leading_integer(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Float(value) if value.is_finite() => Some(value.trunc() as i64),
            Self::Float(_) => None,
            Self::Text(text) => {
                let text = text.trim_start();
                let (negative, rest) = match text.as_bytes().first() {
                    Some(b'-') => (true, &text[1..]),
                    Some(b'+') => (false, &text[1..]),
                    _ => (false, text),
                };
                let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
                let value: i64 = digits.parse().ok()?;
                Some(if negative { -value } else { value })
            }
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        let value = match self {
            Self::Int(value) => *value as f64,
            Self::Float(value) => *value,
            Self::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    0.0
                } else {
                    text.parse().ok()?
                }
            }
        };
        value.is_finite().then_some(value)
    }
}

#[derive(Debug, Deserialize)]
pub struct TaskTextRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct MealRequest {
    pub calories: Option<RawNumber>,
    pub protein: Option<RawNumber>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsRequest {
    pub calories: Option<RawNumber>,
    pub protein: Option<RawNumber>,
    #[serde(alias = "reset_meals_daily")]
    pub reset_meals_daily: Option<RawFlag>,
}

/// Checkbox-style flag: forms send a string (or omit the field), JSON may send a bool.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawFlag {
    Bool(bool),
    Text(String),
}

impl RawFlag {
    pub fn is_set(&self) -> bool {
        match self {
            Self::Bool(value) => *value,
            Self::Text(text) => matches!(
                text.trim().to_ascii_lowercase().as_str(),
                "true" | "on" | "1" | "yes"
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RingProgress {
    pub total: u64,
    pub goal: i64,
    pub ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GoalProgressView {
    pub calories: RingProgress,
    pub protein: RingProgress,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayResponse {
    pub date: DayKey,
    pub tasks: Vec<Task>,
    pub meals: Vec<Meal>,
    pub total_calories: u64,
    pub total_protein: u64,
    pub goals: Goals,
    pub progress: GoalProgressView,
    pub reset_meals_daily: bool,
}
