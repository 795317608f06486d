use crate::day::DayKey;
use crate::models::{Meal, RawNumber};

pub fn todays_meals<'a>(meals: &'a [Meal], today: &'a DayKey) -> impl Iterator<Item = &'a Meal> + 'a {
    meals.iter().filter(move |meal| meal.date == *today)
}

pub fn add_meal(meals: &mut Vec<Meal>, calories: i64, protein: i64, today: &DayKey) -> bool {
    let (Some(calories), Some(protein)) = (positive(calories), positive(protein)) else {
        return false;
    };
    meals.push(Meal {
        calories,
        protein,
        date: today.clone(),
    });
    true
}

/// Adds a meal from unparsed input; anything that is not a positive integer is ignored.
pub fn add_meal_raw(
    meals: &mut Vec<Meal>,
    calories: Option<&RawNumber>,
    protein: Option<&RawNumber>,
    today: &DayKey,
) -> bool {
    let calories = calories.and_then(RawNumber::leading_integer);
    let protein = protein.and_then(RawNumber::leading_integer);
    match (calories, protein) {
        (Some(calories), Some(protein)) => add_meal(meals, calories, protein, today),
        _ => false,
    }
}

pub fn totals(meals: &[Meal], today: &DayKey) -> (u64, u64) {
    todays_meals(meals, today).fold((0u64, 0u64), |(calories, protein), meal| {
        (
            calories.saturating_add(u64::from(meal.calories)),
            protein.saturating_add(u64::from(meal.protein)),
        )
    })
}

/// `today_index` counts only meals dated `today`; entries from other days are
/// skipped and never removed.
pub fn delete_by_today_index(meals: &mut Vec<Meal>, today: &DayKey, today_index: usize) -> Option<Meal> {
    let position = meals
        .iter()
        .enumerate()
        .filter(|(_, meal)| meal.date == *today)
        .nth(today_index)
        .map(|(position, _)| position)?;
    Some(meals.remove(position))
}

fn positive(value: i64) -> Option<u32> {
    u32::try_from(value).ok().filter(|value| *value > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(calories: u32, protein: u32, date: &str) -> Meal {
        Meal {
            calories,
            protein,
            date: DayKey::from(date),
        }
    }

    const TODAY: &str = "2026-01-05";
    const YESTERDAY: &str = "2026-01-04";

    #[test]
    fn delete_by_today_index_skips_other_days() {
        let today = DayKey::from(TODAY);
        let mut meals = vec![
            meal(100, 10, YESTERDAY),
            meal(200, 20, TODAY),
            meal(300, 30, YESTERDAY),
            meal(400, 40, TODAY),
        ];

        let removed = delete_by_today_index(&mut meals, &today, 1);
        assert_eq!(removed, Some(meal(400, 40, TODAY)));
        assert_eq!(
            meals,
            vec![meal(100, 10, YESTERDAY), meal(200, 20, TODAY), meal(300, 30, YESTERDAY)]
        );
    }

    #[test]
    fn delete_by_today_index_out_of_range_is_a_no_op() {
        let today = DayKey::from(TODAY);
        let mut meals = vec![meal(100, 10, YESTERDAY), meal(200, 20, TODAY)];
        assert_eq!(delete_by_today_index(&mut meals, &today, 1), None);
        assert_eq!(meals.len(), 2);
    }

    #[test]
    fn totals_only_count_today() {
        let today = DayKey::from(TODAY);
        let mut meals = vec![meal(500, 35, TODAY), meal(650, 40, TODAY)];
        assert_eq!(totals(&meals, &today), (1150, 75));

        meals.push(meal(900, 60, YESTERDAY));
        assert_eq!(totals(&meals, &today), (1150, 75));
        assert_eq!(todays_meals(&meals, &today).count(), 2);
    }

    #[test]
    fn add_rejects_non_positive_values() {
        let today = DayKey::from(TODAY);
        let mut meals = Vec::new();
        assert!(!add_meal(&mut meals, 0, 20, &today));
        assert!(!add_meal(&mut meals, 300, -1, &today));
        assert!(meals.is_empty());

        assert!(add_meal(&mut meals, 300, 25, &today));
        assert_eq!(meals, vec![meal(300, 25, TODAY)]);
    }

    #[test]
    fn add_raw_parses_integer_prefix() {
        let today = DayKey::from(TODAY);
        let mut meals = Vec::new();
        let calories = RawNumber::Text("450kcal".into());
        let protein = RawNumber::Text("abc".into());
        assert!(!add_meal_raw(&mut meals, Some(&calories), Some(&protein), &today));
        assert!(!add_meal_raw(&mut meals, Some(&calories), None, &today));

        let protein = RawNumber::Int(32);
        assert!(add_meal_raw(&mut meals, Some(&calories), Some(&protein), &today));
        assert_eq!(meals, vec![meal(450, 32, TODAY)]);
    }
}
