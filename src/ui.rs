use crate::day::DayKey;
use crate::goals::{progress, CALORIE_RANGE, PROTEIN_RANGE};
use crate::meals::todays_meals;
use crate::models::{RingProgress, StateDocument};
use std::f64::consts::PI;
use std::fmt::Write as _;

const RING_RADIUS: f64 = 54.0;

pub fn render_index(doc: &StateDocument, today: &DayKey) -> String {
    let view = progress(doc, today);
    INDEX_HTML
        .replace("{{DATE}}", today.as_str())
        .replace("{{CAL_RING}}", &render_ring(&view.calories, "cal", "ring-cal"))
        .replace("{{PRO_RING}}", &render_ring(&view.protein, "g protein", "ring-pro"))
        .replace("{{TASKS}}", &render_tasks(doc))
        .replace("{{MEALS}}", &render_meals(doc, today))
        .replace("{{CAL_GOAL}}", &doc.goals.calories.to_string())
        .replace("{{PRO_GOAL}}", &doc.goals.protein.to_string())
        .replace("{{CAL_MIN}}", &CALORIE_RANGE.start().to_string())
        .replace("{{CAL_MAX}}", &CALORIE_RANGE.end().to_string())
        .replace("{{PRO_MIN}}", &PROTEIN_RANGE.start().to_string())
        .replace("{{PRO_MAX}}", &PROTEIN_RANGE.end().to_string())
        .replace("{{RESET_CHECKED}}", if doc.reset_meals_daily { "checked" } else { "" })
}

/// The arc sweep is `ratio * 360°`, drawn by offsetting a dashed circle stroke.
pub fn render_ring(ring: &RingProgress, unit: &str, class: &str) -> String {
    let circumference = 2.0 * PI * RING_RADIUS;
    let offset = circumference * (1.0 - ring.ratio);
    format!(
        r#"<figure class="ring {class}">
  <svg viewBox="0 0 140 140" role="img" aria-label="{percent}% of goal">
    <circle class="track" cx="70" cy="70" r="{RING_RADIUS}" />
    <circle class="arc" cx="70" cy="70" r="{RING_RADIUS}" stroke-dasharray="{circumference:.2}" stroke-dashoffset="{offset:.2}" transform="rotate(-90 70 70)" />
  </svg>
  <figcaption>{total} / {goal} {unit}</figcaption>
</figure>"#,
        percent = (ring.ratio * 100.0).round(),
        total = ring.total,
        goal = ring.goal,
    )
}

fn render_tasks(doc: &StateDocument) -> String {
    if doc.tasks.is_empty() {
        return r#"<li class="empty">No tasks yet.</li>"#.to_string();
    }

    let mut html = String::new();
    for (index, task) in doc.tasks.iter().enumerate() {
        let text = escape_html(&task.text);
        let _ = write!(
            html,
            r#"<li class="{done_class}">
  <span class="task-text">{text}</span>
  <form method="post" action="/tasks/{index}/toggle"><button type="submit">{toggle}</button></form>
  <form method="post" action="/tasks/{index}/edit" class="inline"><input name="text" value="{text}" aria-label="Edit task" /><button type="submit">Save</button></form>
  <form method="post" action="/tasks/{index}/delete"><button type="submit" class="danger">Delete</button></form>
</li>"#,
            done_class = if task.done { "task-done" } else { "" },
            toggle = if task.done { "Undo" } else { "Done" },
        );
    }
    html
}

fn render_meals(doc: &StateDocument, today: &DayKey) -> String {
    let mut html = String::new();
    for (index, meal) in todays_meals(&doc.meals, today).enumerate() {
        let _ = write!(
            html,
            r#"<li><span>{} cal &bull; {} g</span><form method="post" action="/meals/{index}/delete"><button type="submit" class="danger" title="Delete meal">Delete</button></form></li>"#,
            meal.calories, meal.protein,
        );
    }
    if html.is_empty() {
        html.push_str(r#"<li class="empty">No meals logged today.</li>"#);
    }
    html
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Vital Edge</title>
  <style>
    :root {
      --bg: #0f1115;
      --card: #181b22;
      --ink: #e9ecf2;
      --muted: #8a90a0;
      --accent: #5b7cfa;
      --accent-2: #8c5bfa;
      --ring-track: #222632;
      --danger: #e0565b;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      display: grid;
      gap: 24px;
    }

    section {
      background: var(--card);
      border-radius: 20px;
      padding: 22px;
      display: grid;
      gap: 14px;
    }

    h1, h2 {
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: var(--muted);
    }

    .rings {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .ring {
      margin: 0;
      display: grid;
      justify-items: center;
      gap: 8px;
    }

    .ring svg {
      width: 140px;
      height: 140px;
    }

    .ring circle {
      fill: none;
      stroke-width: 14;
      stroke-linecap: round;
    }

    .ring .track {
      stroke: var(--ring-track);
    }

    .ring-cal .arc {
      stroke: var(--accent);
    }

    .ring-pro .arc {
      stroke: var(--accent-2);
    }

    ul {
      list-style: none;
      margin: 0;
      padding: 0;
      display: grid;
      gap: 10px;
    }

    li {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      gap: 10px;
    }

    li .task-text,
    li > span {
      flex: 1;
    }

    li.empty {
      color: var(--muted);
    }

    .task-done .task-text {
      text-decoration: line-through;
      color: var(--muted);
    }

    form {
      display: flex;
      gap: 8px;
      margin: 0;
    }

    input {
      background: #11131a;
      border: 1px solid #2a2f3c;
      border-radius: 10px;
      color: var(--ink);
      padding: 8px 10px;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 8px 14px;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    button.danger {
      background: var(--danger);
    }

    label {
      display: flex;
      align-items: center;
      gap: 10px;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Vital Edge</h1>
      <p class="subtitle">Today is {{DATE}}. Completed tasks reset at midnight.</p>
    </header>

    <section>
      <h2>Progress</h2>
      <div class="rings">
        {{CAL_RING}}
        {{PRO_RING}}
      </div>
    </section>

    <section>
      <h2>Tasks</h2>
      <ul id="task-list">
        {{TASKS}}
      </ul>
      <form method="post" action="/tasks">
        <input name="text" placeholder="New task" aria-label="New task" />
        <button type="submit">Add</button>
      </form>
    </section>

    <section>
      <h2>Meals today</h2>
      <ul id="meal-list">
        {{MEALS}}
      </ul>
      <form method="post" action="/meals">
        <input name="calories" inputmode="numeric" placeholder="Calories" aria-label="Calories" />
        <input name="protein" inputmode="numeric" placeholder="Protein (g)" aria-label="Protein" />
        <button type="submit">Log meal</button>
      </form>
    </section>

    <section>
      <h2>Settings</h2>
      <form method="post" action="/settings" style="flex-direction: column;">
        <label>Calorie goal
          <input type="number" name="calories" min="{{CAL_MIN}}" max="{{CAL_MAX}}" value="{{CAL_GOAL}}" />
        </label>
        <label>Protein goal (g)
          <input type="number" name="protein" min="{{PRO_MIN}}" max="{{PRO_MAX}}" value="{{PRO_GOAL}}" />
        </label>
        <label>
          <input type="checkbox" name="resetMealsDaily" value="true" {{RESET_CHECKED}} />
          Clear meals every day
        </label>
        <button type="submit">Save settings</button>
      </form>
    </section>
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Meal, Task};

    #[test]
    fn index_lists_only_todays_meals_with_today_indices() {
        let today = DayKey::from("2026-01-05");
        let mut doc = StateDocument::fresh(today.clone());
        doc.meals = vec![
            Meal { calories: 111, protein: 11, date: DayKey::from("2026-01-04") },
            Meal { calories: 222, protein: 22, date: today.clone() },
        ];

        let html = render_index(&doc, &today);
        assert!(html.contains("222 cal"));
        assert!(!html.contains("111 cal"));
        assert!(html.contains(r#"action="/meals/0/delete""#));
        assert!(!html.contains(r#"action="/meals/1/delete""#));
    }

    #[test]
    fn task_text_is_escaped() {
        let today = DayKey::from("2026-01-05");
        let mut doc = StateDocument::fresh(today.clone());
        doc.tasks.push(Task { text: "<b>lift</b>".into(), done: true });

        let html = render_index(&doc, &today);
        assert!(html.contains("&lt;b&gt;lift&lt;/b&gt;"));
        assert!(html.contains("task-done"));
        assert!(html.contains(">Undo<"));
    }

    #[test]
    fn ring_offset_tracks_ratio() {
        let full = RingProgress { total: 4000, goal: 3000, ratio: 1.0 };
        assert!(render_ring(&full, "cal", "ring-cal").contains(r#"stroke-dashoffset="0.00""#));

        let empty = RingProgress { total: 0, goal: 3000, ratio: 0.0 };
        let html = render_ring(&empty, "cal", "ring-cal");
        assert!(html.contains("0 / 3000 cal"));
        assert!(html.contains("0% of goal"));
    }
}
