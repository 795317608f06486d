use crate::models::Task;

pub fn add_task(tasks: &mut Vec<Task>, text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        return false;
    }
    tasks.push(Task {
        text: text.to_string(),
        done: false,
    });
    true
}

pub fn toggle_done(tasks: &mut [Task], index: usize) -> Option<bool> {
    let task = tasks.get_mut(index)?;
    task.done = !task.done;
    Some(task.done)
}

/// Blank replacement text leaves the task as it was and reports `Some(false)`.
pub fn edit_task(tasks: &mut [Task], index: usize, text: &str) -> Option<bool> {
    let task = tasks.get_mut(index)?;
    let text = text.trim();
    if text.is_empty() {
        return Some(false);
    }
    task.text = text.to_string();
    Some(true)
}

pub fn delete_task(tasks: &mut Vec<Task>, index: usize) -> Option<Task> {
    (index < tasks.len()).then(|| tasks.remove(index))
}
