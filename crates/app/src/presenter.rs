//! Mechanical binding of record sequences to display rows.
//!
//! A presenter owns an ordered dataset and renders rows on demand; it
//! has no business logic and never reorders what it is given.

use studycircle_core::{Group, StudyPlan, StudyStep, Task};

/// Binds an ordered sequence of records to display rows.
pub struct ListPresenter<T> {
    items: Vec<T>,
    bind: fn(&T) -> String,
}

impl<T> ListPresenter<T> {
    /// An empty presenter with the given row binder.
    pub fn new(bind: fn(&T) -> String) -> Self {
        Self {
            items: Vec::new(),
            bind,
        }
    }

    /// Replace the dataset.
    pub fn update(&mut self, items: Vec<T>) {
        self.items = items;
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Render one row on demand.
    pub fn row(&self, index: usize) -> Option<String> {
        self.items.get(index).map(|item| (self.bind)(item))
    }

    /// Render every row, in dataset order.
    pub fn rows(&self) -> Vec<String> {
        self.items.iter().map(|item| (self.bind)(item)).collect()
    }

    /// The record behind a row, for click handling.
    pub fn item(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }
}

/// `[x] Title (due 2026-03-01)` / `[ ] Title (due 2026-03-01)`.
pub fn task_row(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    format!("[{mark}] {} (due {})", task.title, task.due_date)
}

/// `Name [group-id]`. The id is shown so it can be shared for joining.
pub fn group_row(group: &Group) -> String {
    format!("{} [{}]", group.name, group.id)
}

pub fn plan_row(plan: &StudyPlan) -> String {
    plan.title.clone()
}

/// `Title (due 2026-05-20)`.
pub fn step_row(step: &StudyStep) -> String {
    format!("{} (due {})", step.title, step.due_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, completed: bool) -> Task {
        Task {
            id: 1,
            title: title.to_string(),
            due_date: "2026-03-01".parse().unwrap(),
            completed,
            user_id: "u-1".to_string(),
        }
    }

    #[test]
    fn test_task_rows() {
        assert_eq!(task_row(&task("Read", false)), "[ ] Read (due 2026-03-01)");
        assert_eq!(task_row(&task("Read", true)), "[x] Read (due 2026-03-01)");
    }

    #[test]
    fn test_presenter_preserves_order() {
        let mut presenter = ListPresenter::new(task_row);
        assert!(presenter.is_empty());

        presenter.update(vec![task("b", false), task("a", true)]);
        assert_eq!(presenter.len(), 2);
        assert_eq!(presenter.row(0).unwrap(), "[ ] b (due 2026-03-01)");
        assert_eq!(presenter.row(1).unwrap(), "[x] a (due 2026-03-01)");
        assert_eq!(presenter.row(2), None);
        assert_eq!(presenter.rows().len(), 2);
    }
}
