//! Records exchanged verbatim with the backend.
//!
//! The backend is the only source of truth; these types are read/write
//! copies held for the lifetime of one view.

mod category;
mod event;
mod task;
mod user;

pub use category::{is_hex_color, Category, CategoryDraft, DEFAULT_CATEGORY_COLOR};
pub use event::{Event, EventDraft, EventPatch};
pub use task::{EnergyLevel, Task, TaskDraft, TaskPatch, TaskStatus};
pub use user::{LoginResponse, PushKeys, PushSubscription, Registration, User, UserUpdate};

/// Records that carry a backend id.
pub trait HasId {
    fn id(&self) -> i64;
}

/// Replace the entry whose id matches `updated` with the server's copy.
///
/// Other entries are left untouched. Returns false when no entry matched.
pub fn replace_by_id<T: HasId>(items: &mut [T], updated: T) -> bool {
    match items.iter_mut().find(|item| item.id() == updated.id()) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

/// Remove exactly the entry with `id`. Returns the removed entry.
pub fn remove_by_id<T: HasId>(items: &mut Vec<T>, id: i64) -> Option<T> {
    let index = items.iter().position(|item| item.id() == id)?;
    Some(items.remove(index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: i64, done: bool) -> Task {
        Task {
            id,
            title: format!("task {id}"),
            energy_required: EnergyLevel::Medium,
            deadline: None,
            planned_start: None,
            planned_end: None,
            is_completed: done,
            status: TaskStatus::Pending,
            user_id: Some(1),
        }
    }

    fn category(id: i64) -> Category {
        Category {
            id,
            name: format!("cat {id}"),
            color_hex: DEFAULT_CATEGORY_COLOR.into(),
            user_id: None,
        }
    }

    #[test]
    fn toggling_completion_touches_only_that_task() {
        let mut tasks = vec![task(1, false), task(2, false), task(3, true)];
        let before = tasks.clone();

        let mut toggled = task(2, true);
        toggled.status = TaskStatus::Completed;
        assert!(replace_by_id(&mut tasks, toggled.clone()));

        assert_eq!(tasks[0], before[0]);
        assert_eq!(tasks[1], toggled);
        assert_eq!(tasks[2], before[2]);
    }

    #[test]
    fn replace_reports_missing_entry() {
        let mut tasks = vec![task(1, false)];
        assert!(!replace_by_id(&mut tasks, task(9, true)));
        assert_eq!(tasks, vec![task(1, false)]);
    }

    #[test]
    fn deleting_category_removes_exactly_one_chip() {
        let mut chips: Vec<Category> = (1..=6).map(category).collect();
        let events_referencing = vec![5_i64, 5, 2];

        let removed = remove_by_id(&mut chips, 5).unwrap();
        assert_eq!(removed.id, 5);
        assert_eq!(chips.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 6]);
        assert_eq!(events_referencing, vec![5, 5, 2]);
        assert!(remove_by_id(&mut chips, 5).is_none());
    }
}
