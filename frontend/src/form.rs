use shared::{Priority, Task, TaskInput};
use uuid::Uuid;

/// State of the create/edit modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub editing: Option<Uuid>,
    pub input: TaskInput,
}

impl TaskForm {
    pub fn create(default_category: Option<Uuid>) -> Self {
        Self {
            editing: None,
            input: TaskInput {
                category_id: default_category,
                priority: Some(Priority::Medium),
                ..TaskInput::default()
            },
        }
    }

    pub fn edit(task: &Task) -> Self {
        Self {
            editing: Some(task.id),
            input: TaskInput::from_task(task),
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.input.title.trim().is_empty()
    }

    pub fn heading(&self) -> &'static str {
        if self.editing.is_some() {
            "Edit Task"
        } else {
            "Create New Task"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing.is_some() {
            "Update Task"
        } else {
            "Create Task"
        }
    }

    pub fn priority(&self) -> Priority {
        self.input.priority.unwrap_or_default()
    }
}

/// Closes the modal once the save it submitted is confirmed. `saved` is the
/// edited task id, or `None` for a create. A failed save keeps the input.
pub fn settle_form<T, E>(form: &mut Option<TaskForm>, saved: Option<Uuid>, result: &Result<T, E>) {
    if result.is_ok() && form.as_ref().is_some_and(|open| open.editing == saved) {
        *form = None;
    }
}

/// Clears the quick-add box once its task is created.
pub fn settle_quick_add<T, E>(title: &mut Option<String>, result: &Result<T, E>) {
    if result.is_ok() {
        *title = None;
    }
}
