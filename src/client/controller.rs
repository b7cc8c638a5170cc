use uuid::Uuid;

use crate::model::{Task, UpdateTask};

/// Input focus of the terminal client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
}

/// Inline edit in progress for one task.
#[derive(Debug, Clone)]
pub struct EditState {
    pub id: Uuid,
    pub draft: String,
}

/// A network intent produced by a user action. The event loop turns these
/// into API calls; the controller itself never touches the network.
#[derive(Debug)]
pub enum Request {
    Load,
    Create {
        title: String,
    },
    Update {
        id: Uuid,
        patch: UpdateTask,
        from_edit: bool,
    },
    Delete {
        id: Uuid,
    },
}

/// The resolved outcome of one in-flight request, applied back to the
/// controller in arrival order. Overlapping requests are independent, so
/// for a given id the last completion's merge wins.
#[derive(Debug)]
pub enum Completion {
    Loaded(Result<Vec<Task>, String>),
    Created(Result<Task, String>),
    Updated {
        id: Uuid,
        from_edit: bool,
        result: Result<Task, String>,
    },
    Deleted {
        id: Uuid,
        result: Result<(), String>,
    },
}

/// Owns the authoritative in-memory task collection and the transient UI
/// state around it. The event loop is the only caller, so the controller
/// is the sole writer of everything here.
#[derive(Default)]
pub struct Controller {
    tasks: Vec<Task>,
    input: String,
    editing: Option<EditState>,
    selected: usize,
    mode: Mode,
    loading: bool,
    error: Option<String>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    // ----- actions ---------------------------------------------------------

    /// Fetch the full list. Used for the initial sync and manual refresh.
    pub fn load(&mut self) -> Request {
        self.loading = true;
        self.error = None;
        Request::Load
    }

    /// Turn the input buffer into a create request, or nothing if blank.
    /// The buffer is cleared only when the create succeeds.
    pub fn submit_input(&self) -> Option<Request> {
        let title = self.input.trim();
        if title.is_empty() {
            return None;
        }
        Some(Request::Create {
            title: title.to_string(),
        })
    }

    /// Flip `completed` for the given task, based on its current value.
    pub fn toggle(&self, id: Uuid) -> Option<Request> {
        let task = self.tasks.iter().find(|task| task.id == id)?;
        Some(Request::Update {
            id,
            patch: UpdateTask {
                title: None,
                completed: Some(!task.completed),
            },
            from_edit: false,
        })
    }

    /// Enter edit mode for a task, prefilling the draft with its title.
    pub fn start_edit(&mut self, id: Uuid) {
        if let Some(task) = self.tasks.iter().find(|task| task.id == id) {
            self.editing = Some(EditState {
                id,
                draft: task.title.clone(),
            });
        }
    }

    /// Save the draft. A blank draft is a no-op rather than a guaranteed
    /// validation round trip; the user stays in edit mode.
    pub fn save_edit(&self) -> Option<Request> {
        let editing = self.editing.as_ref()?;
        let title = editing.draft.trim();
        if title.is_empty() {
            return None;
        }
        Some(Request::Update {
            id: editing.id,
            patch: UpdateTask {
                title: Some(title.to_string()),
                completed: None,
            },
            from_edit: true,
        })
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn delete(&self, id: Uuid) -> Request {
        Request::Delete { id }
    }

    // ----- completions -----------------------------------------------------

    pub fn apply(&mut self, completion: Completion) {
        match completion {
            Completion::Loaded(Ok(tasks)) => {
                self.tasks = tasks;
                self.loading = false;
                self.clamp_selection();
            }
            Completion::Loaded(Err(message)) => {
                self.loading = false;
                self.error = Some(message);
            }
            Completion::Created(Ok(task)) => {
                self.tasks.push(task);
                self.input.clear();
            }
            Completion::Created(Err(message)) => {
                self.error = Some(message);
            }
            Completion::Updated {
                id,
                from_edit,
                result: Ok(task),
            } => {
                if let Some(existing) = self.tasks.iter_mut().find(|task| task.id == id) {
                    *existing = task;
                }
                if from_edit && self.editing.as_ref().is_some_and(|edit| edit.id == id) {
                    self.editing = None;
                }
            }
            Completion::Updated {
                result: Err(message),
                ..
            } => {
                // A failed save keeps the draft and edit mode intact.
                self.error = Some(message);
            }
            Completion::Deleted { id, result: Ok(()) } => {
                self.tasks.retain(|task| task.id != id);
                if self.editing.as_ref().is_some_and(|edit| edit.id == id) {
                    self.editing = None;
                }
                self.clamp_selection();
            }
            Completion::Deleted {
                result: Err(message),
                ..
            } => {
                self.error = Some(message);
            }
        }
    }

    // ----- text entry ------------------------------------------------------

    pub fn push_input_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn backspace_input(&mut self) {
        self.input.pop();
    }

    pub fn push_draft_char(&mut self, c: char) {
        if let Some(edit) = self.editing.as_mut() {
            edit.draft.push(c);
        }
    }

    pub fn backspace_draft(&mut self) {
        if let Some(edit) = self.editing.as_mut() {
            edit.draft.pop();
        }
    }

    // ----- selection & mode ------------------------------------------------

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.tasks.len() {
            self.selected = self.tasks.len().saturating_sub(1);
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn enter_insert(&mut self) {
        self.mode = Mode::Insert;
    }

    pub fn leave_insert(&mut self) {
        self.mode = Mode::Normal;
    }

    // ----- snapshot accessors ----------------------------------------------

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn editing(&self) -> Option<&EditState> {
        self.editing.as_ref()
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // ----- derived statistics ----------------------------------------------

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    pub fn remaining_count(&self) -> usize {
        self.tasks.len() - self.completed_count()
    }

    pub fn percent_complete(&self) -> u32 {
        if self.tasks.is_empty() {
            return 0;
        }
        let ratio = self.completed_count() as f64 / self.tasks.len() as f64;
        (ratio * 100.0).round() as u32
    }
}
