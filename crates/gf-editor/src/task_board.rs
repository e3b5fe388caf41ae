//! Kanban board state: one loaded task set, a client-side team filter, and
//! optimistic drag transitions.

use uuid::Uuid;

use gf_core::models::{Task, TaskStatus};

/// Which tasks the board shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamFilter {
    All,
    Team(Uuid),
}

impl TeamFilter {
    fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Team(id) => task.team.as_ref().is_some_and(|team| team.id == *id),
        }
    }
}

/// The single API call a lane transition requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub task_id: Uuid,
    pub from: TaskStatus,
    pub to: TaskStatus,
}

/// Visible tasks grouped into the three fixed lanes, preserving load order.
#[derive(Debug, Default)]
pub struct Lanes<'a> {
    pub todo: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
}

/// Board state over one fetched task set. Filtering is purely client-side;
/// changing the filter never refetches.
pub struct TaskBoard {
    tasks: Vec<Task>,
    filter: TeamFilter,
}

impl TaskBoard {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            filter: TeamFilter::All,
        }
    }

    /// Replaces board state with a freshly fetched task set.
    pub fn load(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    pub fn set_filter(&mut self, filter: TeamFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> TeamFilter {
        self.filter
    }

    /// The loaded tasks passing the current filter, in load order.
    pub fn visible(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| self.filter.matches(task))
            .collect()
    }

    pub fn lanes(&self) -> Lanes<'_> {
        let mut lanes = Lanes::default();
        for task in self.visible() {
            match task.status {
                TaskStatus::Todo => lanes.todo.push(task),
                TaskStatus::InProgress => lanes.in_progress.push(task),
                TaskStatus::Done => lanes.done.push(task),
            }
        }
        lanes
    }

    /// Starts a lane transition: flips the task's status locally and returns
    /// the one `update task` call the caller must make. Same-lane drops and
    /// unknown ids return None (no call). The local flip is optimistic and is
    /// NOT reverted if that call later fails; the stored status wins on the
    /// next load.
    pub fn begin_move(&mut self, task_id: Uuid, target: TaskStatus) -> Option<StatusChange> {
        let task = self.tasks.iter_mut().find(|task| task.id == task_id)?;
        if task.status == target {
            return None;
        }
        let from = task.status;
        task.status = target;
        Some(StatusChange {
            task_id,
            from,
            to: target,
        })
    }
}

impl Default for TaskBoard {
    fn default() -> Self {
        Self::new()
    }
}
