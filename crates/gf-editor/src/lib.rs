//! # gf-editor
//!
//! The client-side state managers: the content-block page editor, the kanban
//! task board, and the meeting-registration form. All three are pure
//! in-memory state machines; their outputs are the wire payloads and HTML a
//! frontend would ship to or render from the REST API.

mod page_editor;
mod registration;
mod task_board;

pub use page_editor::{BlockId, Direction, PageEditor};
pub use registration::{is_speaker_role, RegistrationForm};
pub use task_board::{Lanes, StatusChange, TaskBoard, TeamFilter};
