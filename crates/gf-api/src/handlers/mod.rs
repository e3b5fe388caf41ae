//! Request handlers, one module per resource.

pub mod announcements;
pub mod auth;
pub mod content;
pub mod meetings;
pub mod reflections;
pub mod reports;
pub mod tasks;
pub mod teams;
pub mod uploads;
pub mod users;
