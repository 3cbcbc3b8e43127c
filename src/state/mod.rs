//! Headless page state: the generic list/dialog container, per-entity
//! filters and forms, command execution, dashboard and report state.
//!
//! Nothing in here touches egui; the `ui` module renders these types and
//! feeds user input back into them.

pub mod dashboard;
pub mod entity;
pub mod executor;
pub mod filters;
pub mod forms;
pub mod list;
pub mod lookup;
pub mod reports;
pub mod repository;

#[cfg(test)]
mod tests;

pub use entity::{Entity, EntityFilter, EntityForm};
pub use executor::execute;
pub use list::{Command, DialogMode, DialogPhase, DialogState, Event, ListState, Outcome, PendingDelete};
pub use repository::Repository;
