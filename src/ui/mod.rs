//! GUI panels and application state.

pub mod alunos_panel;
pub mod app;
pub mod chamadas_panel;
pub mod components;
pub mod dashboard;
pub mod list_page;
pub mod mentores_panel;
pub mod presencas_panel;
pub mod reports_panel;
pub mod settings_panel;
pub mod turmas_panel;

pub use app::{App, Panel};
