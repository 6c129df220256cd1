//! Level map core for tidemap: data model, layout engine, view state
//! machine, and the transforms that turn them into render commands.

pub mod config;
pub mod content;
pub mod layout;
pub mod model;
pub mod state;
pub mod svg;
pub mod views;

pub use config::{AppConfig, LayoutConfig, ThemeMode};
pub use layout::{MapLayout, compute_layout};
pub use model::{LevelRecord, LevelStatus};
pub use state::{MapRenderer, Screen, ScrollLock, ViewMachine, ViewState};
