//! Feature modules - business logic separated from UI
//!
//! Each feature module contains the core logic for a specific functionality.
//! Features should not depend on UI components directly.

pub mod notifier;
pub mod preview;
pub mod records;
pub mod settings;
pub mod slug;
pub mod submission;

pub use settings::Settings;
