//! UI Components module - application-specific composite components
//!
//! Components combine widgets with `crate::app::Message` handling. They are
//! the only UI layer that imports from `crate::app`.

pub mod delete_image_dialog;
pub mod header;
pub mod image_card;
