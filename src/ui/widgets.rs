//! Reusable UI widgets - composable pieces without business logic
//!
//! Widgets take generic message types or callbacks and never import
//! `crate::app`. Components (`crate::ui::components`) build on them.

mod form_field;
mod image_preview;
mod toast;

pub use form_field::form_field;
pub use image_preview::image_preview;
pub use toast::view_toast;
