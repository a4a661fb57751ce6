//! UI module for the admin client
//!
//! # Architecture
//!
//! - **Widgets** (`widgets`): Composable UI patterns without business logic
//! - **Components** (`components`): Business-specific UI with Message handling
//! - **Pages** (`pages`): One full-window view per screen

pub mod animation;
pub mod components;
pub mod pages;
pub mod theme;
pub mod widgets;
