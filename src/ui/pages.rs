//! Pages module
//! Full-window views, one per screen

pub mod dashboard;
pub mod editor;
pub mod login;
