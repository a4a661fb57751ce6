//! Admin server API
//!
//! Provides the cookie-authenticated client used for login, the dashboard
//! listing and as the [`Transport`](crate::features::submission::Transport)
//! behind every form submission.

mod admin;

pub use admin::AdminClient;
