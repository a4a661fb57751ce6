//! Application messages

use std::path::PathBuf;

use super::EditorId;
use crate::api::AdminClient;
use crate::features::preview::SelectedImage;
use crate::features::records::{ImageRecord, StoredImage};

/// Application messages
#[derive(Clone)]
pub enum Message {
    /// Frame tick while something is animating
    AnimationTick,
    /// Main window closed
    WindowClosed,

    // ============ Login ============
    LoginServerChanged(String),
    LoginEmailChanged(String),
    LoginPasswordChanged(String),
    LoginSubmit,
    LoginFinished(Result<AdminClient, String>),
    Logout,
    LogoutFinished(Result<(), String>),

    // ============ Dashboard ============
    RefreshDashboard,
    DashboardLoaded(Result<Vec<ImageRecord>, String>),

    // ============ Editor ============
    /// Open the editor for a new image
    OpenCreate,
    /// Open the editor for an existing image
    OpenEdit(String),
    /// Stored values for the update editor `EditorId`
    StoredImageLoaded(EditorId, Result<StoredImage, String>),
    CloseEditor,
    AltChanged(String),
    DescriptionChanged(String),
    SlugChanged(String),
    KeywordsChanged(String),
    PickImage,
    ImagePicked(Option<PathBuf>),
    ImageLoaded(Result<SelectedImage, String>),
    ClearImage,
    SubmitEditor,
    /// Submission ended without success
    SubmissionSettled,
    /// Submission from this editor succeeded; return to the dashboard shortly
    SubmissionSucceeded(EditorId),
    /// Return delay after a success elapsed
    ReturnFromEditor(EditorId),
    ReturnToDashboard,

    // ============ Delete ============
    RequestDelete(String),
    ConfirmDelete,
    CancelDelete,
    DeleteFinished(String, Result<(), String>),

    // ============ Misc ============
    DismissNotification,
    ToggleTheme,
}

impl std::fmt::Debug for Message {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        macro_rules! simple {
            ($name:literal) => { write!(f, $name) };
            ($name:literal, $($arg:tt)*) => { write!(f, concat!($name, "({})"), format_args!($($arg)*)) };
        }

        match self {
            // High-frequency messages - keep minimal
            Self::AnimationTick => simple!("AnimationTick"),
            Self::WindowClosed => simple!("WindowClosed"),

            Self::LoginServerChanged(url) => simple!("LoginServerChanged", "{}", url),
            Self::LoginEmailChanged(email) => simple!("LoginEmailChanged", "{}", email),
            // Never print the password
            Self::LoginPasswordChanged(_) => simple!("LoginPasswordChanged", "***"),
            Self::LoginSubmit => simple!("LoginSubmit"),
            Self::LoginFinished(result) => {
                simple!("LoginFinished", "ok={}", result.is_ok())
            }
            Self::Logout => simple!("Logout"),
            Self::LogoutFinished(result) => simple!("LogoutFinished", "{:?}", result),

            Self::RefreshDashboard => simple!("RefreshDashboard"),
            Self::DashboardLoaded(Ok(v)) => simple!("DashboardLoaded", "{} images", v.len()),
            Self::DashboardLoaded(Err(e)) => simple!("DashboardLoaded", "error={}", e),

            Self::OpenCreate => simple!("OpenCreate"),
            Self::OpenEdit(slug) => simple!("OpenEdit", "{}", slug),
            Self::StoredImageLoaded(id, Ok(stored)) => {
                simple!("StoredImageLoaded", "{:?}, alt={}", id, stored.alt)
            }
            Self::StoredImageLoaded(id, Err(e)) => {
                simple!("StoredImageLoaded", "{:?}, error={}", id, e)
            }
            Self::CloseEditor => simple!("CloseEditor"),
            Self::AltChanged(v) => simple!("AltChanged", "{} chars", v.len()),
            Self::DescriptionChanged(v) => simple!("DescriptionChanged", "{} chars", v.len()),
            Self::SlugChanged(v) => simple!("SlugChanged", "{}", v),
            Self::KeywordsChanged(v) => simple!("KeywordsChanged", "{}", v),
            Self::PickImage => simple!("PickImage"),
            Self::ImagePicked(path) => simple!("ImagePicked", "{:?}", path),
            // Image bytes - only show name and size
            Self::ImageLoaded(Ok(image)) => simple!(
                "ImageLoaded",
                "{}, {} bytes",
                image.file_name,
                image.size_bytes()
            ),
            Self::ImageLoaded(Err(e)) => simple!("ImageLoaded", "error={}", e),
            Self::ClearImage => simple!("ClearImage"),
            Self::SubmitEditor => simple!("SubmitEditor"),
            Self::SubmissionSettled => simple!("SubmissionSettled"),
            Self::SubmissionSucceeded(id) => simple!("SubmissionSucceeded", "{:?}", id),
            Self::ReturnFromEditor(id) => simple!("ReturnFromEditor", "{:?}", id),
            Self::ReturnToDashboard => simple!("ReturnToDashboard"),

            Self::RequestDelete(slug) => simple!("RequestDelete", "{}", slug),
            Self::ConfirmDelete => simple!("ConfirmDelete"),
            Self::CancelDelete => simple!("CancelDelete"),
            Self::DeleteFinished(slug, result) => {
                simple!("DeleteFinished", "{}, {:?}", slug, result)
            }

            Self::DismissNotification => simple!("DismissNotification"),
            Self::ToggleTheme => simple!("ToggleTheme"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_hides_password() {
        let debug = format!("{:?}", Message::LoginPasswordChanged("hunter2".to_string()));
        assert_eq!(debug, "LoginPasswordChanged(***)");
    }

    #[test]
    fn test_debug_is_compact() {
        assert_eq!(format!("{:?}", Message::AnimationTick), "AnimationTick");
        assert_eq!(
            format!("{:?}", Message::DashboardLoaded(Ok(Vec::new()))),
            "DashboardLoaded(0 images)"
        );
        assert_eq!(
            format!("{:?}", Message::OpenEdit("cat".to_string())),
            "OpenEdit(cat)"
        );
    }
}
