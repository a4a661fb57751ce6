// src/app/state.rs
//! Application state definitions

use std::sync::atomic::{AtomicU64, Ordering};

use iced::time::Instant;
use iced::widget::image;

use crate::api::AdminClient;
use crate::features::Settings;
use crate::features::notifier::{Notifier, TokioScheduler};
use crate::features::preview::SelectedImage;
use crate::features::records::{ImageRecord, StoredImage, update_path};
use crate::features::slug::SlugField;
use crate::features::submission::{
    BusyGuard, BusyHook, Form, FormData, Method, SubmissionCoordinator, SubmitControl,
};
use crate::ui::animation::FadeAnimation;

pub type Coordinator = SubmissionCoordinator<AdminClient, TokioScheduler>;

/// Main application state
pub struct App {
    /// Core infrastructure (settings, HTTP session, notifier)
    pub core: CoreState,
    /// Image records from the dashboard
    pub library: LibraryState,
    /// UI state (screens, forms, dialogs)
    pub ui: UiState,
}

/// Core Infrastructure & Services
pub struct CoreState {
    pub settings: Settings,
    pub notifier: Notifier<TokioScheduler>,
    /// Logged-in session; `None` on the login screen
    pub client: Option<AdminClient>,
    pub coordinator: Option<Coordinator>,
}

impl CoreState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            notifier: Notifier::new(TokioScheduler),
            client: None,
            coordinator: None,
        }
    }

    /// Start a session with a logged-in client
    pub fn begin_session(&mut self, client: AdminClient) {
        self.coordinator = Some(SubmissionCoordinator::new(
            client.clone(),
            self.notifier.clone(),
        ));
        self.client = Some(client);
    }

    pub fn end_session(&mut self) {
        self.client = None;
        self.coordinator = None;
    }
}

#[derive(Debug, Default)]
pub struct LibraryState {
    pub images: Vec<ImageRecord>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Which screen fills the window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Login,
    Dashboard,
    Editor,
}

pub struct UiState {
    pub screen: Screen,
    pub login: LoginState,
    pub editor: EditorState,
    pub dialogs: DialogState,
}

impl UiState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            screen: Screen::Login,
            login: LoginState::new(settings),
            editor: EditorState::create(),
            dialogs: DialogState::default(),
        }
    }

    pub fn has_active_animations(&self) -> bool {
        self.dialogs.delete_animation.is_animating()
    }

    pub fn tick_animations(&mut self, now: Instant) {
        self.dialogs.delete_animation.tick(now);
    }

    /// Whether the editor on screen is a different one than `id`
    pub fn is_editing_other_than(&self, id: EditorId) -> bool {
        self.screen == Screen::Editor && self.editor.id() != id
    }
}

pub struct LoginState {
    pub server_url: String,
    pub email: String,
    pub password: String,
    pub control: SubmitControl,
    pub busy: BusyHook,
}

impl LoginState {
    pub fn new(settings: &Settings) -> Self {
        Self {
            server_url: settings.server.base_url.clone(),
            email: settings.account.email.clone().unwrap_or_default(),
            password: String::new(),
            control: SubmitControl::new("Log In"),
            busy: BusyHook::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    /// Update of the image currently stored under `original_slug`
    Update { original_slug: String },
}

/// Submit label while the stored values of an update form load
const LOADING_LABEL: &str = "Loading...";

static NEXT_EDITOR_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one opened editor, so late results can tell it was replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorId(u64);

/// Create/update form for one image record
pub struct EditorState {
    id: EditorId,
    pub mode: EditorMode,
    action: String,
    pub alt: String,
    pub description: String,
    pub slug: SlugField,
    /// Comma separated
    pub keywords: String,
    pub image: Option<SelectedImage>,
    pub preview: Option<image::Handle>,
    pub loading_image: bool,
    control: SubmitControl,
    busy: BusyHook,
    /// Held until the stored values of an update form arrive
    loading_stored: Option<BusyGuard>,
}

impl EditorState {
    pub fn create() -> Self {
        Self::with_mode(EditorMode::Create, "/admin/create".to_string(), "Create Image")
    }

    /// Editor for an existing image
    ///
    /// Only the slug is known up front; submitting stays disabled until
    /// [`apply_stored`](Self::apply_stored) fills in the other fields.
    pub fn update(slug: &str) -> Self {
        let mut editor = Self::with_mode(
            EditorMode::Update {
                original_slug: slug.to_string(),
            },
            update_path(slug),
            "Update Image",
        );
        editor.slug = SlugField::existing(slug);
        editor.loading_stored = Some(BusyGuard::acquire(
            &editor.control,
            &editor.busy,
            LOADING_LABEL,
        ));
        editor
    }

    fn with_mode(mode: EditorMode, action: String, submit_label: &str) -> Self {
        Self {
            id: EditorId(NEXT_EDITOR_ID.fetch_add(1, Ordering::Relaxed)),
            mode,
            action,
            alt: String::new(),
            description: String::new(),
            slug: SlugField::default(),
            keywords: String::new(),
            image: None,
            preview: None,
            loading_image: false,
            control: SubmitControl::new(submit_label),
            busy: BusyHook::default(),
            loading_stored: None,
        }
    }

    pub fn id(&self) -> EditorId {
        self.id
    }

    pub fn is_loading_stored(&self) -> bool {
        self.loading_stored.is_some()
    }

    /// Fill in the values the server holds and unlock submitting
    ///
    /// The slug stays as opened; it is the record's key.
    pub fn apply_stored(&mut self, stored: StoredImage) {
        self.alt = stored.alt;
        self.description = stored.description;
        self.keywords = stored.keywords;
        self.loading_stored = None;
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            EditorMode::Create => "New Image",
            EditorMode::Update { .. } => "Edit Image",
        }
    }

    pub fn set_alt(&mut self, alt: String) {
        self.slug.alt_changed(&alt);
        self.alt = alt;
    }

    pub fn set_image(&mut self, image: SelectedImage) {
        self.preview = image
            .preview
            .map(|_| image::Handle::from_bytes(image.bytes.as_ref().clone()));
        self.image = Some(image);
        self.loading_image = false;
    }

    pub fn clear_image(&mut self) {
        self.image = None;
        self.preview = None;
    }
}

impl Form for EditorState {
    fn action(&self) -> &str {
        &self.action
    }

    fn method(&self) -> Method {
        Method::Post
    }

    fn snapshot(&self) -> FormData {
        let mut data = FormData::new();
        data.push_text("alt", self.alt.clone());
        data.push_text("description", self.description.clone());
        data.push_text("slug", self.slug.value());
        data.push_text("keywords", self.keywords.clone());
        // Without a new file the server keeps the stored image
        if let Some(image) = &self.image {
            data.push_file("image", image.to_file_part());
        }
        data
    }

    fn submit_control(&self) -> &SubmitControl {
        &self.control
    }

    fn busy_hook(&self) -> &BusyHook {
        &self.busy
    }
}

#[derive(Debug, Default)]
pub struct DialogState {
    /// Slug awaiting delete confirmation
    pub delete_pending: Option<String>,
    /// Kept while the dialog fades out
    pub delete_label: String,
    pub delete_animation: FadeAnimation,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_create_form_snapshot() {
        let mut editor = EditorState::create();
        editor.set_alt("Cat & Dog!".to_string());
        editor.description = "Two friends".to_string();
        editor.keywords = "cat, dog".to_string();

        assert_eq!(editor.action(), "/admin/create");
        assert_eq!(editor.method(), Method::Post);
        assert_eq!(editor.submit_control().label(), "Create Image");

        let data = editor.snapshot();
        assert_eq!(data.text("alt"), Some("Cat & Dog!"));
        assert_eq!(data.text("slug"), Some("cat-dog"));
        assert_eq!(data.text("keywords"), Some("cat, dog"));
        assert!(data.file("image").is_none());
    }

    fn stored() -> StoredImage {
        StoredImage {
            alt: "Sunset".to_string(),
            description: "Golden hour".to_string(),
            keywords: "sea, sky".to_string(),
        }
    }

    #[test]
    fn test_update_form_keeps_slug_and_target() {
        let mut editor = EditorState::update("sunset");
        editor.apply_stored(stored());
        editor.set_alt("Sunrise".to_string());

        assert_eq!(editor.action(), "/admin/update/sunset");
        assert_eq!(editor.slug.value(), "sunset");
        assert_eq!(editor.submit_control().label(), "Update Image");
        assert_eq!(editor.title(), "Edit Image");
    }

    #[test]
    fn test_update_form_locked_until_stored_values_arrive() {
        let mut editor = EditorState::update("sunset");
        assert!(editor.is_loading_stored());
        assert!(!editor.submit_control().is_enabled());
        assert_eq!(editor.submit_control().label(), "Loading...");
        assert!(editor.busy_hook().is_busy());

        editor.apply_stored(stored());

        assert!(!editor.is_loading_stored());
        assert!(editor.submit_control().is_enabled());
        assert_eq!(editor.submit_control().label(), "Update Image");
        assert!(!editor.busy_hook().is_busy());
        assert_eq!(editor.alt, "Sunset");
    }

    #[test]
    fn test_update_keeps_untouched_stored_fields() {
        let mut editor = EditorState::update("sunset");
        editor.apply_stored(stored());
        editor.set_alt("Sunset over the bay".to_string());

        let data = editor.snapshot();
        assert_eq!(data.text("alt"), Some("Sunset over the bay"));
        assert_eq!(data.text("description"), Some("Golden hour"));
        assert_eq!(data.text("keywords"), Some("sea, sky"));
        assert_eq!(data.text("slug"), Some("sunset"));
    }

    #[test]
    fn test_each_editor_has_its_own_id() {
        let settings = Settings::default();
        let mut ui = UiState::new(&settings);
        let first = ui.editor.id();
        assert!(!ui.is_editing_other_than(first));

        ui.screen = Screen::Editor;
        assert!(!ui.is_editing_other_than(first));

        ui.editor = EditorState::update("cat");
        assert_ne!(ui.editor.id(), first);
        assert!(ui.is_editing_other_than(first));

        // Back on the dashboard nothing is being edited
        ui.screen = Screen::Dashboard;
        assert!(!ui.is_editing_other_than(first));
    }

    #[test]
    fn test_selected_image_is_uploaded() {
        let mut editor = EditorState::create();
        editor.set_image(SelectedImage::from_bytes(
            PathBuf::from("notes.jpg"),
            b"not really a jpeg".to_vec(),
        ));
        assert!(editor.preview.is_none());

        let data = editor.snapshot();
        let file = data.file("image").unwrap();
        assert_eq!(file.file_name, "notes.jpg");
        assert_eq!(file.mime, "image/jpeg");

        editor.clear_image();
        assert!(editor.snapshot().file("image").is_none());
    }
}
