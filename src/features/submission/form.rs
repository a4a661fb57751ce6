//! Form abstraction: field snapshots, submit control, busy hook

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use super::Method;

/// A form the coordinator can submit
pub trait Form {
    /// Target URL or path, e.g. `/admin/create`
    fn action(&self) -> &str;
    fn method(&self) -> Method;
    /// Current field values, copied
    fn snapshot(&self) -> FormData;
    fn submit_control(&self) -> &SubmitControl;
    fn busy_hook(&self) -> &BusyHook;
}

/// File attached to a form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    pub file_name: String,
    pub mime: String,
    pub bytes: Arc<Vec<u8>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    File(FilePart),
}

/// Ordered form fields, like a browser `FormData`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    fields: Vec<(String, FieldValue)>,
}

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields
            .push((name.into(), FieldValue::Text(value.into())));
    }

    pub fn push_file(&mut self, name: impl Into<String>, file: FilePart) {
        self.fields.push((name.into(), FieldValue::File(file)));
    }

    /// First text value named `name`
    #[cfg(test)]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.iter().find_map(|(n, v)| match v {
            FieldValue::Text(text) if n == name => Some(text.as_str()),
            _ => None,
        })
    }

    /// First file named `name`
    #[cfg(test)]
    pub fn file(&self, name: &str) -> Option<&FilePart> {
        self.fields.iter().find_map(|(n, v)| match v {
            FieldValue::File(file) if n == name => Some(file),
            _ => None,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug)]
struct ControlState {
    enabled: bool,
    label: String,
}

/// Shared handle to a form's submit button
///
/// Clones address the same button, so the view and an in-flight submission
/// observe the same state.
#[derive(Debug, Clone)]
pub struct SubmitControl {
    state: Arc<Mutex<ControlState>>,
}

impl SubmitControl {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            state: Arc::new(Mutex::new(ControlState {
                enabled: true,
                label: label.into(),
            })),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.lock().enabled
    }

    pub fn label(&self) -> String {
        self.state.lock().label.clone()
    }
}

/// Shared "form is busy" flag, used for styling only
#[derive(Debug, Clone, Default)]
pub struct BusyHook(Arc<AtomicBool>);

impl BusyHook {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    pub fn set(&self, busy: bool) {
        self.0.store(busy, Ordering::Release);
    }
}

/// Holds a form's submit control locked until dropped
///
/// Acquiring disables the control, swaps its label and marks the form busy;
/// dropping puts back the label captured at acquisition and re-enables it.
#[derive(Debug)]
pub struct BusyGuard {
    control: SubmitControl,
    busy: BusyHook,
    original_label: String,
}

impl BusyGuard {
    pub fn acquire(control: &SubmitControl, busy: &BusyHook, in_progress_label: &str) -> Self {
        let original_label = {
            let mut state = control.state.lock();
            let original = std::mem::replace(&mut state.label, in_progress_label.to_string());
            state.enabled = false;
            original
        };
        busy.set(true);

        Self {
            control: control.clone(),
            busy: busy.clone(),
            original_label,
        }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        {
            let mut state = self.control.state.lock();
            state.enabled = true;
            state.label = std::mem::take(&mut self.original_label);
        }
        self.busy.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_restores_on_drop() {
        let control = SubmitControl::new("Update Image");
        let busy = BusyHook::default();

        {
            let _guard = BusyGuard::acquire(&control, &busy, "Saving...");
            assert!(!control.is_enabled());
            assert_eq!(control.label(), "Saving...");
            assert!(busy.is_busy());
        }

        assert!(control.is_enabled());
        assert_eq!(control.label(), "Update Image");
        assert!(!busy.is_busy());
    }

    #[test]
    fn test_guard_restores_on_panic() {
        let control = SubmitControl::new("Save");
        let busy = BusyHook::default();

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = BusyGuard::acquire(&control, &busy, "Saving...");
            panic!("request blew up");
        }));

        assert!(result.is_err());
        assert!(control.is_enabled());
        assert_eq!(control.label(), "Save");
        assert!(!busy.is_busy());
    }

    #[test]
    fn test_form_data_lookup() {
        let mut data = FormData::new();
        data.push_text("alt", "A cat");
        data.push_file(
            "image",
            FilePart {
                file_name: "cat.png".to_string(),
                mime: "image/png".to_string(),
                bytes: Arc::new(vec![1, 2, 3]),
            },
        );
        data.push_text("alt", "shadowed");

        assert_eq!(data.text("alt"), Some("A cat"));
        assert_eq!(data.text("image"), None);
        assert_eq!(data.file("image").map(|f| f.bytes.len()), Some(3));
        assert_eq!(data.len(), 3);
        assert_eq!(
            data.iter().map(|(name, _)| name).collect::<Vec<_>>(),
            vec!["alt", "image", "alt"]
        );
    }
}
