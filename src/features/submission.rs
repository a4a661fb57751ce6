//! Form submission lifecycle
//!
//! [`SubmissionCoordinator::submit`] drives exactly one submission: snapshot
//! the form, lock the submit control, send the request, report the outcome
//! through the [`Notifier`], and hand the response to the caller on success.
//! The submit control is restored by [`BusyGuard`] on every exit path.

mod form;
mod transport;

use std::future::Future;

pub use form::{BusyGuard, BusyHook, FieldValue, FilePart, Form, FormData, SubmitControl};
pub use transport::{Method, RawResponse, SubmissionRequest, Transport, TransportError};

use crate::features::notifier::{Notifier, Scheduler};

/// Shown when the server rejects a submission without a readable body
pub const SUBMISSION_FAILED: &str = "Submission failed";
/// Shown when the request did not complete at all
pub const GENERIC_ERROR: &str = "An error occurred";

/// Continuation invoked with the server response after a successful submission
pub type OnSuccess = Box<dyn FnOnce(RawResponse) + Send + 'static>;

/// Classified result of a submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Success(RawResponse),
    Failure(String),
}

impl SubmissionOutcome {
    /// Classify a transport result by HTTP status
    pub fn classify(result: Result<RawResponse, TransportError>) -> Self {
        match result {
            Ok(response) if response.is_success() => Self::Success(response),
            Ok(response) => Self::Failure(response.error_message(SUBMISSION_FAILED)),
            Err(e) => {
                tracing::error!("Submission transport error: {}", e);
                Self::Failure(GENERIC_ERROR.to_string())
            }
        }
    }
}

/// Submit control label while a request is in flight
pub const IN_PROGRESS_LABEL: &str = "Saving...";
/// Notification text on success
pub const SUCCESS_MESSAGE: &str = "Success!";

/// Drives form submissions against a [`Transport`]
pub struct SubmissionCoordinator<T: Transport, S: Scheduler> {
    transport: T,
    notifier: Notifier<S>,
}

impl<T: Transport, S: Scheduler> Clone for SubmissionCoordinator<T, S> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            notifier: self.notifier.clone(),
        }
    }
}

impl<T: Transport, S: Scheduler> SubmissionCoordinator<T, S> {
    pub fn new(transport: T, notifier: Notifier<S>) -> Self {
        Self {
            transport,
            notifier,
        }
    }

    #[cfg(test)]
    pub fn notifier(&self) -> &Notifier<S> {
        &self.notifier
    }

    /// Submit `form`
    ///
    /// The field snapshot and the control lock happen before this returns;
    /// the returned future performs the request and resolves once the control
    /// has been restored. Failures are reported through the notifier only.
    pub fn submit<F: Form + ?Sized>(
        &self,
        form: &F,
        on_success: Option<OnSuccess>,
    ) -> impl Future<Output = ()> + Send + 'static {
        let request = SubmissionRequest {
            method: form.method(),
            url: form.action().to_string(),
            body: form.snapshot(),
        };
        let guard = BusyGuard::acquire(
            form.submit_control(),
            form.busy_hook(),
            IN_PROGRESS_LABEL,
        );

        let transport = self.transport.clone();
        let notifier = self.notifier.clone();

        async move {
            // Dropped last, on every path out of this block
            let _guard = guard;

            tracing::info!(
                "Submitting {} {} ({} fields)",
                request.method,
                request.url,
                request.body.len()
            );

            match SubmissionOutcome::classify(transport.send(request).await) {
                SubmissionOutcome::Success(response) => {
                    tracing::info!("Submission succeeded with status {}", response.status);
                    notifier.success(SUCCESS_MESSAGE);
                    if let Some(on_success) = on_success {
                        on_success(response);
                    }
                }
                SubmissionOutcome::Failure(message) => {
                    tracing::warn!("Submission failed: {}", message);
                    let message = if message.is_empty() {
                        GENERIC_ERROR.to_string()
                    } else {
                        message
                    };
                    notifier.error(message);
                }
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;

    use super::testing::FakeTransport;
    use super::*;
    use crate::features::notifier::{ManualScheduler, NotificationKind};

    struct TestForm {
        action: String,
        method: Method,
        fields: Mutex<FormData>,
        control: SubmitControl,
        busy: BusyHook,
    }

    impl TestForm {
        fn new(action: &str) -> Self {
            let mut fields = FormData::new();
            fields.push_text("alt", "cat");
            fields.push_text("slug", "cat");
            Self {
                action: action.to_string(),
                method: Method::Post,
                fields: Mutex::new(fields),
                control: SubmitControl::new("Create Image"),
                busy: BusyHook::default(),
            }
        }
    }

    impl Form for TestForm {
        fn action(&self) -> &str {
            &self.action
        }

        fn method(&self) -> Method {
            self.method
        }

        fn snapshot(&self) -> FormData {
            self.fields.lock().clone()
        }

        fn submit_control(&self) -> &SubmitControl {
            &self.control
        }

        fn busy_hook(&self) -> &BusyHook {
            &self.busy
        }
    }

    fn coordinator(
        transport: &FakeTransport,
    ) -> SubmissionCoordinator<FakeTransport, ManualScheduler> {
        SubmissionCoordinator::new(transport.clone(), Notifier::new(ManualScheduler::new()))
    }

    #[test]
    fn test_classify() {
        let ok = RawResponse {
            status: 201,
            body: None,
        };
        assert_eq!(
            SubmissionOutcome::classify(Ok(ok.clone())),
            SubmissionOutcome::Success(ok)
        );

        let rejected = RawResponse {
            status: 400,
            body: Some("Missing required fields".to_string()),
        };
        assert_eq!(
            SubmissionOutcome::classify(Ok(rejected)),
            SubmissionOutcome::Failure("Missing required fields".to_string())
        );

        let empty = RawResponse {
            status: 500,
            body: Some("   ".to_string()),
        };
        assert_eq!(
            SubmissionOutcome::classify(Ok(empty)),
            SubmissionOutcome::Failure(SUBMISSION_FAILED.to_string())
        );

        assert_eq!(
            SubmissionOutcome::classify(Err(TransportError::Timeout)),
            SubmissionOutcome::Failure(GENERIC_ERROR.to_string())
        );
    }

    #[tokio::test]
    async fn test_success_restores_control_and_calls_continuation_once() {
        let transport = FakeTransport::new();
        transport.respond(200, Some("Image created successfully!"));
        let coordinator = coordinator(&transport);
        let form = TestForm::new("/admin/create");

        let calls = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(None));
        let (calls_in, seen_in) = (calls.clone(), seen.clone());

        let pending = coordinator.submit(
            &form,
            Some(Box::new(move |response: RawResponse| {
                calls_in.fetch_add(1, Ordering::SeqCst);
                *seen_in.lock() = Some(response);
            })),
        );

        // Locked before the request is even polled
        assert!(!form.control.is_enabled());
        assert_eq!(form.control.label(), "Saving...");
        assert!(form.busy.is_busy());

        pending.await;

        assert!(form.control.is_enabled());
        assert_eq!(form.control.label(), "Create Image");
        assert!(!form.busy.is_busy());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(seen.lock().as_ref().map(|r| r.status), Some(200));

        let current = coordinator.notifier().current().unwrap();
        assert_eq!(current.message, "Success!");
        assert_eq!(current.kind, NotificationKind::Success);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, Method::Post);
        assert_eq!(requests[0].url, "/admin/create");
        assert_eq!(requests[0].body.text("alt"), Some("cat"));
    }

    #[tokio::test]
    async fn test_rejection_reports_body_text() {
        let transport = FakeTransport::new();
        transport.respond(422, Some("Name required"));
        let coordinator = coordinator(&transport);
        let form = TestForm::new("/admin/update/cat");

        let called = Arc::new(AtomicUsize::new(0));
        let called_in = called.clone();
        coordinator
            .submit(
                &form,
                Some(Box::new(move |_| {
                    called_in.fetch_add(1, Ordering::SeqCst);
                })),
            )
            .await;

        let current = coordinator.notifier().current().unwrap();
        assert_eq!(current.message, "Name required");
        assert_eq!(current.kind, NotificationKind::Error);
        assert!(form.control.is_enabled());
        assert_eq!(form.control.label(), "Create Image");
        assert_eq!(called.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_rejection_without_body_uses_fallback() {
        let transport = FakeTransport::new();
        transport.respond(500, None);
        let coordinator = coordinator(&transport);
        let form = TestForm::new("/admin/create");

        coordinator.submit(&form, None).await;

        let current = coordinator.notifier().current().unwrap();
        assert_eq!(current.message, SUBMISSION_FAILED);
        assert_eq!(current.kind, NotificationKind::Error);
    }

    #[tokio::test]
    async fn test_transport_failure_still_restores_control() {
        let transport = FakeTransport::new();
        transport.fail(TransportError::Connect("connection refused".to_string()));
        let coordinator = coordinator(&transport);
        let form = TestForm::new("/admin/create");

        coordinator.submit(&form, None).await;

        assert!(form.control.is_enabled());
        assert_eq!(form.control.label(), "Create Image");
        assert!(!form.busy.is_busy());
        let current = coordinator.notifier().current().unwrap();
        assert_eq!(current.message, GENERIC_ERROR);
        assert_eq!(current.kind, NotificationKind::Error);
    }

    #[tokio::test]
    async fn test_dropped_submission_restores_control() {
        let transport = FakeTransport::new();
        transport.respond(200, None);
        let coordinator = coordinator(&transport);
        let form = TestForm::new("/admin/create");

        let pending = coordinator.submit(&form, None);
        assert!(!form.control.is_enabled());
        drop(pending);

        assert!(form.control.is_enabled());
        assert_eq!(form.control.label(), "Create Image");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_ignores_later_edits() {
        let transport = FakeTransport::new();
        transport.respond(200, None);
        let coordinator = coordinator(&transport);
        let form = TestForm::new("/admin/create");

        let pending = coordinator.submit(&form, None);
        form.fields.lock().push_text("description", "added later");
        pending.await;

        let requests = transport.requests();
        assert_eq!(requests[0].body.text("description"), None);
        assert_eq!(requests[0].body.len(), 2);
    }
}
