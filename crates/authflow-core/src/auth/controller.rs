//! Login form submission.
//!
//! `LoginController` runs one login attempt at a time:
//! validate → call the auth endpoint → save the token → publish the new
//! identity → clear the expired flag → notify → redirect.
//!
//! The controller is shared by reference between UI event handlers. A
//! submit that arrives while another is in flight is ignored; the check
//! happens before the network call is started, so two attempts can never
//! both see `Idle`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, error, info, warn};

use super::redirect::role_destination;
use super::{validator, LoginError, RedirectResolver, SessionContext, SessionStore};
use crate::api::AuthClient;
use crate::host::{Navigator, Notifier};
use crate::models::{Credentials, Role};

/// Notification shown after a successful login
pub const SUCCESS_MESSAGE: &str = "Login successful!";

const SUBMIT_LABEL: &str = "LOGIN";
const SUBMITTING_LABEL: &str = "LOGGING IN...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Submitting,
}

/// What a call to [`LoginController::submit`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Another submission was in flight; nothing happened.
    Ignored,
    /// Signed in. `destination` is `None` when the role has no landing page.
    Authenticated {
        role: Role,
        destination: Option<String>,
    },
    Failed(LoginError),
}

/// Returns the controller to `Idle` when dropped, whatever the exit path.
struct SubmittingGuard<'a> {
    flag: &'a AtomicBool,
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
        debug!("Submission finished");
    }
}

pub struct LoginController {
    client: Arc<dyn AuthClient>,
    session: SessionStore,
    context: Arc<SessionContext>,
    redirects: RedirectResolver,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    submitting: AtomicBool,
    error: Mutex<Option<String>>,
}

impl LoginController {
    pub fn new(
        client: Arc<dyn AuthClient>,
        session: SessionStore,
        context: Arc<SessionContext>,
        redirects: RedirectResolver,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            client,
            session,
            context,
            redirects,
            navigator,
            notifier,
            submitting: AtomicBool::new(false),
            error: Mutex::new(None),
        }
    }

    pub fn state(&self) -> SubmissionState {
        if self.submitting.load(Ordering::Acquire) {
            SubmissionState::Submitting
        } else {
            SubmissionState::Idle
        }
    }

    /// The submit button should be disabled while this is true
    pub fn is_submitting(&self) -> bool {
        self.state() == SubmissionState::Submitting
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    /// Message to show under the form, if the last attempt failed
    pub fn error(&self) -> Option<String> {
        self.lock_error().clone()
    }

    pub fn clear_error(&self) {
        *self.lock_error() = None;
    }

    /// Submit the login form.
    ///
    /// Failures are recorded as the current error and returned in the
    /// outcome; the controller is back to `Idle` when this returns.
    pub async fn submit(&self, credentials: Credentials) -> SubmitOutcome {
        let Some(_guard) = self.begin() else {
            debug!("Submission already in progress, ignoring");
            return SubmitOutcome::Ignored;
        };

        match self.run(&credentials).await {
            Ok((role, destination)) => SubmitOutcome::Authenticated { role, destination },
            Err(e) => {
                *self.lock_error() = Some(e.to_string());
                SubmitOutcome::Failed(e)
            }
        }
    }

    fn begin(&self) -> Option<SubmittingGuard<'_>> {
        self.submitting
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        debug!("Submission started");
        Some(SubmittingGuard {
            flag: &self.submitting,
        })
    }

    async fn run(&self, credentials: &Credentials) -> Result<(Role, Option<String>), LoginError> {
        if let Err(e) = validator::validate(&credentials.email, &credentials.password) {
            debug!(error = %e, "Login form invalid");
            return Err(e);
        }
        self.clear_error();

        let response = self.client.login(credentials).await.map_err(|e| {
            error!(error = %e, "Login failed");
            match e.message() {
                Some(message) => LoginError::AuthRejected(message.to_string()),
                None => LoginError::AuthUnknownFailure,
            }
        })?;

        let Some(session) = response.into_session() else {
            warn!("Login response did not include a token");
            return Err(LoginError::MalformedSuccess);
        };

        if let Err(e) = self.session.set_token(&session.token) {
            error!(error = %e, "Failed to save session token");
            return Err(LoginError::SessionNotSaved);
        }

        let role = session.role.clone();
        self.context.update(session);

        if let Err(e) = self.session.clear_expired_flag() {
            warn!(error = %e, "Failed to clear session expired flag");
        }

        info!(role = %role, "Login successful");
        self.notifier.success(SUCCESS_MESSAGE);

        let destination = self.redirects.resolve(&role).unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read saved redirect");
            role_destination(&role).map(str::to_string)
        });
        match destination {
            Some(ref path) => self.navigator.navigate(path),
            None => debug!(role = %role, "No default page for role, staying put"),
        }

        Ok((role, destination))
    }

    fn lock_error(&self) -> MutexGuard<'_, Option<String>> {
        self.error.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// Tests
// ============================================================================
