/*
 * Responsibility
 * - Shared context handed to every handler (AppState)
 *   - store: the one DocumentStore of the process, auth: token signing/verification
 * - Cheap to clone (everything behind Arc)
 */
use std::fmt;
use std::sync::Arc;

use crate::repos::DocumentStore;
use crate::services::auth::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub auth: Arc<AuthService>,
    admin_emails: Arc<[String]>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        auth: Arc<AuthService>,
        admin_emails: Vec<String>,
    ) -> Self {
        Self {
            store,
            auth,
            admin_emails: admin_emails.into(),
        }
    }

    /// Whether `email` is listed in `ADMIN_EMAILS` and gets the admin role at signup.
    pub fn is_bootstrap_admin(&self, email: &str) -> bool {
        self.admin_emails
            .iter()
            .any(|admin| admin.eq_ignore_ascii_case(email))
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store.backend_name())
            .field("auth", &self.auth)
            .field("admin_emails", &self.admin_emails.len())
            .finish()
    }
}
