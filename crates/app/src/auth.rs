use client::{ApiClient, JsonFileStore};
use dioxus::prelude::*;
use shared_types::{AppConfig, AppError, SessionIdentity};
use shared_ui::{transient, Toasts};
use wizard::{DataUrlPreviews, Notice, NoticeLevel, Wizard};

/// The wizard as the app runs it: session state on disk, previews as data URLs.
pub type AppWizard = Wizard<JsonFileStore, DataUrlPreviews>;

/// Global session state.
///
/// The wizard owns the technician identity, so "signed in" means the wizard
/// holds one.
#[derive(Clone, Copy)]
pub struct AuthState {
    pub wizard: Signal<AppWizard>,
    api: Signal<ApiClient>,
}

impl AuthState {
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let api = ApiClient::new(&config.api)?;
        let store = JsonFileStore::open(&config.storage.path);
        let wizard = Wizard::new(store, DataUrlPreviews::default(), config.wizard.clone());
        Ok(Self {
            wizard: Signal::new(wizard),
            api: Signal::new(api),
        })
    }

    pub fn api(&self) -> ApiClient {
        self.api.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.wizard.read().is_logged_in()
    }

    pub fn identity(&self) -> Option<SessionIdentity> {
        self.wizard.read().identity().cloned()
    }

    pub fn sign_in(&mut self, identity: SessionIdentity) {
        self.wizard.write().login(identity);
    }

    pub fn sign_out(&mut self) {
        self.wizard.write().logout();
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// Show an upload notice as a toast that disappears after the configured ttl.
pub fn show_notice(toast: Toasts, notice: Notice, auth: &AuthState) {
    let options = transient(auth.wizard.read().notice_ttl());
    match notice.level {
        NoticeLevel::Success => toast.success(notice.message, options),
        NoticeLevel::Error => toast.error(notice.message, options),
    }
}
