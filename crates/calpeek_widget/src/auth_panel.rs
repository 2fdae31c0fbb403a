// --- File: crates/calpeek_widget/src/auth_panel.rs ---
use async_trait::async_trait;
use calpeek_common::{models::Session, CalpeekError};
use tracing::info;

/// Provider requested by the sign-in action.
pub const SIGN_IN_PROVIDER: &str = "google";

/// Result of loading the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Pending,
    /// Loading failed, with the error message when one was available.
    Failed(Option<String>),
    Resolved(Option<Session>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    SignIn,
    SignOut,
}

impl PanelAction {
    pub fn label(&self) -> &'static str {
        match self {
            PanelAction::SignIn => "Sign in with Google",
            PanelAction::SignOut => "Sign out",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    LoadingSession,
    AuthError(String),
    SignedOut,
    SignedIn { label: String },
}

impl PanelView {
    /// Status text, if the view shows any.
    pub fn text(&self) -> Option<String> {
        match self {
            PanelView::LoadingSession => Some("Loading session…".to_string()),
            PanelView::AuthError(message) => Some(format!("Auth error: {message}")),
            PanelView::SignedOut => None,
            PanelView::SignedIn { label } => Some(format!("Signed in as {label}")),
        }
    }

    /// Button offered by the view.
    pub fn action(&self) -> Option<PanelAction> {
        match self {
            PanelView::SignedOut => Some(PanelAction::SignIn),
            PanelView::SignedIn { .. } => Some(PanelAction::SignOut),
            PanelView::LoadingSession | PanelView::AuthError(_) => None,
        }
    }
}

/// Sign-in and sign-out as provided by the auth service's client.
///
/// Implemented by the host UI, which owns the OAuth redirect and the session
/// cookie; the panel only decides which action its button runs.
#[async_trait]
pub trait AuthActions: Send + Sync {
    async fn sign_in(&self, provider: &str) -> Result<(), CalpeekError>;
    async fn sign_out(&self) -> Result<(), CalpeekError>;
}

/// Sign-in panel shown next to the widget.
pub struct AuthPanel<A: AuthActions> {
    actions: A,
}

impl<A: AuthActions> AuthPanel<A> {
    pub fn new(actions: A) -> Self {
        Self { actions }
    }

    pub fn actions(&self) -> &A {
        &self.actions
    }

    pub fn view(status: &SessionStatus) -> PanelView {
        match status {
            SessionStatus::Pending => PanelView::LoadingSession,
            SessionStatus::Failed(message) => PanelView::AuthError(
                message
                    .as_deref()
                    .filter(|m| !m.is_empty())
                    .unwrap_or("Unknown error")
                    .to_string(),
            ),
            SessionStatus::Resolved(None) => PanelView::SignedOut,
            SessionStatus::Resolved(Some(session)) => {
                let user = &session.user;
                let label = user
                    .email
                    .as_ref()
                    .or(user.name.as_ref())
                    .unwrap_or(&user.id)
                    .clone();
                PanelView::SignedIn { label }
            }
        }
    }

    /// Runs the action behind the panel's button.
    pub async fn activate(&self, action: PanelAction) -> Result<(), CalpeekError> {
        info!("Auth panel action: {}", action.label());
        match action {
            PanelAction::SignIn => self.actions.sign_in(SIGN_IN_PROVIDER).await,
            PanelAction::SignOut => self.actions.sign_out().await,
        }
    }
}
