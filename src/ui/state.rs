/// Where the terminal session currently is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    MainMenu,
    Registering(FormStep),
    LoggingIn(FormStep),
    /// Logged in as the account keyed by `email`.
    Chatting { email: String },
    Terminated,
}

/// Progress through the two-field email/username form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormStep {
    Email,
    Username { email: String },
}

impl SessionState {
    pub fn is_terminated(&self) -> bool {
        matches!(self, SessionState::Terminated)
    }
}
