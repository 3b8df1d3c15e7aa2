use std::io::BufRead;
use std::mem;

use chrono::{DateTime, Local, Utc};

use crate::common::commands::is_exit_keyword;
use crate::common::validation::validate_email;
use crate::common::{AccountError, ChatMessage, MenuChoice, SessionError};
use crate::config::FormFailurePolicy;
use crate::storage::{SnapshotFile, UserStore};

use super::components::input::LineInput;
use super::components::menu;
use super::state::{FormStep, SessionState};

type Clock = Box<dyn FnMut() -> DateTime<Utc>>;

/// Terminal session: main menu, register/login forms and the chat loop over
/// one `UserStore`, saved to `snapshot` when the user picks Exit.
pub struct ChatApp<R: BufRead> {
    store: UserStore,
    snapshot: SnapshotFile,
    input: LineInput<R>,
    policy: FormFailurePolicy,
    state: SessionState,
    clock: Clock,
}

impl<R: BufRead> ChatApp<R> {
    pub fn new(
        store: UserStore,
        snapshot: SnapshotFile,
        reader: R,
        policy: FormFailurePolicy,
    ) -> Self {
        Self {
            store,
            snapshot,
            input: LineInput::new(reader),
            policy,
            state: SessionState::MainMenu,
            clock: Box::new(Utc::now),
        }
    }

    /// Source of chat message timestamps.
    #[cfg(test)]
    pub fn with_clock(mut self, clock: impl FnMut() -> DateTime<Utc> + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn store(&self) -> &UserStore {
        &self.store
    }

    /// Drive the session until Exit. Only running out of input ends it early,
    /// in which case nothing is saved.
    pub fn run(&mut self) -> Result<(), SessionError> {
        log::info!("{}", menu::WELCOME);
        while !self.state().is_terminated() {
            self.step()?;
        }
        Ok(())
    }

    /// Handle one line of input and move to the next state.
    pub fn step(&mut self) -> Result<(), SessionError> {
        let next = match mem::replace(&mut self.state, SessionState::MainMenu) {
            SessionState::MainMenu => self.main_menu()?,
            SessionState::Registering(step) => self.registering(step)?,
            SessionState::LoggingIn(step) => self.logging_in(step)?,
            SessionState::Chatting { email } => self.chatting(email)?,
            SessionState::Terminated => SessionState::Terminated,
        };
        self.state = next;
        Ok(())
    }

    fn main_menu(&mut self) -> Result<SessionState, SessionError> {
        let line = self.input.prompt(menu::MAIN_MENU)?;
        let next = match MenuChoice::parse(&line) {
            MenuChoice::Register => SessionState::Registering(FormStep::Email),
            MenuChoice::Login => SessionState::LoggingIn(FormStep::Email),
            MenuChoice::Exit => {
                self.shutdown();
                SessionState::Terminated
            }
            MenuChoice::Invalid => {
                log::warn!("{}", menu::INVALID_CHOICE);
                SessionState::MainMenu
            }
        };
        Ok(next)
    }

    fn registering(&mut self, step: FormStep) -> Result<SessionState, SessionError> {
        match step {
            FormStep::Email => {
                let Some(email) = self.form_field(menu::ENTER_EMAIL)? else {
                    return Ok(SessionState::MainMenu);
                };
                if !validate_email(&email) {
                    return Ok(self.reject(
                        AccountError::InvalidEmailFormat,
                        SessionState::Registering(FormStep::Email),
                    ));
                }
                if self.store.contains(&email) {
                    return Ok(self.reject(
                        AccountError::DuplicateEmail,
                        SessionState::Registering(FormStep::Email),
                    ));
                }
                Ok(SessionState::Registering(FormStep::Username { email }))
            }
            FormStep::Username { email } => {
                let Some(username) = self.form_field(menu::ENTER_USERNAME)? else {
                    return Ok(SessionState::MainMenu);
                };
                match self.store.register(&email, &username).map(|_| ()) {
                    Ok(()) => {
                        log::info!("Registration successful!");
                        log::info!("You can now log in.");
                        Ok(SessionState::MainMenu)
                    }
                    Err(err @ AccountError::InvalidUsernameFormat) => Ok(self.reject(
                        err,
                        SessionState::Registering(FormStep::Username { email }),
                    )),
                    Err(err) => Ok(self.reject(err, SessionState::Registering(FormStep::Email))),
                }
            }
        }
    }

    fn logging_in(&mut self, step: FormStep) -> Result<SessionState, SessionError> {
        match step {
            FormStep::Email => {
                let Some(email) = self.form_field(menu::ENTER_EMAIL)? else {
                    return Ok(SessionState::MainMenu);
                };
                if !validate_email(&email) {
                    return Ok(self.reject(
                        AccountError::InvalidEmailFormat,
                        SessionState::LoggingIn(FormStep::Email),
                    ));
                }
                if !self.store.contains(&email) {
                    return Ok(self.reject(
                        AccountError::UnknownEmail,
                        SessionState::LoggingIn(FormStep::Email),
                    ));
                }
                Ok(SessionState::LoggingIn(FormStep::Username { email }))
            }
            FormStep::Username { email } => {
                let Some(username) = self.form_field(menu::ENTER_USERNAME)? else {
                    return Ok(SessionState::MainMenu);
                };
                match self.store.authenticate(&email, &username) {
                    Ok(record) => {
                        log::info!("Login successful!");
                        log::info!("Welcome back, {}!", record.username());
                        log::info!("Chatting...");
                        Ok(SessionState::Chatting { email })
                    }
                    Err(err @ AccountError::UsernameMismatch) => Ok(self.reject(
                        err,
                        SessionState::LoggingIn(FormStep::Username { email }),
                    )),
                    Err(err) => Ok(self.reject(err, SessionState::LoggingIn(FormStep::Email))),
                }
            }
        }
    }

    fn chatting(&mut self, email: String) -> Result<SessionState, SessionError> {
        let line = self.input.prompt(menu::ENTER_MESSAGE)?;
        if is_exit_keyword(&line) {
            return Ok(SessionState::MainMenu);
        }

        let Some(sender) = self.store.get(&email).map(|r| r.username().to_string()) else {
            log::warn!("{}", AccountError::UnknownEmail);
            return Ok(SessionState::MainMenu);
        };

        let timestamp = (self.clock)();
        let message = ChatMessage::new(timestamp, sender, line);
        match self.store.append_message(&email, message) {
            Ok(replaced) => {
                if replaced.is_some() {
                    log::debug!("Replaced earlier message stored at {timestamp}");
                }
                log::info!(
                    "Message sent at {}",
                    timestamp
                        .with_timezone(&Local)
                        .format("%Y-%m-%dT%H:%M:%S%.f")
                );
                Ok(SessionState::Chatting { email })
            }
            Err(err) => {
                log::warn!("{err}");
                Ok(SessionState::MainMenu)
            }
        }
    }

    fn shutdown(&mut self) {
        match self.snapshot.save(&self.store) {
            Ok(()) => log::debug!(
                "Saved {} users to {}",
                self.store.len(),
                self.snapshot.path().display()
            ),
            Err(err) => log::warn!("{err}"),
        }
        log::info!("{}", menu::GOODBYE);
    }

    /// Read one form field. Under the retry policy an empty line backs out to
    /// the menu, reported as `None`.
    fn form_field(&mut self, prompt: &str) -> Result<Option<String>, SessionError> {
        let value = self.input.prompt(prompt)?;
        if self.policy == FormFailurePolicy::Retry && value.is_empty() {
            log::info!("Cancelled.");
            return Ok(None);
        }
        Ok(Some(value))
    }

    fn reject(&self, err: AccountError, retry: SessionState) -> SessionState {
        log::warn!("{err}");
        match self.policy {
            FormFailurePolicy::Abort => SessionState::MainMenu,
            FormFailurePolicy::Retry => retry,
        }
    }
}
