use crate::commands::handlers;
use crate::events::{AppCommand, DataEvent};
use crate::i18n::Locale;
use crate::input::KeyEvent;
use crate::state::{reducer, AppState};

/// Side effects of running a command.
///
/// Production spawns loader tasks; tests apply the state change and drop the
/// background work.
pub trait DataEventHandler {
    fn execute_with_context(&mut self, command: AppCommand, state: &mut AppState);
}

/// The key-to-state pipeline without a terminal attached.
///
/// Generic over the handler so tests can drive the real handlers and reducer
/// with no network or runtime.
pub struct AppCore<H: DataEventHandler> {
    ui_state: AppState,
    handler: H,
}

impl<H: DataEventHandler> AppCore<H> {
    pub fn new(handler: H) -> Self {
        Self::with_state(handler, AppState::new())
    }

    pub fn with_locale(handler: H, locale: Locale) -> Self {
        Self::with_state(handler, AppState::with_locale(locale))
    }

    pub fn with_state(handler: H, ui_state: AppState) -> Self {
        Self { ui_state, handler }
    }

    /// Translate a key press into a command and run it.
    pub fn handle_key(&mut self, event: KeyEvent) {
        if let Some(command) = handlers::handle_key_input(event, &self.ui_state) {
            self.execute(command);
        }
    }

    /// Run a command directly, bypassing key handling.
    pub fn execute(&mut self, command: AppCommand) {
        self.handler
            .execute_with_context(command, &mut self.ui_state);
    }

    /// Apply the result of background work.
    pub fn handle_data_event(&mut self, event: DataEvent) {
        reducer::reduce_data_event(&mut self.ui_state, event);
    }

    pub fn state(&self) -> &AppState {
        &self.ui_state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.ui_state
    }

    pub fn should_quit(&self) -> bool {
        self.ui_state.should_quit
    }
}
