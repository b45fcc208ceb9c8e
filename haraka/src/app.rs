use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use haraka_api::{PaymentsClient, SupabaseClient};
use haraka_auth::{Settings, StoredSession};
use ratatui::{backend::CrosstermBackend, Terminal};
use secrecy::SecretString;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::background::{data_loader::DataLoader, BackgroundTaskManager};
use crate::commands::{executor, handlers, AppCommand};
use crate::events::DataEvent;
use crate::i18n::Locale;
use crate::input::KeyEvent;
use crate::log_buffer::LogBuffer;
use crate::logging::init_logging;
use crate::preferences::PreferenceStore;
use crate::state::AppState;
use crate::ui::screens::Screen;

type Term = Terminal<CrosstermBackend<std::io::Stdout>>;

pub struct App {
    settings: Settings,
    session: StoredSession,
}

impl App {
    pub fn new(settings: Settings, session: StoredSession) -> Self {
        Self { settings, session }
    }

    pub async fn run(&self) -> Result<()> {
        let log_buffer = LogBuffer::new(5000);
        let logging = init_logging(log_buffer.clone())?;

        tracing::info!("haraka starting, logging to {:?}", logging.log_path);

        let preferences = Arc::new(PreferenceStore::new()?);
        let locale = Locale::new(preferences.load().language);
        tracing::info!("Using language {}", locale.language().code());

        let supabase = Arc::new(SupabaseClient::new(
            &self.settings.supabase_url,
            self.settings.supabase_anon_key.clone(),
            SecretString::from(self.session.access_token.clone()),
        )?);
        let payments = Arc::new(PaymentsClient::new(
            &self.settings.api_base_url,
            &self.session.access_token,
        ));

        let (data_tx, data_rx) = mpsc::unbounded_channel();
        let data_loader = DataLoader::new(
            supabase,
            payments,
            self.session.user.id,
            preferences,
            data_tx,
        );

        let mut terminal = self.init()?;
        let result = self
            .event_loop(&mut terminal, locale, data_loader, data_rx, &log_buffer)
            .await;
        self.exit(terminal)?;

        result
    }

    async fn event_loop(
        &self,
        terminal: &mut Term,
        locale: Locale,
        data_loader: DataLoader,
        mut data_rx: mpsc::UnboundedReceiver<DataEvent>,
        log_buffer: &LogBuffer,
    ) -> Result<()> {
        let mut ui_state = AppState::with_locale(locale);
        let mut task_manager = BackgroundTaskManager::new();
        let mut event_stream = EventStream::new();

        executor::execute_command(
            AppCommand::LoadDashboard,
            &mut ui_state,
            &mut task_manager,
            &data_loader,
        );

        tracing::info!("Entering main event loop");

        let mut interval = tokio::time::interval(std::time::Duration::from_millis(100));
        loop {
            if let Screen::Logs(logs_state) = ui_state.current_screen_mut() {
                logs_state.total_entries = log_buffer.len();
            }

            terminal.draw(|f| {
                crate::ui::render_app(f, &ui_state, log_buffer);
            })?;

            tokio::select! {
                _ = interval.tick() => {
                    if let Some(throbber_state) = ui_state.loading_state() {
                        throbber_state.calc_next();
                    }
                }
                Some(Ok(event)) = event_stream.next() => {
                    if let Event::Key(key) = event {
                        if matches!(key.kind, KeyEventKind::Press) {
                            // Logging here while the logs screen is open would feed back into it.
                            let on_logs_screen = matches!(ui_state.current_screen(), Screen::Logs(_));
                            if !on_logs_screen {
                                tracing::debug!("Key press: {:?}", key);
                            }
                            if let Some(command) = handlers::handle_key_input(KeyEvent::from(key), &ui_state) {
                                if !on_logs_screen {
                                    tracing::info!("Executing command: {:?}", command);
                                }
                                executor::execute_command(
                                    command,
                                    &mut ui_state,
                                    &mut task_manager,
                                    &data_loader,
                                );
                            }
                        }
                    }
                }
                Some(data_event) = data_rx.recv() => {
                    tracing::debug!("Received data event: {:?}", data_event);
                    crate::state::reducer::reduce_data_event(&mut ui_state, data_event);
                }
            }

            if ui_state.should_quit {
                tracing::info!("Quit requested, exiting event loop");
                break;
            }
        }

        tracing::info!("Cleaning up application");
        task_manager.cancel_all();

        Ok(())
    }

    fn init(&self) -> Result<Term, std::io::Error> {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        Terminal::new(backend)
    }

    fn exit(&self, mut terminal: Term) -> Result<(), std::io::Error> {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }
}
