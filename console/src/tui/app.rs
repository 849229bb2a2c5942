//! Application state and event management for the console TUI.
//!
//! The TUI is event-driven: [`EventHandler`] multiplexes terminal input and
//! periodic ticks onto an MPSC channel, the verification poller delivers
//! [`PollEvent`]s on a second channel, and [`App`] folds both streams into
//! state changes. Which screen renders is never stored — it is recomputed
//! from the control state through [`crate::router::route`] on every frame,
//! so the display can never disagree with the snapshot that produced it.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Color, Modifier, Style};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};
use zeroize::{Zeroize, Zeroizing};

use crate::api::ApiClient;
use crate::auth::AuthGate;
use crate::boot::Boot;
use crate::config::Config;
use crate::poller::{PollEvent, VerificationPoller};
use crate::router::{route, GuiFlag, Screen};
use crate::session::Session;
use crate::status::StatusStore;
use crate::types::Platform;
use crate::webhooks::WebhookManager;
use crate::wizard::{SetupWizard, WizardStep};

// =============================================================================
// Theme
// =============================================================================

/// Styles used across the console screens.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Screen and block titles.
    pub title: Style,
    /// Unfocused borders.
    pub border: Style,
    /// Focused borders.
    pub border_focused: Style,
    /// Text inputs.
    pub input: Style,
    /// Error messages.
    pub error: Style,
    /// Advisory warnings.
    pub warning: Style,
    /// Primary body text.
    pub text_primary: Style,
    /// Secondary text (hints, key legends).
    pub text_secondary: Style,
    /// Verified webhook status label.
    pub status_verified: Style,
    /// Pending webhook status label.
    pub status_pending: Style,
    /// Highlighted list row.
    pub selection: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            title: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            border: Style::default().fg(Color::DarkGray),
            border_focused: Style::default().fg(Color::Cyan),
            input: Style::default().fg(Color::Cyan),
            error: Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            warning: Style::default().fg(Color::Yellow),
            text_primary: Style::default(),
            text_secondary: Style::default().fg(Color::Gray),
            status_verified: Style::default().fg(Color::Green),
            status_pending: Style::default().fg(Color::Yellow),
            selection: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        }
    }
}

impl Theme {
    /// Modifier-only theme for `NO_COLOR` environments.
    #[must_use]
    pub fn monochrome() -> Self {
        Self {
            title: Style::default().add_modifier(Modifier::BOLD),
            border: Style::default(),
            border_focused: Style::default().add_modifier(Modifier::BOLD),
            input: Style::default().add_modifier(Modifier::UNDERLINED),
            error: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            warning: Style::default().add_modifier(Modifier::ITALIC),
            text_primary: Style::default(),
            text_secondary: Style::default().add_modifier(Modifier::DIM),
            status_verified: Style::default().add_modifier(Modifier::BOLD),
            status_pending: Style::default().add_modifier(Modifier::ITALIC),
            selection: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    /// Picks the theme based on the `NO_COLOR` convention.
    #[must_use]
    pub fn from_env() -> Self {
        if std::env::var("NO_COLOR").is_ok() {
            Self::monochrome()
        } else {
            Self::default()
        }
    }
}

// =============================================================================
// Events
// =============================================================================

/// Default tick rate for the event handler.
pub const DEFAULT_TICK_RATE_MS: u64 = 200;

/// Poll timeout for terminal input checks.
const INPUT_POLL_TIMEOUT_MS: u64 = 10;

/// Events that drive the TUI event loop.
#[derive(Debug, Clone)]
pub enum TuiEvent {
    /// Periodic tick; triggers a redraw so poller-driven state changes
    /// become visible.
    Tick,

    /// Terminal key press.
    Key(KeyEvent),

    /// Terminal resize (columns, rows).
    Resize(u16, u16),
}

/// Reads terminal input and generates tick events until shut down.
///
/// Runs in its own task; uses a biased `tokio::select!` so the shutdown
/// signal always wins over pending input.
#[derive(Debug)]
pub struct EventHandler {
    event_tx: mpsc::Sender<TuiEvent>,
    shutdown_rx: oneshot::Receiver<()>,
    tick_rate: Duration,
}

impl EventHandler {
    /// Creates a handler with the default tick rate.
    pub fn new(event_tx: mpsc::Sender<TuiEvent>, shutdown_rx: oneshot::Receiver<()>) -> Self {
        Self {
            event_tx,
            shutdown_rx,
            tick_rate: Duration::from_millis(DEFAULT_TICK_RATE_MS),
        }
    }

    /// Runs the event loop until the shutdown signal fires or the receiver
    /// side is dropped.
    pub async fn run(mut self) -> std::io::Result<()> {
        let mut tick_interval = tokio::time::interval(self.tick_rate);
        tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Burst);
        tick_interval.tick().await;

        loop {
            tokio::select! {
                biased;

                _ = &mut self.shutdown_rx => {
                    debug!("event handler received shutdown signal");
                    break;
                }

                _ = tick_interval.tick() => {
                    if self.event_tx.send(TuiEvent::Tick).await.is_err() {
                        break;
                    }
                }

                result = async {
                    // Brief pause so tick events get processed between polls.
                    tokio::time::sleep(Duration::from_millis(INPUT_POLL_TIMEOUT_MS)).await;
                    tokio::task::spawn_blocking(|| {
                        Self::poll_terminal_event(Duration::from_millis(INPUT_POLL_TIMEOUT_MS))
                    })
                    .await
                } => {
                    match result {
                        Ok(Some(event)) => {
                            if self.event_tx.send(event).await.is_err() {
                                break;
                            }
                        }
                        Ok(None) => {}
                        Err(join_error) => {
                            warn!(error = %join_error, "terminal polling task panicked");
                            return Err(std::io::Error::other("terminal polling task panicked"));
                        }
                    }
                }
            }
        }

        Ok(())
    }

    /// Polls for one terminal event. Non-terminal environments (tests, CI)
    /// report no event instead of an error.
    fn poll_terminal_event(timeout: Duration) -> Option<TuiEvent> {
        match event::poll(timeout) {
            Ok(true) => match event::read() {
                Ok(CrosstermEvent::Key(key)) => Some(TuiEvent::Key(key)),
                Ok(CrosstermEvent::Resize(cols, rows)) => Some(TuiEvent::Resize(cols, rows)),
                Ok(_) => None,
                Err(_) => None,
            },
            _ => None,
        }
    }
}

// =============================================================================
// Application state
// =============================================================================

/// How a console run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// User quit; the process exits.
    Exit,

    /// Logout: the caller rebuilds the entire client state and starts over,
    /// so nothing cached survives.
    Restart,
}

/// Platforms in the order they are offered by the wizard.
pub const PLATFORM_CHOICES: [Platform; 2] = [Platform::Teams, Platform::Slack];

/// Central state container for a console run.
pub struct App {
    config: Config,
    api: ApiClient,
    session: Arc<Session>,
    gui: GuiFlag,
    store: StatusStore,
    auth: AuthGate,
    wizard: Option<SetupWizard>,
    poller: Option<VerificationPoller>,
    webhooks: WebhookManager,
    poll_tx: mpsc::Sender<PollEvent>,
    password_input: Zeroizing<String>,
    platform_cursor: usize,
    selected_webhook: usize,
    theme: Theme,
    outcome: Option<RunOutcome>,
}

impl App {
    /// Builds the app from a completed startup sequence.
    #[must_use]
    pub fn new(config: Config, api: ApiClient, boot: Boot, poll_tx: mpsc::Sender<PollEvent>) -> Self {
        let webhooks = WebhookManager::new(api.clone(), Arc::clone(&boot.session));
        let mut app = Self {
            config,
            api,
            session: boot.session,
            gui: boot.gui,
            store: boot.store,
            auth: AuthGate::new(),
            wizard: None,
            poller: None,
            webhooks,
            poll_tx,
            password_input: Zeroizing::new(String::new()),
            platform_cursor: 0,
            selected_webhook: 0,
            theme: Theme::from_env(),
            outcome: None,
        };
        app.sync_wizard_with_status();
        app
    }

    /// The screen to render, recomputed from the current control state.
    #[must_use]
    pub fn screen(&self) -> Screen {
        route(
            self.gui,
            self.store.state(),
            self.wizard.as_ref().map(SetupWizard::step),
        )
    }

    /// How the run ended, once decided.
    #[must_use]
    pub fn outcome(&self) -> Option<RunOutcome> {
        self.outcome
    }

    /// Theme for rendering.
    #[must_use]
    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Accessors used by the rendering layer.
    #[must_use]
    pub fn store(&self) -> &StatusStore {
        &self.store
    }

    #[must_use]
    pub fn auth(&self) -> &AuthGate {
        &self.auth
    }

    #[must_use]
    pub fn wizard(&self) -> Option<&SetupWizard> {
        self.wizard.as_ref()
    }

    #[must_use]
    pub fn password_len(&self) -> usize {
        self.password_input.chars().count()
    }

    #[must_use]
    pub fn platform_cursor(&self) -> usize {
        self.platform_cursor
    }

    #[must_use]
    pub fn selected_webhook(&self) -> usize {
        self.selected_webhook
    }

    /// Whether the backend base URL is plain HTTP (drives the advisory
    /// warning on the verification screen).
    #[must_use]
    pub fn insecure_transport(&self) -> bool {
        !self.config.is_secure()
    }

    // -------------------------------------------------------------------------
    // Event handling
    // -------------------------------------------------------------------------

    /// Applies a key event to the current screen.
    pub async fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl+C quits from anywhere.
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.outcome = Some(RunOutcome::Exit);
            return;
        }

        match self.screen() {
            Screen::Disabled | Screen::Loading => {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc | KeyCode::Enter) {
                    self.outcome = Some(RunOutcome::Exit);
                }
            }
            Screen::Login | Screen::SetPassword => self.handle_auth_key(key).await,
            Screen::Setup(step) => self.handle_wizard_key(step, key).await,
            Screen::Dashboard => self.handle_dashboard_key(key).await,
        }
    }

    /// Applies an outcome delivered by the verification poller.
    pub async fn handle_poll(&mut self, event: PollEvent) {
        match event {
            PollEvent::Status(status) => {
                self.store.apply(Ok(status));
                // A snapshot that logs the session out tears the wizard down.
                self.sync_wizard_with_status();
            }
            PollEvent::SetupComplete(status) => {
                debug!("wizard completion signaled");
                self.store.apply(Ok(status));
                self.finish_wizard().await;
            }
        }
    }

    async fn handle_auth_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) if !c.is_control() => {
                self.password_input.push(c);
                self.auth.clear_error();
            }
            KeyCode::Backspace => {
                self.password_input.pop();
                self.auth.clear_error();
            }
            KeyCode::Enter => {
                if self.password_input.is_empty() {
                    return;
                }
                let accepted = self
                    .auth
                    .submit(&self.api, &self.session, &self.password_input)
                    .await;
                if accepted {
                    // The input is only cleared on success; a rejected
                    // password stays editable.
                    self.password_input.zeroize();
                    self.refresh().await;
                }
            }
            KeyCode::Esc => self.outcome = Some(RunOutcome::Exit),
            _ => {}
        }
    }

    async fn handle_wizard_key(&mut self, step: WizardStep, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            // Abandonment discards wizard state; nothing server-side to roll
            // back. Re-entering later restarts at platform selection.
            self.abandon_wizard();
            return;
        }

        let Some(wizard) = self.wizard.as_mut() else {
            return;
        };

        match step {
            WizardStep::SelectPlatform => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.platform_cursor = self.platform_cursor.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.platform_cursor = (self.platform_cursor + 1).min(PLATFORM_CHOICES.len() - 1);
                }
                KeyCode::Enter => wizard.select_platform(PLATFORM_CHOICES[self.platform_cursor]),
                KeyCode::Char('t') => wizard.select_platform(Platform::Teams),
                KeyCode::Char('s') => wizard.select_platform(Platform::Slack),
                _ => {}
            },
            WizardStep::EnterUrl => match key.code {
                KeyCode::Char(c) => wizard.input_char(c),
                KeyCode::Backspace => wizard.backspace(),
                KeyCode::Enter => {
                    if wizard.submit(&self.api, &self.session).await {
                        if wizard.awaiting_test() {
                            self.start_poller();
                        } else {
                            // Backend verified synchronously; no wait needed.
                            self.finish_wizard().await;
                        }
                    }
                }
                _ => {}
            },
            WizardStep::AwaitVerification => {}
        }
    }

    async fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_webhook = self.selected_webhook.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.store.webhooks().len();
                if len > 0 {
                    self.selected_webhook = (self.selected_webhook + 1).min(len - 1);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                let token = self
                    .store
                    .webhooks()
                    .get(self.selected_webhook)
                    .map(|w| w.token.clone());
                if let Some(token) = token {
                    self.webhooks.delete(&mut self.store, &token).await;
                    let len = self.store.webhooks().len();
                    self.selected_webhook = self.selected_webhook.min(len.saturating_sub(1));
                }
            }
            KeyCode::Char('a') => self.enter_wizard(),
            KeyCode::Char('r') => self.refresh().await,
            KeyCode::Char('l') => self.logout().await,
            KeyCode::Char('q') | KeyCode::Esc => self.outcome = Some(RunOutcome::Exit),
            _ => {}
        }
    }

    // -------------------------------------------------------------------------
    // State transitions
    // -------------------------------------------------------------------------

    /// Fetches a fresh snapshot and reconciles wizard entry with it.
    pub async fn refresh(&mut self) {
        self.store.refresh(&self.api, &self.session).await;
        self.sync_wizard_with_status();
    }

    /// Enters the wizard explicitly (dashboard "add webhook").
    fn enter_wizard(&mut self) {
        if self.wizard.is_none() {
            self.platform_cursor = 0;
            self.wizard = Some(SetupWizard::new());
        }
    }

    /// Discards wizard state and cancels any running poller.
    fn abandon_wizard(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.cancel();
        }
        self.wizard = None;
    }

    /// Leaves setup mode after a completed verification and re-enters
    /// dashboard routing off a fresh snapshot.
    async fn finish_wizard(&mut self) {
        if let Some(wizard) = self.wizard.as_mut() {
            wizard.complete();
        }
        self.abandon_wizard();
        self.refresh().await;
    }

    /// Starts the verification poller for the current wizard.
    fn start_poller(&mut self) {
        if self.poller.is_some() {
            return;
        }
        self.poller = Some(VerificationPoller::spawn(
            self.api.clone(),
            Arc::clone(&self.session),
            self.config.poll_interval,
            self.poll_tx.clone(),
        ));
    }

    /// Reconciles wizard-entry state with the latest snapshot.
    ///
    /// Entering setup is wizard-local: a snapshot with no webhooks opens the
    /// wizard only when none is active, so an unrelated refresh never resets
    /// an in-progress flow. Losing authentication tears the wizard down.
    fn sync_wizard_with_status(&mut self) {
        let Some(snapshot) = self.store.snapshot() else {
            self.abandon_wizard();
            return;
        };

        let authenticated = snapshot.logged_in && snapshot.has_admin_password;
        if !authenticated {
            self.abandon_wizard();
            return;
        }

        if !snapshot.has_webhooks && self.wizard.is_none() {
            self.enter_wizard();
        }
    }

    /// Invalidates the session server-side and requests a full restart.
    async fn logout(&mut self) {
        match self.auth.logout(&self.api, &self.session).await {
            Ok(()) => {
                // Equivalent of a full page reload: the caller rebuilds
                // everything from bootstrap.
                self.abandon_wizard();
                self.outcome = Some(RunOutcome::Restart);
            }
            Err(e) => warn!(error = %e, "logout failed"),
        }
    }
}
