//! Root application component
//!
//! The App owns the coordinator and the host history it talks to, and is
//! the only place Actions turn into modal operations. Child components only
//! see the stack through a `ModalContext`.

use crate::action::Action;
use crate::component::Component;
use crate::components::{HelpDialog, HomeComponent, ModalDialog, NotificationLog, QuitDialog};
use crate::config::Config;
use anyhow::Result;
use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use history_modals::{
    ModalContext, ModalCoordinator, ModalRequest, NavigationHistory, NullHistory, SessionHistory,
    Subscription,
};
use ratatui::{layout::Rect, Frame};
use std::cell::RefCell;
use std::rc::Rc;

/// Id of the help overlay in the modal stack
pub const HELP_MODAL_ID: &str = "help";

/// Id of the quit confirmation in the modal stack
pub const QUIT_MODAL_ID: &str = "quit";

// ═══════════════════════════════════════════════════════════════════════════════
// App Struct
// ═══════════════════════════════════════════════════════════════════════════════

/// Main application state - coordinates between components
pub struct App {
    /// Modal stack synced with `session`
    pub coordinator: ModalCoordinator,

    /// Simulated tab history; `None` when history is disabled in the config
    pub session: Option<Rc<SessionHistory>>,

    pub config: Config,

    /// Flag to indicate the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: Option<String>,

    /// Stack notifications, one line per published stack
    pub log: Rc<RefCell<NotificationLog>>,

    /// Counter for generated modal ids
    next_modal: usize,

    _notifications: Subscription,

    // ─────────────────────────────────────────────────────────────────────────
    // Child Components
    // ─────────────────────────────────────────────────────────────────────────
    pub home: HomeComponent,
    pub modal_dialog: ModalDialog,
    pub help_dialog: HelpDialog,
    pub quit_dialog: QuitDialog,
}

// ═══════════════════════════════════════════════════════════════════════════════
// App Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl App {
    pub fn new(config: Config) -> App {
        let session = config
            .history_enabled
            .then(|| Rc::new(SessionHistory::new()));

        let history: Rc<dyn NavigationHistory> = match &session {
            Some(session) => Rc::clone(session) as Rc<dyn NavigationHistory>,
            None => Rc::new(NullHistory),
        };
        let coordinator = ModalCoordinator::new(history);

        let log = Rc::new(RefCell::new(NotificationLog::default()));
        let notifications = {
            let log = Rc::clone(&log);
            coordinator.subscribe(move |stack| {
                log.borrow_mut().push(format!(
                    "{}  depth={}  [{}]",
                    Local::now().format("%H:%M:%S"),
                    stack.len(),
                    stack.ids().join(", ")
                ));
            })
        };

        let home = HomeComponent::new(
            ModalContext::provide(&coordinator),
            session.clone(),
            Rc::clone(&log),
        );

        App {
            coordinator,
            session,
            config,
            should_quit: false,
            status_message: None,
            log,
            next_modal: 0,
            _notifications: notifications,
            home,
            modal_dialog: ModalDialog,
            help_dialog: HelpDialog::default(),
            quit_dialog: QuitDialog,
        }
    }

    fn top_modal_id(&self) -> Option<String> {
        self.coordinator
            .active_modals()
            .top()
            .map(|modal| modal.id.clone())
    }

    fn open_generated_modal(&mut self) {
        self.next_modal += 1;
        let request = ModalRequest::new(format!("{}-{}", self.config.modal_prefix, self.next_modal))
            .with("opened_at", Local::now().format("%H:%M:%S").to_string())
            .with("sequence", self.next_modal);
        self.coordinator.open_modal(request);
    }

    fn navigate(&mut self, forward: bool) {
        let Some(session) = &self.session else {
            self.status_message =
                Some("Navigation history is disabled; use x to close modals".to_string());
            return;
        };

        let moved = if forward { session.forward() } else { session.back() };
        if !moved {
            let edge = if forward { "last" } else { "first" };
            self.status_message = Some(format!("Already at the {} history entry", edge));
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Component Implementation
// ═══════════════════════════════════════════════════════════════════════════════

impl Component for App {
    fn init(&mut self) -> Result<()> {
        tracing::info!(
            history_enabled = self.session.is_some(),
            modal_prefix = %self.config.modal_prefix,
            "history-modals started"
        );
        Ok(())
    }

    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::ForceQuit));
        }

        self.status_message = None;
        match self.top_modal_id().as_deref() {
            Some(QUIT_MODAL_ID) => self.quit_dialog.handle_key_event(key),
            Some(HELP_MODAL_ID) => self.help_dialog.handle_key_event(key),
            Some(_) => self.modal_dialog.handle_key_event(key),
            None => self.home.handle_key_event(key),
        }
    }

    fn update(&mut self, action: Action) -> Result<Option<Action>> {
        match action {
            // ─────────────────────────────────────────────────────────────────
            // App Lifecycle
            // ─────────────────────────────────────────────────────────────────
            Action::Tick | Action::Resize(_, _) => {}
            Action::ForceQuit => {
                self.should_quit = true;
            }

            // ─────────────────────────────────────────────────────────────────
            // Modals
            // ─────────────────────────────────────────────────────────────────
            Action::OpenModal => self.open_generated_modal(),
            Action::OpenDuplicate => match self.coordinator.active_modals().top() {
                Some(top) => self.coordinator.open_modal(ModalRequest {
                    modal_id: top.id.clone(),
                    data: top.data.clone(),
                }),
                None => self.status_message = Some("No modal to duplicate".to_string()),
            },
            Action::CloseModal(modal_id) => self.coordinator.close_modal(&modal_id),
            Action::CloseTopModal => match self.top_modal_id() {
                Some(modal_id) => return Ok(Some(Action::CloseModal(modal_id))),
                None => self.status_message = Some("No open modal".to_string()),
            },
            Action::OpenHelp => {
                if self.top_modal_id().as_deref() == Some(HELP_MODAL_ID) {
                    return Ok(Some(Action::CloseModal(HELP_MODAL_ID.to_string())));
                }
                self.help_dialog.update(Action::OpenHelp)?;
                self.coordinator.open_modal(HELP_MODAL_ID);
            }
            Action::OpenQuitDialog => {
                if !self.coordinator.active_modals().contains(QUIT_MODAL_ID) {
                    self.coordinator.open_modal(QUIT_MODAL_ID);
                }
            }

            // ─────────────────────────────────────────────────────────────────
            // Host Navigation
            // ─────────────────────────────────────────────────────────────────
            Action::NavigateBack => self.navigate(false),
            Action::NavigateForward => self.navigate(true),

            // ─────────────────────────────────────────────────────────────────
            // Scrolling (help overlay when open, notification log otherwise)
            // ─────────────────────────────────────────────────────────────────
            Action::ScrollUp | Action::ScrollDown => {
                if self.top_modal_id().as_deref() == Some(HELP_MODAL_ID) {
                    self.help_dialog.update(action)?;
                } else {
                    self.home.update(action)?;
                }
            }
            Action::ClearLog => {
                self.home.update(action)?;
            }
        }

        Ok(None)
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect) -> Result<()> {
        self.home
            .draw_with_status(frame, area, self.status_message.as_deref())?;

        // Bottom to top, so the newest modal ends up on top
        let stack = self.coordinator.active_modals();
        let top_index = stack.len().saturating_sub(1);
        for (depth, modal) in stack.iter().enumerate() {
            match modal.id.as_str() {
                HELP_MODAL_ID => self.help_dialog.draw(frame, area)?,
                QUIT_MODAL_ID => self.quit_dialog.draw(frame, area)?,
                _ => self.modal_dialog.draw_with_modal(
                    frame,
                    area,
                    modal,
                    depth,
                    depth == top_index,
                )?,
            }
        }

        Ok(())
    }
}
