//! Application state and core logic

use crate::config::FormConfig;
use crate::state::{ContactForm, FieldKind, Form, Notifier, Severity};
use crate::submitter::{SubmitOutcome, Submitter};
use crate::transport::{SimulatedTransport, Transport};
use crossterm::event::{
    KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Main application struct
pub struct App {
    /// The contact form being filled in
    pub form: ContactForm,
    /// Toast notifications
    pub notifier: Notifier,
    /// Sends the form and reports back
    submitter: Submitter,
    /// Pause in typing before a field is validated
    pub debounce: Duration,
    /// Render notification icons in ASCII
    pub ascii_icons: bool,
    /// Whether the app should quit
    quit: bool,
}

impl App {
    /// Create an App wired to the simulated transport described by `config`
    pub fn new(config: &FormConfig) -> Self {
        let mut transport = SimulatedTransport::new(config.submit_delay());
        if config.simulate_failure() {
            tracing::info!("simulated transport will fail every send");
            transport = transport.failing();
        }
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create an App sending through the given transport
    pub fn with_transport(config: &FormConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            form: ContactForm::from_specs(&config.field_specs()),
            notifier: Notifier::new(config.notification_duration()),
            submitter: Submitter::new(transport),
            debounce: config.debounce(),
            ascii_icons: config.ascii_icons(),
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Advance timers and collect a finished submission
    pub fn tick(&mut self, now: Instant) {
        self.form.tick(now);
        if let Some(outcome) = self.submitter.poll(&mut self.form, &mut self.notifier, now) {
            tracing::info!(?outcome, "submission finished");
        }
        self.notifier.tick(now);
    }

    /// Handle a key press on the form
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        let on_submit_row = self.form.is_submit_row_active();
        let active_kind = self
            .form
            .get_field(self.form.active_field())
            .map(|f| f.kind);

        match key.code {
            KeyCode::Tab | KeyCode::Down => self.form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.form.prev_field(),
            // Keyboard shortcuts (work from anywhere)
            KeyCode::Char('s') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.submit(now);
            }
            KeyCode::Char('s') if key.modifiers.contains(crate::platform::SUBMIT_MODIFIER) => {
                self.submit(now);
            }
            KeyCode::Esc => {
                self.notifier.dismiss_latest(now);
            }
            KeyCode::Enter if on_submit_row => self.submit(now),
            // Enter in a textarea adds a newline, elsewhere it moves on
            KeyCode::Enter if active_kind == Some(FieldKind::Textarea) => {
                self.form.input_char('\n', now, self.debounce);
            }
            KeyCode::Enter => self.form.next_field(),
            KeyCode::Left if active_kind == Some(FieldKind::Select) => {
                self.form.cycle_option(false, now, self.debounce);
            }
            KeyCode::Right if active_kind == Some(FieldKind::Select) => {
                self.form.cycle_option(true, now, self.debounce);
            }
            KeyCode::Char(c)
                if !on_submit_row
                    && !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.form.input_char(c, now, self.debounce);
            }
            KeyCode::Backspace if !on_submit_row => self.form.backspace(now, self.debounce),
            _ => {}
        }
    }

    /// Handle a mouse event. A left click on a toast's close control dismisses it.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, screen: Rect, now: Instant) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        if let Some(id) =
            crate::ui::close_control_at(screen, &self.notifier, now, mouse.column, mouse.row)
        {
            self.notifier.dismiss(id, now);
        }
    }

    /// Tell the user the config file was ignored
    pub fn report_config_error(&mut self, err: &anyhow::Error, now: Instant) {
        let message = format!("Could not read settings, using defaults: {err}");
        self.notifier.show(&message, Severity::Warning, now);
    }

    /// Whether a send is waiting on the transport
    pub fn is_submitting(&self) -> bool {
        self.form.is_submitting() || self.submitter.is_in_flight()
    }

    fn submit(&mut self, now: Instant) {
        match self
            .submitter
            .dispatch(&mut self.form, &mut self.notifier, now)
        {
            SubmitOutcome::Dispatched => tracing::info!("submission dispatched"),
            outcome => tracing::debug!(?outcome, "submission not dispatched"),
        }
    }

    /// Cancel every timer and abort an in-flight send
    pub fn teardown(&mut self) {
        self.form.teardown();
        self.notifier.teardown();
        self.submitter.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{SubmissionState, ValidationError, Validity, Visibility};
    use crate::submitter::{FAILURE_MESSAGE, INVALID_FORM_MESSAGE, SUCCESS_MESSAGE};
    use crate::transport::{MockTransport, TransportError};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str, now: Instant) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)), now);
        }
    }

    /// Fill the default contact form through key events
    fn fill_form(app: &mut App, now: Instant) {
        type_text(app, "Jane Doe", now);
        app.handle_key(key(KeyCode::Tab), now);
        type_text(app, "jane@example.com", now);
        app.handle_key(key(KeyCode::Tab), now);
        app.handle_key(key(KeyCode::Tab), now); // skip optional phone
        app.handle_key(key(KeyCode::Right), now);
        app.handle_key(key(KeyCode::Tab), now);
        type_text(app, "Looking forward to hearing back.", now);
    }

    fn app_with(transport: MockTransport) -> App {
        App::with_transport(&FormConfig::default(), Arc::new(transport))
    }

    fn last_message(app: &App) -> Option<(Severity, String)> {
        app.notifier
            .iter()
            .last()
            .map(|n| (n.severity, n.message.clone()))
    }

    mod key_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_should_quit_initially_false() {
            let mut app = App::new(&FormConfig::default());
            assert!(!app.should_quit());
            app.request_quit();
            assert!(app.should_quit());
        }

        #[test]
        fn test_typing_fills_active_field() {
            let now = Instant::now();
            let mut app = App::new(&FormConfig::default());
            type_text(&mut app, "Jo", now);
            app.handle_key(key(KeyCode::Backspace), now);
            assert_eq!(app.form.field("name").unwrap().value, "J");
        }

        #[test]
        fn test_ctrl_chars_are_not_typed() {
            let now = Instant::now();
            let mut app = App::new(&FormConfig::default());
            app.handle_key(ctrl('x'), now);
            assert_eq!(app.form.field("name").unwrap().value, "");
        }

        #[test]
        fn test_enter_in_textarea_adds_newline() {
            let now = Instant::now();
            let mut app = App::new(&FormConfig::default());
            app.form.move_focus(4);
            type_text(&mut app, "line", now);
            app.handle_key(key(KeyCode::Enter), now);
            assert_eq!(app.form.field("message").unwrap().value, "line\n");
        }

        #[test]
        fn test_enter_on_text_field_moves_on() {
            let now = Instant::now();
            let mut app = App::new(&FormConfig::default());
            app.handle_key(key(KeyCode::Enter), now);
            assert_eq!(app.form.active_field(), 1);
        }

        #[test]
        fn test_blur_shows_inline_error() {
            let now = Instant::now();
            let mut app = App::new(&FormConfig::default());
            type_text(&mut app, "John123", now);
            app.handle_key(key(KeyCode::Tab), now);
            assert_eq!(
                app.form.field("name").unwrap().validity,
                Validity::Invalid(ValidationError::InvalidCharacters)
            );
        }

        #[test]
        fn test_debounced_validation_on_tick() {
            let start = Instant::now();
            let mut app = App::new(&FormConfig::default());
            app.form.move_focus(1);
            type_text(&mut app, "user@@bad", start);

            app.tick(start + Duration::from_millis(100));
            assert!(!app.form.field("email").unwrap().is_invalid());

            app.tick(start + Duration::from_millis(500));
            assert_eq!(
                app.form.field("email").unwrap().validity,
                Validity::Invalid(ValidationError::InvalidEmail)
            );
        }

        #[test]
        fn test_esc_dismisses_latest_notification() {
            let now = Instant::now();
            let mut app = App::new(&FormConfig::default());
            app.notifier.show("hello", Severity::Info, now);
            app.handle_key(key(KeyCode::Esc), now);
            app.tick(now + Duration::from_millis(300));
            assert!(app.notifier.is_empty());
        }

        #[test]
        fn test_config_error_raises_warning() {
            let now = Instant::now();
            let mut app = App::new(&FormConfig::default());
            app.report_config_error(&anyhow::anyhow!("expected value at line 1"), now);
            let (severity, message) = last_message(&app).unwrap();
            assert_eq!(severity, Severity::Warning);
            assert!(message.contains("expected value at line 1"));
        }
    }

    mod mouse_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        const SCREEN: Rect = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 24,
        };

        fn click(column: u16, row: u16) -> MouseEvent {
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            }
        }

        fn visibility(app: &App, message: &str) -> Option<Visibility> {
            app.notifier
                .iter()
                .find(|n| n.message == message)
                .map(|n| n.visibility)
        }

        /// Two toasts, fully slid in. Newest sits at row 1, the older one at row 4.
        fn app_with_two_toasts(start: Instant) -> (App, Instant) {
            let mut app = App::new(&FormConfig::default());
            app.notifier.show("older", Severity::Info, start);
            app.notifier.show("newer", Severity::Info, start);
            app.tick(start + Duration::from_millis(100));
            (app, start + Duration::from_millis(400))
        }

        #[test]
        fn test_click_close_dismisses_that_toast_only() {
            let (mut app, now) = app_with_two_toasts(Instant::now());

            // 80 wide screen: 48 wide toast resting at x = 31, close control at x = 32..35
            app.handle_mouse(click(33, 4), SCREEN, now);

            assert_eq!(visibility(&app, "older"), Some(Visibility::Leaving));
            assert_eq!(visibility(&app, "newer"), Some(Visibility::Shown));

            app.tick(now + Duration::from_millis(300));
            assert_eq!(visibility(&app, "older"), None);
            assert_eq!(visibility(&app, "newer"), Some(Visibility::Shown));
        }

        #[test]
        fn test_click_elsewhere_keeps_toasts() {
            let (mut app, now) = app_with_two_toasts(Instant::now());

            // Toast body and an empty corner of the screen
            app.handle_mouse(click(50, 2), SCREEN, now);
            app.handle_mouse(click(2, 20), SCREEN, now);

            assert_eq!(visibility(&app, "older"), Some(Visibility::Shown));
            assert_eq!(visibility(&app, "newer"), Some(Visibility::Shown));
        }

        #[test]
        fn test_only_left_press_dismisses() {
            let (mut app, now) = app_with_two_toasts(Instant::now());
            let mut event = click(33, 1);
            event.kind = MouseEventKind::Up(MouseButton::Left);

            app.handle_mouse(event, SCREEN, now);

            assert_eq!(visibility(&app, "newer"), Some(Visibility::Shown));
        }
    }

    mod submit_tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test(start_paused = true)]
        async fn test_invalid_submit_focuses_first_error() {
            let mut transport = MockTransport::new();
            transport.expect_send().times(0);
            let mut app = app_with(transport);
            let now = Instant::now();

            app.form.move_focus(4);
            type_text(&mut app, "hi", now);
            app.handle_key(ctrl('s'), now);

            assert_eq!(
                last_message(&app),
                Some((Severity::Error, INVALID_FORM_MESSAGE.to_string()))
            );
            assert_eq!(app.form.active_field(), 0);
            assert_eq!(
                app.form.field("message").unwrap().validity,
                Validity::Invalid(ValidationError::TooShort)
            );
        }

        #[tokio::test(start_paused = true)]
        async fn test_valid_submit_round_trip() {
            let mut transport = MockTransport::new();
            transport.expect_send().times(1).returning(|_| Ok(()));
            let mut app = app_with(transport);
            let now = Instant::now();

            fill_form(&mut app, now);
            app.handle_key(ctrl('s'), now);
            assert!(app.is_submitting());

            // A second press while in flight is ignored
            app.handle_key(ctrl('s'), now);

            tokio::time::sleep(Duration::from_millis(1)).await;
            app.tick(now);

            assert!(!app.is_submitting());
            assert_eq!(app.form.submission, SubmissionState::Done);
            assert_eq!(
                last_message(&app),
                Some((Severity::Success, SUCCESS_MESSAGE.to_string()))
            );
            assert!(app.form.fields.iter().all(|f| f.value.is_empty() && !f.filled));
        }

        #[tokio::test(start_paused = true)]
        async fn test_failed_submit_keeps_input() {
            let mut transport = MockTransport::new();
            transport
                .expect_send()
                .times(1)
                .returning(|_| Err(TransportError::Rejected("server error".to_string())));
            let mut app = app_with(transport);
            let now = Instant::now();

            fill_form(&mut app, now);
            let before = app.form.values();
            app.form.move_focus(app.form.fields.len());
            app.handle_key(key(KeyCode::Enter), now);

            tokio::time::sleep(Duration::from_millis(1)).await;
            app.tick(now);

            assert_eq!(
                last_message(&app),
                Some((Severity::Error, FAILURE_MESSAGE.to_string()))
            );
            assert_eq!(app.form.values(), before);
        }

        #[tokio::test(start_paused = true)]
        async fn test_teardown_clears_timers() {
            let mut app = App::new(&FormConfig::default());
            let now = Instant::now();
            fill_form(&mut app, now);
            app.handle_key(ctrl('s'), now);

            app.teardown();

            assert!(!app.form.has_pending_timers());
            assert!(app.notifier.is_empty());
        }
    }
}
