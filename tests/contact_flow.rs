// Integration tests - the contact form boundary: validate locally, then
// relay exactly once.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use termfolio::app::{App, OverlayKind};
use termfolio::config::{BootConfig, Config};
use termfolio::contact::{ContactMessage, Field, SubmitStatus};
use termfolio::services::mail_relay::MailRelay;
use termfolio::services::tip_flag::TipFlags;

/// Records every outbound call instead of touching the network.
#[derive(Default)]
struct RecordingRelay {
    calls: Mutex<Vec<ContactMessage>>,
    fail: bool,
}

impl MailRelay for RecordingRelay {
    fn send(&self, message: &ContactMessage) -> anyhow::Result<()> {
        self.calls.lock().unwrap().push(message.clone());
        if self.fail {
            anyhow::bail!("simulated relay outage");
        }
        Ok(())
    }
}

fn app_with_relay(relay: Arc<RecordingRelay>) -> App {
    let config = Config {
        boot: BootConfig {
            hold_ticks: 0,
            skip: true,
        },
        ..Default::default()
    };
    App::new(config, relay, TipFlags::load(None), 100, 40)
}

fn press(app: &mut App, code: KeyCode) {
    app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn fill_form(app: &mut App, name: &str, email: &str, subject: &str, message: &str) {
    press(app, KeyCode::Char('f'));
    assert_eq!(app.overlay, OverlayKind::ContactForm);
    type_text(app, name);
    press(app, KeyCode::Tab);
    type_text(app, email);
    press(app, KeyCode::Tab);
    type_text(app, subject);
    press(app, KeyCode::Tab);
    type_text(app, message);
}

fn wait_for_outcome(app: &mut App) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !app.process_async_messages() {
        assert!(Instant::now() < deadline, "relay outcome never arrived");
        std::thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_empty_name_never_invokes_relay() {
    let relay = Arc::new(RecordingRelay::default());
    let mut app = app_with_relay(Arc::clone(&relay));

    fill_form(&mut app, "", "sam@example.com", "Hello", "A message");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.form.status, SubmitStatus::Editing);
    assert_eq!(app.form.error(Field::Name), Some("Name is required"));
    // Give any (erroneous) worker thread a moment, then confirm silence.
    std::thread::sleep(Duration::from_millis(50));
    assert!(relay.calls.lock().unwrap().is_empty());
}

#[test]
fn test_malformed_email_never_invokes_relay() {
    let relay = Arc::new(RecordingRelay::default());
    let mut app = app_with_relay(Arc::clone(&relay));

    fill_form(&mut app, "Sam", "not-an-email", "Hello", "A message");
    press(&mut app, KeyCode::Enter);

    assert_eq!(app.form.error(Field::Email), Some("Email is invalid"));
    std::thread::sleep(Duration::from_millis(50));
    assert!(relay.calls.lock().unwrap().is_empty());
}

#[test]
fn test_valid_form_relays_exactly_once() {
    let relay = Arc::new(RecordingRelay::default());
    let mut app = app_with_relay(Arc::clone(&relay));

    fill_form(&mut app, "Sam", "sam@example.com", "Hello", "A message");
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.form.status, SubmitStatus::Submitting);

    wait_for_outcome(&mut app);
    assert_eq!(app.form.status, SubmitStatus::Sent);

    let calls = relay.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].name, "Sam");
    assert_eq!(calls[0].email, "sam@example.com");
}

#[test]
fn test_relay_failure_surfaces_generic_message() {
    let relay = Arc::new(RecordingRelay {
        calls: Mutex::new(Vec::new()),
        fail: true,
    });
    let mut app = app_with_relay(Arc::clone(&relay));

    fill_form(&mut app, "Sam", "sam@example.com", "Hello", "A message");
    press(&mut app, KeyCode::Enter);
    wait_for_outcome(&mut app);

    match &app.form.status {
        SubmitStatus::Failed(message) => {
            assert_eq!(message, "Failed to send message. Please try again later.");
            assert!(
                !message.contains("outage"),
                "internal error detail must not reach the user"
            );
        }
        other => panic!("expected failure status, got {:?}", other),
    }
    // Fields are kept so the user can resubmit by hand.
    assert_eq!(app.form.value(Field::Name), "Sam");
}
