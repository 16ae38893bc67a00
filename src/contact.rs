//! Contact form state: field focus, local validation, submission status.
//!
//! Validation happens entirely here; the outbound call lives behind
//! [`crate::services::mail_relay::MailRelay`] and is only reached once every
//! field check passes.

/// The one user-facing failure string; the underlying error goes to the log.
pub const GENERIC_FAILURE: &str = "Failed to send message. Please try again later.";

/// A validated, ready-to-send message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn label(self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
            Field::Subject => "Subject",
            Field::Message => "Message",
        }
    }

    fn index(self) -> usize {
        match self {
            Field::Name => 0,
            Field::Email => 1,
            Field::Subject => 2,
            Field::Message => 3,
        }
    }

    fn next(self) -> Field {
        Field::ALL[(self.index() + 1) % Field::ALL.len()]
    }

    fn prev(self) -> Field {
        Field::ALL[(self.index() + Field::ALL.len() - 1) % Field::ALL.len()]
    }
}

/// Where a submission currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitStatus {
    Editing,
    Submitting,
    Sent,
    Failed(String),
}

/// Shape check only: something before the `@`, a dot somewhere after it,
/// and no whitespace anywhere.
pub fn email_looks_valid(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
        }
        None => false,
    }
}

#[derive(Debug, Clone)]
pub struct ContactForm {
    values: [String; 4],
    errors: [Option<&'static str>; 4],
    focus: Field,
    pub status: SubmitStatus,
}

impl ContactForm {
    pub fn new() -> Self {
        Self {
            values: Default::default(),
            errors: Default::default(),
            focus: Field::Name,
            status: SubmitStatus::Editing,
        }
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn value(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn error(&self, field: Field) -> Option<&'static str> {
        self.errors[field.index()]
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn insert_char(&mut self, c: char) {
        if self.status == SubmitStatus::Submitting || c.is_control() {
            return;
        }
        self.values[self.focus.index()].push(c);
        // Typing clears the field's error, like the page version.
        self.errors[self.focus.index()] = None;
        if matches!(self.status, SubmitStatus::Sent | SubmitStatus::Failed(_)) {
            self.status = SubmitStatus::Editing;
        }
    }

    pub fn backspace(&mut self) {
        if self.status == SubmitStatus::Submitting {
            return;
        }
        self.values[self.focus.index()].pop();
        self.errors[self.focus.index()] = None;
    }

    /// Run the field checks. On success, returns the message to relay and
    /// marks the form in flight; on failure, records per-field errors and
    /// keeps everything editable.
    pub fn validate_for_submit(&mut self) -> Option<ContactMessage> {
        if self.status == SubmitStatus::Submitting {
            return None;
        }
        let mut ok = true;
        for field in Field::ALL {
            let value = self.value(field).trim();
            let error = match field {
                Field::Name if value.is_empty() => Some("Name is required"),
                Field::Email if value.is_empty() => Some("Email is required"),
                Field::Email if !email_looks_valid(value) => Some("Email is invalid"),
                Field::Subject if value.is_empty() => Some("Subject is required"),
                Field::Message if value.is_empty() => Some("Message is required"),
                _ => None,
            };
            ok &= error.is_none();
            self.errors[field.index()] = error;
        }
        if !ok {
            return None;
        }
        self.status = SubmitStatus::Submitting;
        Some(ContactMessage {
            name: self.value(Field::Name).trim().to_string(),
            email: self.value(Field::Email).trim().to_string(),
            subject: self.value(Field::Subject).trim().to_string(),
            message: self.value(Field::Message).trim().to_string(),
        })
    }

    /// Record the relay outcome. Success clears the fields for a fresh
    /// message; failure keeps them so the user can resubmit.
    pub fn note_outcome(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => {
                self.values = Default::default();
                self.focus = Field::Name;
                self.status = SubmitStatus::Sent;
            }
            Err(message) => self.status = SubmitStatus::Failed(message),
        }
    }
}

impl Default for ContactForm {
    fn default() -> Self {
        Self::new()
    }
}
