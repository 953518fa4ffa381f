//! Email submission flow.
//!
//! ```text
//! Editing ──open──▶ ComposingEmail ──begin_submit──▶ Submitting ──finish(Ok)──▶ Done
//!    ▲                   │    ▲                           │
//!    └──────cancel───────┘    └────────finish(Err)────────┘
//! ```
//!
//! A failed gate leaves the state untouched. There is no guard against a
//! second `begin_submit` while a request is in flight.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::placeholder::is_visually_empty;
use crate::error::ValidationError;

/// Simple address shape, not an RFC 5322 parser.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

pub fn is_valid_address(address: &str) -> bool {
    EMAIL_RE.is_match(address)
}

/// Body of `POST /send-email`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailRequest {
    pub sender_email: String,
    pub recipient_email: String,
    pub letter_content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmailState {
    #[default]
    Editing,
    ComposingEmail,
    Submitting,
    Done,
}

#[derive(Debug, Default)]
pub struct EmailFlow {
    state: EmailState,
}

impl EmailFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EmailState {
        self.state
    }

    /// Whether the email form should be visible.
    pub fn form_open(&self) -> bool {
        matches!(self.state, EmailState::ComposingEmail | EmailState::Submitting)
    }

    /// "Send letter": open the email form for a non-empty draft.
    pub fn open(&mut self, draft: &str) -> Result<(), ValidationError> {
        if is_visually_empty(draft) {
            return Err(ValidationError::EmptyLetter);
        }
        if matches!(self.state, EmailState::Editing | EmailState::Done) {
            self.state = EmailState::ComposingEmail;
        }
        Ok(())
    }

    /// "Cancel": back to the editor. Returns `false` when there was nothing
    /// to cancel, including while a request is in flight.
    pub fn cancel(&mut self) -> bool {
        if self.state != EmailState::ComposingEmail {
            return false;
        }
        self.state = EmailState::Editing;
        true
    }

    /// "Send email": validate the form and move to `Submitting`.
    ///
    /// Gates, in order: both addresses present, both well-formed, draft not
    /// visually empty.
    pub fn begin_submit(
        &mut self,
        sender: &str,
        recipient: &str,
        draft: &str,
    ) -> Result<EmailRequest, ValidationError> {
        if !self.form_open() {
            return Err(ValidationError::FormClosed);
        }
        let sender = sender.trim();
        let recipient = recipient.trim();
        if sender.is_empty() || recipient.is_empty() {
            return Err(ValidationError::MissingAddress);
        }
        if !is_valid_address(sender) || !is_valid_address(recipient) {
            return Err(ValidationError::InvalidAddress);
        }
        if is_visually_empty(draft) {
            return Err(ValidationError::EmptyLetter);
        }

        self.state = EmailState::Submitting;
        Ok(EmailRequest {
            sender_email: sender.to_string(),
            recipient_email: recipient.to_string(),
            letter_content: draft.to_string(),
        })
    }

    /// Record the outcome of the request.
    pub fn finish(&mut self, succeeded: bool) {
        if self.state != EmailState::Submitting {
            return;
        }
        self.state = if succeeded {
            EmailState::Done
        } else {
            EmailState::ComposingEmail
        };
    }
}
