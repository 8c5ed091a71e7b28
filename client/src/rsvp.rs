//! RSVP form
//!
//! Holds the draft a guest is editing and sends it to the backend. A successful submission
//! resets the draft and refreshes the [`Guestbook`], a failed one leaves the draft alone so the
//! guest can try again.
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::api::{ApiError, Backend};
use crate::guestbook::Guestbook;
use crate::NewComment;

/// Upper bound of the guest count a draft accepts
pub const MAX_GUESTS: u32 = 20;

pub const SENT_MESSAGE: &str = "Thank you! Your message has been sent.";
const SEND_FAILED: &str = "Failed to send message";

/// The RSVP a guest is currently filling in
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct RsvpDraft {
    #[validate(custom = "not_blank")]
    pub name: String,
    #[validate(custom = "not_blank")]
    pub message: String,
    /// `None` until the guest picked yes or no
    pub attending: Option<bool>,
    /// At most [`MAX_GUESTS`] is sent
    pub guests: u32,
    pub phone: String,
}

impl Default for RsvpDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            message: String::new(),
            attending: None,
            guests: 1,
            phone: String::new(),
        }
    }
}

impl RsvpDraft {
    /// Sets the guest count, values above [`MAX_GUESTS`] are capped
    pub fn set_guests(&mut self, guests: u32) {
        self.guests = guests.min(MAX_GUESTS);
    }

    /// Body sent to the backend, fields are passed on as entered
    pub fn to_new_comment(&self) -> NewComment {
        NewComment {
            name: self.name.clone(),
            message: self.message.clone(),
            attending: self.attending,
            guests: self.guests.min(MAX_GUESTS),
            phone: self.phone.clone(),
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }

    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Please provide your name and a message")]
    MissingFields(#[source] ValidationErrors),
    /// Shows the text the backend answered with, if there was any
    #[error("{}", .0.server_reason().unwrap_or(SEND_FAILED))]
    Failed(#[source] ApiError),
}

/// Message shown above the form after a submission
#[derive(Debug, Clone, PartialEq)]
pub enum FormStatus {
    Sent(String),
    Error(String),
}

/// Outcome of a call to [`RsvpForm::submit`] that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submitted {
    /// The backend accepted the RSVP
    Sent,
    /// Another submission of this form is still running, nothing was sent
    AlreadySubmitting,
}

/// Sets a flag for as long as it lives
///
/// Entering fails when the flag is already set.
struct InFlight<'a>(&'a Cell<bool>);

impl<'a> InFlight<'a> {
    fn enter(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

pub struct RsvpForm<B> {
    backend: Rc<B>,
    guestbook: Rc<Guestbook<B>>,
    draft: RefCell<RsvpDraft>,
    submitting: Cell<bool>,
    status: RefCell<Option<FormStatus>>,
}

impl<B> RsvpForm<B>
where
    B: Backend,
{
    /// Creates a form with an empty draft that refreshes `guestbook` after every RSVP it sent
    pub fn new(backend: Rc<B>, guestbook: Rc<Guestbook<B>>) -> Self {
        Self {
            backend,
            guestbook,
            draft: RefCell::new(RsvpDraft::default()),
            submitting: Cell::new(false),
            status: RefCell::new(None),
        }
    }

    pub fn guestbook(&self) -> &Rc<Guestbook<B>> {
        &self.guestbook
    }

    pub fn draft(&self) -> RsvpDraft {
        self.draft.borrow().clone()
    }

    pub fn status(&self) -> Option<FormStatus> {
        self.status.borrow().clone()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.get()
    }

    pub fn set_name(&self, name: impl Into<String>) {
        self.draft.borrow_mut().name = name.into();
    }

    pub fn set_message(&self, message: impl Into<String>) {
        self.draft.borrow_mut().message = message.into();
    }

    pub fn set_attending(&self, attending: Option<bool>) {
        self.draft.borrow_mut().attending = attending;
    }

    pub fn set_guests(&self, guests: u32) {
        self.draft.borrow_mut().set_guests(guests);
    }

    pub fn set_phone(&self, phone: impl Into<String>) {
        self.draft.borrow_mut().phone = phone.into();
    }

    /// Sends the current draft
    ///
    /// Does nothing while an earlier submission of this form is still in flight. A draft without
    /// name or message is rejected before anything is sent.
    pub async fn submit(&self) -> Result<Submitted, SubmitError> {
        let in_flight = match InFlight::enter(&self.submitting) {
            Some(in_flight) => in_flight,
            None => {
                log::debug!("RSVP submission already in flight, ignoring submit");
                return Ok(Submitted::AlreadySubmitting);
            }
        };

        self.status.replace(None);

        let draft = self.draft();

        if let Err(e) = draft.validate() {
            log::debug!("Rejecting incomplete RSVP, {}", e);
            return Err(self.fail(SubmitError::MissingFields(e)));
        }

        if let Err(e) = self.backend.create_comment(&draft.to_new_comment()).await {
            log::warn!("Failed to send RSVP, {}", e);
            return Err(self.fail(SubmitError::Failed(e)));
        }

        log::info!("RSVP of {} sent", draft.name);

        self.draft.replace(RsvpDraft::default());
        self.status.replace(Some(FormStatus::Sent(SENT_MESSAGE.to_string())));

        drop(in_flight);

        // The guestbook keeps its own error for the page to show
        if self.guestbook.load().await.is_err() {
            log::debug!("Guestbook refresh after RSVP failed");
        }

        Ok(Submitted::Sent)
    }

    fn fail(&self, e: SubmitError) -> SubmitError {
        self.status.replace(Some(FormStatus::Error(e.to_string())));
        e
    }
}
