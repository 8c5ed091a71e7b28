//! Client side of the wedding site
//!
//! Talks to the guestbook backend and holds the state of the two things a guest can do on the
//! page: read the guestbook ([`Guestbook`]) and send an RSVP ([`RsvpForm`]).
//!
//! Everything in here is meant to be driven from a single thread. Components share the backend
//! via [`Rc`] and keep their state in cells, so none of the futures are `Send`.
use reqwest::redirect::Policy;
use reqwest::{Client, Url};
use std::rc::Rc;

pub mod api;
pub mod guestbook;
pub mod rsvp;

pub use api::comments::{Comment, CommentId, NewComment};
pub use api::{ApiError, Backend};
pub use guestbook::{Guestbook, GuestbookView, LoadError};
pub use rsvp::{FormStatus, RsvpDraft, RsvpForm, SubmitError, Submitted};

/// Address of the backend used during local development
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// The session configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the guestbook backend
    pub backend_url: Url,
}

pub fn default_config() -> Config {
    Config {
        backend_url: Url::parse(DEFAULT_BACKEND_URL).expect("invalid default backend url"),
    }
}

/// A session with the guestbook backend
///
/// Is used to call the API endpoints on the backend.
#[derive(Debug)]
pub struct BackendSession {
    /// Reusable reqwest connection pool
    pub http_client: Client,
    /// Configuration for a backend session
    pub config: Rc<Config>,
}

impl BackendSession {
    /// Creates a new session
    pub fn new(config: Rc<Config>) -> Result<Self, ApiError> {
        let http_client = reqwest::Client::builder()
            .redirect(Policy::none())
            .build()?;

        Ok(BackendSession {
            http_client,
            config,
        })
    }
}
