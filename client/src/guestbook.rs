//! Guestbook loader
//!
//! Keeps the list of comments shown on the page. Every [`Guestbook::load`] is a fresh fetch that
//! replaces the whole list, there is no caching and no retry.
use std::cell::RefCell;
use std::rc::Rc;

use crate::api::{ApiError, Backend};
use crate::Comment;

/// The guestbook could not be fetched
///
/// Displays as the message shown to the guest, the cause is kept as source.
#[derive(Debug, thiserror::Error)]
#[error("Failed to load messages")]
pub struct LoadError(#[from] ApiError);

/// What the guestbook section of the page currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum GuestbookView {
    Loading,
    Failed(String),
    Empty,
    Entries(Vec<Comment>),
}

#[derive(Debug)]
struct State {
    comments: Vec<Comment>,
    loading: bool,
    error: Option<String>,
    /// Incremented by every load, only the newest load may write back
    generation: u64,
}

pub struct Guestbook<B> {
    backend: Rc<B>,
    state: RefCell<State>,
}

impl<B> Guestbook<B>
where
    B: Backend,
{
    /// Creates an empty guestbook
    ///
    /// A new guestbook shows as loading until its first load finished.
    pub fn new(backend: Rc<B>) -> Self {
        Self {
            backend,
            state: RefCell::new(State {
                comments: Vec::new(),
                loading: true,
                error: None,
                generation: 0,
            }),
        }
    }

    /// Fetches the comments and replaces the current list with them
    ///
    /// The list is emptied as soon as the load starts. When a newer load was started while this
    /// one was waiting for the backend, the response is still returned but no longer written to
    /// the guestbook.
    pub async fn load(&self) -> Result<Vec<Comment>, LoadError> {
        let generation = {
            let mut state = self.state.borrow_mut();
            state.generation += 1;
            state.loading = true;
            state.error = None;
            state.comments.clear();
            state.generation
        };

        let result = self.backend.list_comments().await;

        let mut state = self.state.borrow_mut();

        if state.generation != generation {
            log::debug!("Discarding guestbook response of superseded load #{}", generation);
            return result.map_err(LoadError::from);
        }

        state.loading = false;

        match result {
            Ok(comments) => {
                log::info!("Loaded {} guestbook entries", comments.len());
                state.comments = comments.clone();
                Ok(comments)
            }
            Err(e) => {
                log::warn!("Failed to load guestbook, {}", e);
                let e = LoadError::from(e);
                state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn view(&self) -> GuestbookView {
        let state = self.state.borrow();

        if state.loading {
            GuestbookView::Loading
        } else if let Some(error) = &state.error {
            GuestbookView::Failed(error.clone())
        } else if state.comments.is_empty() {
            GuestbookView::Empty
        } else {
            GuestbookView::Entries(state.comments.clone())
        }
    }

    pub fn comments(&self) -> Vec<Comment> {
        self.state.borrow().comments.clone()
    }

    pub fn error(&self) -> Option<String> {
        self.state.borrow().error.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().loading
    }
}
