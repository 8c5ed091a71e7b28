//! HTTP API of the guestbook backend
use async_trait::async_trait;
use reqwest::{Error, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

use crate::BackendSession;

pub mod comments;

use comments::{Comment, NewComment};

pub type Result<T> = std::result::Result<T, ApiError>;

#[derive(Debug)]
pub struct HttpError {
    status: StatusCode,
    /// Raw body of the failed response
    reason: String,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(error {}: {})", self.status, self.reason)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Url error: {0}")]
    InvalidUrl(String),
    #[error("Reqwest error: {0}")]
    ReqwestError(String),
    #[error("Http error: {0}")]
    NonSuccess(HttpError),
}

impl ApiError {
    /// Text the backend sent along with a non-success status, if it sent any
    pub fn server_reason(&self) -> Option<&str> {
        match self {
            Self::NonSuccess(e) if !e.reason.is_empty() => Some(&e.reason),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: Error) -> Self {
        Self::ReqwestError(e.to_string())
    }
}

pub(crate) async fn parse_json_response<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    if !response.status().is_success() {
        return Err(ApiError::NonSuccess(HttpError {
            status: response.status(),
            reason: response.text().await?,
        }));
    }
    Ok(response.json::<T>().await?)
}

/// The two calls the page makes against the backend
///
/// Implemented by [`BackendSession`]. The guestbook and the RSVP form only know about this trait.
#[async_trait(?Send)]
pub trait Backend {
    /// Fetches all comments
    async fn list_comments(&self) -> Result<Vec<Comment>>;

    /// Stores a new comment, returns whatever JSON the backend answered with
    async fn create_comment(&self, comment: &NewComment) -> Result<serde_json::Value>;
}

impl BackendSession {
    /// Resolves `path` relative to the configured backend URL
    ///
    /// Keeps any path prefix of the backend URL, `http://host/wedding` + `api/comments` results
    /// in `http://host/wedding/api/comments`.
    fn url(&self, path: &str) -> Result<Url> {
        let mut base = self.config.backend_url.clone();

        if !base.path().ends_with('/') {
            let dir = format!("{}/", base.path());
            base.set_path(&dir);
        }

        base.join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    async fn get(&self, path: &str) -> Result<Response> {
        let url = self.url(path)?;
        log::debug!("GET {}", url);

        let response = self.http_client.get(url).send().await?;

        Ok(response)
    }

    async fn post_json<T>(&self, path: &str, data: &T) -> Result<Response>
    where
        T: Serialize,
    {
        let url = self.url(path)?;
        log::debug!("POST {}", url);

        let response = self.http_client.post(url).json(data).send().await?;

        Ok(response)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::default_config;
    use std::rc::Rc;

    fn session_for(url: &str) -> BackendSession {
        let config = crate::Config {
            backend_url: Url::parse(url).unwrap(),
        };
        BackendSession::new(Rc::new(config)).unwrap()
    }

    #[test]
    fn url_joins_onto_host() {
        let session = BackendSession::new(Rc::new(default_config())).unwrap();

        assert_eq!(
            session.url("/api/comments").unwrap().as_str(),
            "http://localhost:8000/api/comments"
        );
    }

    #[test]
    fn url_keeps_path_prefix() {
        let session = session_for("https://example.org/wedding");

        assert_eq!(
            session.url("/api/comments").unwrap().as_str(),
            "https://example.org/wedding/api/comments"
        );

        let session = session_for("https://example.org/wedding/");

        assert_eq!(
            session.url("api/comments").unwrap().as_str(),
            "https://example.org/wedding/api/comments"
        );
    }

    #[test]
    fn server_reason_only_for_non_empty_bodies() {
        let rejected = ApiError::NonSuccess(HttpError {
            status: StatusCode::CONFLICT,
            reason: "duplicate entry".into(),
        });
        assert_eq!(rejected.server_reason(), Some("duplicate entry"));

        let empty = ApiError::NonSuccess(HttpError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            reason: String::new(),
        });
        assert_eq!(empty.server_reason(), None);

        let offline = ApiError::ReqwestError("connection refused".into());
        assert_eq!(offline.server_reason(), None);
    }
}
