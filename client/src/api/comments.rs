use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{parse_json_response, Backend, Result};
use crate::BackendSession;

const COMMENTS_PATH: &str = "/api/comments";

/// Identifier of a guestbook entry
///
/// Opaque to the client, only used as a stable key. Backends hand out either numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommentId {
    Number(i64),
    Text(String),
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommentId::Number(id) => write!(f, "{}", id),
            CommentId::Text(id) => f.write_str(id),
        }
    }
}

/// A guestbook entry as returned by *GET '/api/comments'*
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub name: String,
    /// May contain line breaks
    pub message: String,
    /// `None` when the guest did not say
    #[serde(default)]
    pub attending: Option<bool>,
    /// Stored as entered, older rows may hold zero or negative counts
    #[serde(default)]
    pub guests: Option<i64>,
}

impl Comment {
    /// Short attendance label shown next to the name
    ///
    /// Nothing when the guest left attendance open. The guest count is only part of the label
    /// for guests that are coming.
    pub fn badge(&self) -> Option<String> {
        match self.attending? {
            true => match self.guests {
                Some(guests) if guests > 0 => Some(format!("Attending • {}", guests)),
                _ => Some("Attending".to_string()),
            },
            false => Some("Not attending".to_string()),
        }
    }
}

/// The JSON Body expected when making a *POST* request on `/api/comments`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewComment {
    pub name: String,
    pub message: String,
    pub attending: Option<bool>,
    pub guests: u32,
    pub phone: String,
}

impl BackendSession {
    /// Calls *GET '/api/comments'*
    pub async fn get_comments(&self) -> Result<Vec<Comment>> {
        let response = self.get(COMMENTS_PATH).await?;

        parse_json_response(response).await
    }

    /// Calls *POST '/api/comments'*
    ///
    /// The backend answers with JSON that is not needed by the page, it is returned as is.
    pub async fn post_comment(&self, comment: &NewComment) -> Result<serde_json::Value> {
        let response = self.post_json(COMMENTS_PATH, comment).await?;

        parse_json_response(response).await
    }
}

#[async_trait(?Send)]
impl Backend for BackendSession {
    async fn list_comments(&self) -> Result<Vec<Comment>> {
        self.get_comments().await
    }

    async fn create_comment(&self, comment: &NewComment) -> Result<serde_json::Value> {
        self.post_comment(comment).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn comment(attending: Option<bool>, guests: Option<i64>) -> Comment {
        Comment {
            id: CommentId::Number(1),
            name: "Jo".into(),
            message: "See you there".into(),
            attending,
            guests,
        }
    }

    #[test]
    fn parse_comment_list() {
        let comments: Vec<Comment> = serde_json::from_value(json!([
            {
                "id": 7,
                "name": "Sam",
                "message": "Congrats!\nCan't wait",
                "attending": true,
                "guests": 2
            },
            {
                "id": "64f1c0de",
                "name": "Kim",
                "message": "Sorry we miss it",
                "attending": null
            }
        ]))
        .unwrap();

        assert_eq!(comments[0].id, CommentId::Number(7));
        assert_eq!(comments[0].message, "Congrats!\nCan't wait");
        assert_eq!(comments[0].attending, Some(true));
        assert_eq!(comments[0].guests, Some(2));

        assert_eq!(comments[1].id, CommentId::Text("64f1c0de".into()));
        assert_eq!(comments[1].attending, None);
        assert_eq!(comments[1].guests, None);
    }

    #[test]
    fn negative_guest_count_does_not_break_the_list() {
        let comments: Vec<Comment> = serde_json::from_value(json!([
            { "id": 1, "name": "Sam", "message": "Congrats!", "attending": true, "guests": 2 },
            { "id": 2, "name": "Kim", "message": "Hooray", "attending": true, "guests": -1 }
        ]))
        .unwrap();

        assert_eq!(comments.len(), 2);
        assert_eq!(comments[1].guests, Some(-1));
        assert_eq!(comments[1].badge().unwrap(), "Attending");
    }

    #[test]
    fn new_comment_body() {
        let body = NewComment {
            name: "Sam".into(),
            message: "Congrats!".into(),
            attending: None,
            guests: 1,
            phone: String::new(),
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "name": "Sam",
                "message": "Congrats!",
                "attending": null,
                "guests": 1,
                "phone": ""
            })
        );
    }

    #[test]
    fn badge() {
        assert_eq!(comment(None, Some(3)).badge(), None);
        assert_eq!(comment(Some(true), Some(2)).badge().unwrap(), "Attending • 2");
        assert_eq!(comment(Some(true), Some(0)).badge().unwrap(), "Attending");
        assert_eq!(comment(Some(true), None).badge().unwrap(), "Attending");
        assert_eq!(comment(Some(true), Some(-1)).badge().unwrap(), "Attending");
        assert_eq!(comment(Some(false), Some(2)).badge().unwrap(), "Not attending");
    }

    #[test]
    fn comment_id_display() {
        assert_eq!(CommentId::Number(42).to_string(), "42");
        assert_eq!(CommentId::Text("abc".into()).to_string(), "abc");
    }
}
