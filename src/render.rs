//! Text rendering of the invitation page
use wedding_site_client::{Comment, FormStatus, GuestbookView};

use crate::settings::Event;

const RULE_WIDTH: usize = 60;

pub const NO_MESSAGES: &str = "No messages yet. Be the first to leave a note!";
pub const LOADING: &str = "Loading messages...";

fn heading(title: &str) -> String {
    format!("{}\n{}\n", title, "-".repeat(title.chars().count()))
}

/// Centered couple, date and venue
pub fn hero(event: &Event) -> String {
    let rule = "=".repeat(RULE_WIDTH);

    let when = format!("{} • {}", event.date, event.time);
    let lines = [
        event.tagline.as_str(),
        "",
        event.couple.as_str(),
        "",
        when.as_str(),
        event.venue.as_str(),
    ];

    let mut out = format!("{}\n", rule);
    for line in lines.iter() {
        out.push_str(&format!("{:^width$}\n", line, width = RULE_WIDTH));
    }
    out.push_str(&rule);
    out.push('\n');

    out
}

pub fn details(event: &Event) -> String {
    event
        .details
        .iter()
        .map(|detail| format!("{}{}\n\n", heading(&detail.title), detail.text))
        .collect()
}

/// Confirmation or error line shown above the form
pub fn form_status(status: Option<&FormStatus>) -> String {
    match status {
        Some(FormStatus::Sent(message)) => format!("✓ {}\n", message),
        Some(FormStatus::Error(message)) => format!("✗ {}\n", message),
        None => String::new(),
    }
}

fn entry(comment: &Comment) -> String {
    let mut out = match comment.badge() {
        Some(badge) => format!("{}  [{}]\n", comment.name, badge),
        None => format!("{}\n", comment.name),
    };

    for line in comment.message.lines() {
        out.push_str(&format!("    {}\n", line));
    }

    out
}

pub fn guestbook(view: &GuestbookView) -> String {
    let mut out = heading("Guestbook");

    match view {
        GuestbookView::Loading => out.push_str(&format!("{}\n", LOADING)),
        GuestbookView::Failed(error) => {
            out.push_str(&format!("✗ {}\n{}\n", error, NO_MESSAGES));
        }
        GuestbookView::Empty => out.push_str(&format!("{}\n", NO_MESSAGES)),
        GuestbookView::Entries(comments) => {
            let entries: Vec<String> = comments.iter().map(entry).collect();
            out.push_str(&entries.join("\n"));
        }
    }

    out
}

/// The whole page, top to bottom
pub fn page(event: &Event, status: Option<&FormStatus>, view: &GuestbookView) -> String {
    let mut out = hero(event);

    out.push('\n');
    out.push_str(&details(event));
    out.push_str(&form_status(status));
    if status.is_some() {
        out.push('\n');
    }
    out.push_str(&guestbook(view));
    out.push_str("\nMade with love\n");

    out
}
