use anyhow::{Context, Result};
use std::rc::Rc;
use wedding_site_client::{BackendSession, Config, Guestbook, RsvpForm};

use crate::cli::Command;
use crate::settings::Settings;

mod cli;
mod logging;
mod render;
mod settings;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if !try_or_exit(run()).await {
        std::process::exit(1);
    }
}

/// Wrapper of the main function. Correctly outputs the error to the logging utility or stderr.
async fn try_or_exit<T, F>(f: F) -> T
where
    F: std::future::Future<Output = Result<T>>,
{
    match f.await {
        Ok(ok) => ok,
        Err(err) => {
            if log::log_enabled!(log::Level::Error) {
                log::error!("Crashed with error: {:?}", err);
            } else {
                eprintln!("Crashed with error: {:?}", err);
            }

            std::process::exit(-1);
        }
    }
}

/// Runs the requested command, returns false when an RSVP was not accepted
async fn run() -> Result<bool> {
    let args = cli::parse_args();

    logging::init(args.verbose, args.logoutput.as_deref())?;

    let settings = Settings::load(&args.config)
        .with_context(|| format!("Failed to load settings from {}", args.config.display()))?;

    log::debug!("Using guestbook backend at {}", settings.backend.url);

    let config = Config {
        backend_url: settings.backend.url.clone(),
    };
    let session = Rc::new(BackendSession::new(Rc::new(config))?);
    let guestbook = Rc::new(Guestbook::new(session.clone()));
    let form = RsvpForm::new(session, guestbook.clone());

    match args.command.unwrap_or(Command::Show) {
        Command::Show => {
            // a failed load is part of what the page shows
            let _ = guestbook.load().await;

            print!("{}", render::page(&settings.event, None, &guestbook.view()));

            Ok(true)
        }
        Command::Guestbook => {
            let _ = guestbook.load().await;

            print!("{}", render::guestbook(&guestbook.view()));

            Ok(true)
        }
        Command::Rsvp(rsvp) => {
            form.set_name(rsvp.name);
            form.set_message(rsvp.message);
            form.set_attending(rsvp.attending);
            form.set_guests(rsvp.guests);
            form.set_phone(rsvp.phone);

            let sent = form.submit().await.is_ok();

            // the guestbook was already refreshed by a successful submission
            if !sent {
                let _ = guestbook.load().await;
            }

            print!("{}", render::form_status(form.status().as_ref()));
            println!();
            print!("{}", render::guestbook(&guestbook.view()));

            Ok(sent)
        }
    }
}
