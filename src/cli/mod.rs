use anyhow::{bail, Result};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(name = "wedding-site")]
pub struct Args {
    #[structopt(
        short,
        parse(from_occurrences),
        help = "-v => Info, -vv => Debug, -vvv => Trace"
    )]
    pub verbose: u8,

    #[structopt(
        short,
        long,
        default_value = "config.toml",
        help = "Specify path to configuration file"
    )]
    pub config: PathBuf,

    #[structopt(
        short,
        long,
        parse(from_os_str),
        help = "logoutput or \"-\" for stdout"
    )]
    pub logoutput: Option<PathBuf>,

    #[structopt(subcommand)]
    pub command: Option<Command>,
}

#[derive(StructOpt, Debug, PartialEq)]
pub enum Command {
    /// Shows the whole invitation including the guestbook (default)
    Show,
    /// Shows only the guestbook
    Guestbook,
    /// Sends an RSVP and shows the refreshed guestbook
    Rsvp(Rsvp),
}

#[derive(StructOpt, Debug, PartialEq)]
pub struct Rsvp {
    /// Your name
    #[structopt(long, default_value = "")]
    pub name: String,

    /// Your wishes for the couple
    #[structopt(long, default_value = "")]
    pub message: String,

    /// Whether you are coming, "yes" or "no"
    #[structopt(long, parse(try_from_str = parse_attending))]
    pub attending: Option<bool>,

    /// Number of guests, at most 20
    #[structopt(long, default_value = "1")]
    pub guests: u32,

    /// Phone number for coordination
    #[structopt(long, default_value = "")]
    pub phone: String,
}

fn parse_attending(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" => Ok(true),
        "no" | "n" | "false" => Ok(false),
        _ => bail!("expected \"yes\" or \"no\", got \"{}\"", value),
    }
}

/// Parses the CLI-Arguments into [`Args`]
pub fn parse_args() -> Args {
    Args::from_args()
}
