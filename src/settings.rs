//! Handles the application settings via a config file and environment variables.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use url::Url;

/// Contains the application settings.
///
/// The application settings are read from an optional TOML config file. Settings specified in
/// the config file can be overwritten by environment variables. To do so, set an environment
/// variable with the prefix `WEDDING_` followed by the field names you want to set. Fields are
/// separated by an underscore `_`.
/// ```text
/// WEDDING_<field>_<field-of-field>...
/// ```
/// # Example
///
/// set the `backend.url` field:
/// ```text
/// WEDDING_BACKEND_URL=https://rsvp.example.org
/// ```
/// # Note
/// Every field has a default, running without config file and environment talks to a backend on
/// `http://localhost:8000` and shows the default invitation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub backend: Backend,
    pub event: Event,
}

impl Settings {
    /// Creates a new Settings instance from the provided TOML file, a missing file is not an error.
    /// Specific fields can be set or overwritten with environment variables (See struct level docs for more details).
    pub fn load(file_name: &Path) -> Result<Self, ConfigError> {
        let mut cfg = Config::new();

        cfg.merge(File::from(file_name).required(false))?;

        let env = Environment::with_prefix("WEDDING").separator("_");

        cfg.merge(env)?;

        cfg.try_into()
    }
}

/// Where the guestbook backend lives
#[derive(Debug, Deserialize)]
pub struct Backend {
    #[serde(default = "default_backend_url")]
    pub url: Url,
}

impl Default for Backend {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
        }
    }
}

fn default_backend_url() -> Url {
    Url::parse(wedding_site_client::DEFAULT_BACKEND_URL).expect("invalid default backend url")
}

/// The static part of the invitation
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Event {
    pub tagline: String,
    pub couple: String,
    pub date: String,
    pub time: String,
    pub venue: String,
    pub details: Vec<Detail>,
}

impl Default for Event {
    fn default() -> Self {
        Self {
            tagline: "We are getting married".into(),
            couple: "Alex & Taylor".into(),
            date: "Saturday, June 21, 2025".into(),
            time: "4:00 PM".into(),
            venue: "The Botanical Garden, 123 Blossom Ave".into(),
            details: vec![
                Detail::new("Ceremony", "Starts at 4:00 PM in the Rose Pavilion."),
                Detail::new("Reception", "Dinner and dancing to follow at 6:00 PM."),
                Detail::new("Dress Code", "Garden formal. Pastel colors encouraged."),
            ],
        }
    }
}

/// One of the cards below the hero
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Detail {
    pub title: String,
    pub text: String,
}

impl Detail {
    fn new(title: &str, text: &str) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn write_config(name: &str, content: &str) -> PathBuf {
        let file_name = format!("wedding-site-{}-{}.toml", name, std::process::id());
        let path = env::temp_dir().join(file_name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    #[serial]
    fn defaults_without_file() {
        env::remove_var("WEDDING_BACKEND_URL");

        let settings = Settings::load(Path::new("does-not-exist.toml")).unwrap();

        assert_eq!(settings.backend.url.as_str(), "http://localhost:8000/");
        assert_eq!(settings.event.couple, "Alex & Taylor");
        assert_eq!(settings.event.details.len(), 3);
        assert_eq!(settings.event.details[2].title, "Dress Code");
    }

    #[test]
    #[serial]
    fn file_overrides_defaults() {
        env::remove_var("WEDDING_BACKEND_URL");
        let path = write_config(
            "file",
            r#"
            [backend]
            url = "https://rsvp.example.org/wedding"

            [event]
            couple = "Robin & Charlie"

            [[event.details]]
            title = "Brunch"
            text = "Sunday at 11:00 AM."
            "#,
        );

        let settings = Settings::load(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(
            settings.backend.url.as_str(),
            "https://rsvp.example.org/wedding"
        );
        assert_eq!(settings.event.couple, "Robin & Charlie");
        assert_eq!(settings.event.date, "Saturday, June 21, 2025");
        assert_eq!(
            settings.event.details,
            vec![Detail::new("Brunch", "Sunday at 11:00 AM.")]
        );
    }

    #[test]
    #[serial]
    fn environment_overrides_file() {
        let path = write_config(
            "env",
            r#"
            [backend]
            url = "https://from-file.example.org"
            "#,
        );
        env::set_var("WEDDING_BACKEND_URL", "http://10.0.0.5:8000");

        let settings = Settings::load(&path);
        env::remove_var("WEDDING_BACKEND_URL");
        fs::remove_file(&path).unwrap();

        assert_eq!(settings.unwrap().backend.url.as_str(), "http://10.0.0.5:8000/");
    }

    #[test]
    #[serial]
    fn invalid_url_is_rejected() {
        env::set_var("WEDDING_BACKEND_URL", "not a url");

        let settings = Settings::load(Path::new("does-not-exist.toml"));
        env::remove_var("WEDDING_BACKEND_URL");

        assert!(settings.is_err());
    }
}
