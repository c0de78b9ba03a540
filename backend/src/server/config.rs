//! Runtime settings and the server configuration derived from them.
//!
//! [`AppSettings`] is loaded by `ortho_config` from `JOBBOARD_*` environment
//! variables, configuration files and CLI flags. The two session toggles are
//! read straight from the environment by [`cookie_secure_from_env`] and
//! [`allow_ephemeral_from_env`] so their defaults hold whatever the loader
//! does with absent booleans. [`ServerConfig`] is the validated,
//! ready-to-serve form handed to [`super::create_server`].

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;
use tracing::warn;
use url::Url;
use zeroize::{Zeroize, Zeroizing};

#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetrics;

use crate::domain::{AccessPolicy, JobEditPolicy, SignupForm, UnknownJobEditPolicy};

use super::state_builders::DrivenAdapters;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";
const DEFAULT_MAIL_SENDER: &str = "no-reply@jobboard.local";
const SESSION_KEY_MIN_LEN: usize = 64;
const COOKIE_SECURE_ENV: &str = "JOBBOARD_COOKIE_SECURE";
const ALLOW_EPHEMERAL_ENV: &str = "JOBBOARD_ALLOW_EPHEMERAL_SESSION";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";

/// Settings for the job board server.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "JOBBOARD")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one, state lives in memory.
    pub database_url: Option<String>,
    /// Elasticsearch base URL. Without one, an in-memory index is used.
    pub search_url: Option<String>,
    /// Mail relay endpoint. Without one, notifications are only logged.
    pub mail_relay_url: Option<String>,
    /// `From` address for outgoing mail.
    pub mail_sender: Option<String>,
    /// File holding at least 64 bytes of session key material.
    pub session_key_file: Option<PathBuf>,
    /// `owner_or_admin` (default) or `role_only`.
    pub job_edit_policy: Option<String>,
    /// Username of the administrator created at startup.
    pub bootstrap_admin_username: Option<String>,
    /// Email of the administrator created at startup.
    pub bootstrap_admin_email: Option<String>,
    /// File holding the bootstrap administrator's password.
    pub bootstrap_admin_password_file: Option<PathBuf>,
}

/// Errors raised while turning [`AppSettings`] into a [`ServerConfig`].
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address `{value}`: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error("invalid {name} `{value}`: {source}")]
    Url {
        name: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    #[error(transparent)]
    JobEditPolicy(#[from] UnknownJobEditPolicy),
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidBool {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error(
        "bootstrap admin needs JOBBOARD_BOOTSTRAP_ADMIN_USERNAME, \
         JOBBOARD_BOOTSTRAP_ADMIN_EMAIL and JOBBOARD_BOOTSTRAP_ADMIN_PASSWORD_FILE together"
    )]
    IncompleteBootstrapAdmin,
    #[error("failed to read bootstrap admin password at {path}: {source}")]
    AdminPasswordRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl AppSettings {
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn session_key_file(&self) -> &Path {
        self.session_key_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SESSION_KEY_FILE))
    }

    pub fn mail_sender(&self) -> &str {
        self.mail_sender.as_deref().unwrap_or(DEFAULT_MAIL_SENDER)
    }

    pub fn access_policy(&self) -> Result<AccessPolicy, SettingsError> {
        let job_edit = match self.job_edit_policy.as_deref() {
            Some(raw) => raw.parse::<JobEditPolicy>()?,
            None => JobEditPolicy::default(),
        };
        Ok(AccessPolicy::new(job_edit))
    }

    pub fn search_url(&self) -> Result<Option<Url>, SettingsError> {
        parse_optional_url("search URL", self.search_url.as_deref())
    }

    pub fn mail_relay_url(&self) -> Result<Option<Url>, SettingsError> {
        parse_optional_url("mail relay URL", self.mail_relay_url.as_deref())
    }

    /// The administrator to provision at startup, if one is configured.
    ///
    /// The password file's trailing newline is ignored.
    pub fn bootstrap_admin(&self) -> Result<Option<SignupForm>, SettingsError> {
        let (username, email, path) = match (
            &self.bootstrap_admin_username,
            &self.bootstrap_admin_email,
            &self.bootstrap_admin_password_file,
        ) {
            (None, None, None) => return Ok(None),
            (Some(username), Some(email), Some(path)) => (username, email, path),
            _ => return Err(SettingsError::IncompleteBootstrapAdmin),
        };
        let raw = Zeroizing::new(std::fs::read_to_string(path).map_err(|source| {
            SettingsError::AdminPasswordRead {
                path: path.clone(),
                source,
            }
        })?);
        let password = Zeroizing::new(raw.trim_end_matches(['\r', '\n']).to_owned());
        Ok(Some(SignupForm {
            username: username.clone(),
            email: email.clone(),
            password2: password.clone(),
            password,
            role: None,
        }))
    }

    /// Load the session signing key.
    ///
    /// An unreadable key file is tolerated in debug builds or when
    /// `JOBBOARD_ALLOW_EPHEMERAL_SESSION` is set; sessions then do not survive
    /// a restart.
    pub fn session_key(&self) -> Result<Key, SettingsError> {
        let tolerate_missing = cfg!(debug_assertions) || allow_ephemeral_from_env()?;
        read_session_key(self.session_key_file(), tolerate_missing)
    }
}

/// Whether the session cookie is marked `Secure`. Defaults to `true`.
pub fn cookie_secure_from_env() -> Result<bool, SettingsError> {
    bool_from_env(COOKIE_SECURE_ENV, true)
}

/// Whether an unreadable session key file may be replaced by a random key.
/// Defaults to `false`.
pub fn allow_ephemeral_from_env() -> Result<bool, SettingsError> {
    bool_from_env(ALLOW_EPHEMERAL_ENV, false)
}

fn bool_from_env(name: &'static str, default: bool) -> Result<bool, SettingsError> {
    let Ok(value) = std::env::var(name) else {
        return Ok(default);
    };
    parse_bool(value.trim()).ok_or(SettingsError::InvalidBool {
        name,
        value,
        expected: BOOL_EXPECTED,
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn read_session_key(path: &Path, tolerate_missing: bool) -> Result<Key, SettingsError> {
    match std::fs::read(path) {
        Ok(mut bytes) => {
            let length = bytes.len();
            if length < SESSION_KEY_MIN_LEN {
                bytes.zeroize();
                return Err(SettingsError::KeyTooShort {
                    path: path.to_path_buf(),
                    length,
                    min_len: SESSION_KEY_MIN_LEN,
                });
            }
            let key = Key::derive_from(&bytes);
            bytes.zeroize();
            Ok(key)
        }
        Err(source) if tolerate_missing => {
            warn!(path = %path.display(), error = %source, "using temporary session key");
            Ok(Key::generate())
        }
        Err(source) => Err(SettingsError::KeyRead {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn parse_optional_url(name: &'static str, raw: Option<&str>) -> Result<Option<Url>, SettingsError> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            Url::parse(value).map_err(|source| SettingsError::Url {
                name,
                value: value.to_owned(),
                source,
            })
        })
        .transpose()
}

/// Everything [`super::create_server`] needs to serve requests.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) adapters: DrivenAdapters,
    pub(crate) policy: AccessPolicy,
    #[cfg(feature = "metrics")]
    pub(crate) prometheus: Option<PrometheusMetrics>,
}

impl ServerConfig {
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, bind_addr: SocketAddr, adapters: DrivenAdapters) -> Self {
        Self {
            key,
            cookie_secure,
            same_site: SameSite::Lax,
            bind_addr,
            adapters,
            policy: AccessPolicy::default(),
            #[cfg(feature = "metrics")]
            prometheus: None,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: AccessPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    #[cfg(feature = "metrics")]
    #[must_use]
    pub fn with_metrics(mut self, prometheus: Option<PrometheusMetrics>) -> Self {
        self.prometheus = prometheus;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 12] = [
        "JOBBOARD_BIND_ADDR",
        "JOBBOARD_DATABASE_URL",
        "JOBBOARD_SEARCH_URL",
        "JOBBOARD_MAIL_RELAY_URL",
        "JOBBOARD_MAIL_SENDER",
        "JOBBOARD_SESSION_KEY_FILE",
        "JOBBOARD_COOKIE_SECURE",
        "JOBBOARD_ALLOW_EPHEMERAL_SESSION",
        "JOBBOARD_JOB_EDIT_POLICY",
        "JOBBOARD_BOOTSTRAP_ADMIN_USERNAME",
        "JOBBOARD_BOOTSTRAP_ADMIN_EMAIL",
        "JOBBOARD_BOOTSTRAP_ADMIN_PASSWORD_FILE",
    ];

    fn load() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("jobboard")]).expect("settings should load")
    }

    fn cleared() -> Vec<(&'static str, Option<String>)> {
        VARS.iter().map(|name| (*name, None)).collect()
    }

    fn with(overrides: &[(&'static str, &str)]) -> Vec<(&'static str, Option<String>)> {
        let mut vars = cleared();
        for (name, value) in overrides {
            if let Some(slot) = vars.iter_mut().find(|(var, _)| var == name) {
                slot.1 = Some((*value).to_owned());
            }
        }
        vars
    }

    fn key_file(name: &str, len: usize) -> PathBuf {
        let path = std::env::temp_dir().join(format!("jobboard-{name}-{}", std::process::id()));
        std::fs::write(&path, vec![b'k'; len]).expect("write key file");
        path
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(cleared());
        let settings = load();

        assert_eq!(
            settings.bind_addr().expect("bind addr"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("addr")
        );
        assert!(cookie_secure_from_env().expect("cookie flag"));
        assert!(!allow_ephemeral_from_env().expect("ephemeral flag"));
        assert!(settings.database_url.is_none());
        assert_eq!(settings.mail_sender(), DEFAULT_MAIL_SENDER);
        assert_eq!(
            settings.access_policy().expect("policy"),
            AccessPolicy::new(JobEditPolicy::OwnerOrAdmin)
        );
        assert!(settings.search_url().expect("url").is_none());
        assert!(settings.bootstrap_admin().expect("bootstrap admin").is_none());
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env(with(&[
            ("JOBBOARD_BIND_ADDR", "127.0.0.1:9000"),
            ("JOBBOARD_SEARCH_URL", "http://search:9200"),
            ("JOBBOARD_MAIL_SENDER", "jobs@example.com"),
            ("JOBBOARD_COOKIE_SECURE", "false"),
            ("JOBBOARD_JOB_EDIT_POLICY", "role_only"),
        ]));
        let settings = load();

        assert_eq!(settings.bind_addr().expect("bind").port(), 9000);
        assert_eq!(
            settings.search_url().expect("url").map(|url| url.host_str().map(str::to_owned)),
            Some(Some("search".to_owned()))
        );
        assert_eq!(settings.mail_sender(), "jobs@example.com");
        assert!(!cookie_secure_from_env().expect("cookie flag"));
        assert_eq!(
            settings.access_policy().expect("policy"),
            AccessPolicy::new(JobEditPolicy::RoleOnly)
        );
    }

    #[rstest]
    #[case("JOBBOARD_BIND_ADDR", "not-an-address")]
    #[case("JOBBOARD_JOB_EDIT_POLICY", "anyone")]
    #[case("JOBBOARD_MAIL_RELAY_URL", "::nope")]
    fn invalid_values_are_reported(#[case] name: &'static str, #[case] value: &str) {
        let _guard = lock_env(with(&[(name, value)]));
        let settings = load();

        let failed = settings.bind_addr().is_err()
            || settings.access_policy().is_err()
            || settings.mail_relay_url().is_err();
        assert!(failed, "{name}={value} should be rejected");
    }

    #[rstest]
    fn session_key_is_derived_from_file() {
        let path = key_file("key-ok", SESSION_KEY_MIN_LEN);
        let _guard = lock_env(with(&[(
            "JOBBOARD_SESSION_KEY_FILE",
            path.to_str().expect("utf-8 path"),
        )]));
        let first = load().session_key().expect("key");
        let second = load().session_key().expect("key");
        assert_eq!(first.master(), second.master());
        std::fs::remove_file(path).expect("cleanup");
    }

    #[rstest]
    fn short_session_key_is_rejected() {
        let path = key_file("key-short", 16);
        let _guard = lock_env(with(&[(
            "JOBBOARD_SESSION_KEY_FILE",
            path.to_str().expect("utf-8 path"),
        )]));
        assert!(matches!(
            load().session_key(),
            Err(SettingsError::KeyTooShort { length: 16, .. })
        ));
        std::fs::remove_file(path).expect("cleanup");
    }

    #[rstest]
    fn missing_key_file_falls_back_when_ephemeral_allowed() {
        let _guard = lock_env(with(&[
            ("JOBBOARD_SESSION_KEY_FILE", "/nonexistent/jobboard/session_key"),
            ("JOBBOARD_ALLOW_EPHEMERAL_SESSION", "true"),
        ]));
        assert!(allow_ephemeral_from_env().expect("ephemeral flag"));
        assert!(load().session_key().is_ok());
    }

    #[rstest]
    fn missing_key_file_is_fatal_when_not_tolerated() {
        let result = read_session_key(Path::new("/nonexistent/jobboard/session_key"), false);
        assert!(matches!(result, Err(SettingsError::KeyRead { .. })));
    }

    #[rstest]
    #[case("1", true)]
    #[case("Yes", true)]
    #[case(" n ", false)]
    #[case("FALSE", false)]
    fn session_toggles_accept_common_spellings(#[case] raw: &str, #[case] expected: bool) {
        let _guard = lock_env(with(&[("JOBBOARD_COOKIE_SECURE", raw)]));
        assert_eq!(cookie_secure_from_env().expect("cookie flag"), expected);
    }

    #[rstest]
    fn unrecognised_toggle_is_an_error() {
        let _guard = lock_env(with(&[("JOBBOARD_ALLOW_EPHEMERAL_SESSION", "sometimes")]));
        assert!(matches!(
            allow_ephemeral_from_env(),
            Err(SettingsError::InvalidBool { name: "JOBBOARD_ALLOW_EPHEMERAL_SESSION", .. })
        ));
    }

    #[rstest]
    fn bootstrap_admin_reads_the_password_file() {
        let path = std::env::temp_dir().join(format!("jobboard-admin-{}", std::process::id()));
        std::fs::write(&path, "Adm1n-Passphrase\n").expect("write password file");
        let _guard = lock_env(with(&[
            ("JOBBOARD_BOOTSTRAP_ADMIN_USERNAME", "root"),
            ("JOBBOARD_BOOTSTRAP_ADMIN_EMAIL", "root@example.com"),
            ("JOBBOARD_BOOTSTRAP_ADMIN_PASSWORD_FILE", path.to_str().expect("utf-8 path")),
        ]));

        let form = load().bootstrap_admin().expect("settings").expect("configured");
        assert_eq!(form.username, "root");
        assert_eq!(form.email, "root@example.com");
        assert_eq!(form.password.as_str(), "Adm1n-Passphrase");
        assert_eq!(form.password, form.password2);
        std::fs::remove_file(path).expect("cleanup");
    }

    #[rstest]
    fn partial_bootstrap_admin_is_rejected() {
        let _guard = lock_env(with(&[("JOBBOARD_BOOTSTRAP_ADMIN_USERNAME", "root")]));
        assert!(matches!(
            load().bootstrap_admin(),
            Err(SettingsError::IncompleteBootstrapAdmin)
        ));
    }
}
