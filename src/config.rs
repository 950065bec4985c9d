// Client configuration: where the API lives, which token to send and how
// long to wait for the service to catch up after a write.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

/// Production endpoint of the disk REST API.
pub const DEFAULT_BASE_URL: &str = "https://cloud-api.yandex.net/v1/disk";

/// Token file looked up relative to the working directory.
pub const DEFAULT_TOKEN_FILE: &str = "token_ya.txt";

/// Page size requested when listing the disk root.
pub const DEFAULT_LIST_LIMIT: u32 = 1000;

/// Shortest pause between two listing requests while polling.
pub const MIN_POLL_DELAY: Duration = Duration::from_millis(10);

/// Opaque OAuth token. The value never shows up in `Debug` output.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(String);

impl Token {
    /// Trim surrounding whitespace and reject what is left if it is empty.
    pub fn new(raw: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::BlankToken);
        }
        Ok(Token(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(***)")
    }
}

/// Read a token from `path`, consuming the whole file and trimming it.
///
/// A missing file, a blank file and any other read failure map to distinct
/// [`ConfigError`] variants so callers can report them precisely.
pub fn read_token_from_file(path: impl AsRef<Path>) -> Result<Token, ConfigError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => ConfigError::MissingTokenFile {
            path: path.to_path_buf(),
        },
        _ => ConfigError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;
    Token::new(raw).map_err(|_| ConfigError::EmptyToken {
        path: path.to_path_buf(),
    })
}

/// Everything a [`crate::DiskApiClient`] needs. Built explicitly so tests can
/// point separate clients at separate servers and credentials.
#[derive(Clone, Debug)]
pub struct DiskConfig {
    pub base_url: String,
    pub token: Token,
    pub list_limit: u32,
}

impl DiskConfig {
    pub fn new(base_url: impl Into<String>, token: Token) -> Self {
        DiskConfig {
            base_url: normalize_base_url(base_url.into()),
            token,
            list_limit: DEFAULT_LIST_LIMIT,
        }
    }

    /// Build a configuration from `DISK_API_URL` and the token file named by
    /// `DISK_TOKEN_FILE`, falling back to the defaults for either.
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = read_token_from_file(Self::token_file_from_env())?;
        Ok(Self::new(Self::base_url_from_env(), token))
    }

    /// `DISK_API_URL`, or the production endpoint.
    pub fn base_url_from_env() -> String {
        std::env::var("DISK_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
    }

    /// Path of the token file, honouring `DISK_TOKEN_FILE`.
    pub fn token_file_from_env() -> PathBuf {
        std::env::var_os("DISK_TOKEN_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_TOKEN_FILE))
    }

    pub fn with_list_limit(mut self, list_limit: u32) -> Self {
        self.list_limit = list_limit;
        self
    }
}

/// Bounded exponential backoff used while waiting for a write to become
/// visible in the listing.
#[derive(Clone, Debug)]
pub struct PollConfig {
    /// Total time budget, measured from the first listing request
    pub timeout: Duration,
    /// Pause after the first miss
    pub initial_delay: Duration,
    /// Upper bound for a single pause
    pub max_delay: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl PollConfig {
    /// Pause after the first miss, floored at [`MIN_POLL_DELAY`].
    pub fn first_delay(&self) -> Duration {
        self.initial_delay.max(MIN_POLL_DELAY)
    }

    /// Doubles `current` up to `max_delay`, never dropping below
    /// [`MIN_POLL_DELAY`].
    pub fn next_delay(&self, current: Duration) -> Duration {
        current
            .saturating_mul(2)
            .min(self.max_delay)
            .max(MIN_POLL_DELAY)
    }
}

/// Strip trailing slashes so endpoint paths can be appended with `/`.
pub(crate) fn normalize_base_url(base_url: String) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.len() == base_url.len() {
        base_url
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_token_trims_whitespace() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "  y0_secret-token \n").unwrap();

        let token = read_token_from_file(file.path()).unwrap();
        assert_eq!(token.as_str(), "y0_secret-token");
    }

    #[test]
    fn test_read_token_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("token_ya.txt");

        match read_token_from_file(&path) {
            Err(ConfigError::MissingTokenFile { path: reported }) => assert_eq!(reported, path),
            other => panic!("expected MissingTokenFile, got {:?}", other),
        }
    }

    #[test]
    fn test_read_token_blank_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, " \n\t\n").unwrap();

        assert!(matches!(
            read_token_from_file(file.path()),
            Err(ConfigError::EmptyToken { .. })
        ));
    }

    #[test]
    fn test_read_token_from_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();

        assert!(matches!(
            read_token_from_file(dir.path()),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_token_debug_is_redacted() {
        let token = Token::new("top-secret").unwrap();
        assert_eq!(format!("{:?}", token), "Token(***)");
    }

    #[test]
    fn test_blank_token_rejected() {
        assert!(matches!(Token::new("   "), Err(ConfigError::BlankToken)));
    }

    #[test]
    fn test_config_strips_trailing_slash() {
        let token = Token::new("t").unwrap();
        let config = DiskConfig::new("http://127.0.0.1:8080/v1/disk/", token);

        assert_eq!(config.base_url, "http://127.0.0.1:8080/v1/disk");
        assert_eq!(config.list_limit, DEFAULT_LIST_LIMIT);
    }

    #[test]
    fn test_backoff_doubles_until_cap() {
        let poll = PollConfig {
            timeout: Duration::from_secs(10),
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_millis(350),
        };

        let second = poll.next_delay(poll.initial_delay);
        let third = poll.next_delay(second);
        let fourth = poll.next_delay(third);

        assert_eq!(second, Duration::from_millis(200));
        assert_eq!(third, Duration::from_millis(350));
        assert_eq!(fourth, Duration::from_millis(350));
    }

    #[test]
    fn test_zero_delays_are_floored() {
        let poll = PollConfig {
            timeout: Duration::from_secs(1),
            initial_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        };

        assert_eq!(poll.first_delay(), MIN_POLL_DELAY);
        assert_eq!(poll.next_delay(Duration::ZERO), MIN_POLL_DELAY);
        assert_eq!(poll.next_delay(poll.first_delay()), MIN_POLL_DELAY);
    }
}
