// API client module: a small blocking HTTP client for the cloud disk REST
// API. It only translates calls into requests and hands back what the
// service answered; path validation and auth checks stay on the server.

use std::fmt;
use std::thread;
use std::time::Instant;

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::config::{normalize_base_url, DiskConfig, PollConfig, Token};
use crate::error::{ConfigError, Error, Result};

/// Blocking client for the disk `resources` endpoint. Cloning is cheap: the
/// underlying connection pool is shared.
#[derive(Clone)]
pub struct DiskApiClient {
    client: Client,
    base_url: String,
    list_limit: u32,
    auth: HeaderValue,
}

/// Status and body of one round trip, kept unopened so callers can assert on
/// exactly what the service said.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    body: String,
}

/// One entry of a folder listing. Only `name` is required; the service sends
/// many more fields which are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FolderDescriptor {
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

/// Error envelope the service returns with 4xx/5xx answers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub description: String,
}

impl DiskApiClient {
    pub fn new(config: DiskConfig) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(DiskApiClient {
            client,
            base_url: normalize_base_url(config.base_url),
            list_limit: config.list_limit,
            auth: auth_header(&config.token)?,
        })
    }

    /// Client configured from `DISK_API_URL` / `DISK_TOKEN_FILE`.
    /// See [`DiskConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(DiskConfig::from_env()?)
    }

    /// Same endpoint and connection pool, different credentials.
    pub fn with_token(&self, token: &Token) -> Result<Self> {
        let mut client = self.clone();
        client.auth = auth_header(token)?;
        Ok(client)
    }

    /// PUT `/resources?path=<path>`. The path is forwarded verbatim; 201 means
    /// the folder was created.
    pub fn create_folder(&self, path: &str) -> Result<ApiResponse> {
        self.send(Method::PUT, &[("path", path)])
    }

    /// List the disk root and return the embedded items.
    ///
    /// Anything that does not carry `_embedded.items` (error envelopes,
    /// non-JSON bodies) yields an empty listing instead of an error. Only
    /// transport failures are returned as `Err`.
    pub fn list_folders(&self) -> Result<Vec<FolderDescriptor>> {
        let limit = self.list_limit.to_string();
        let response = self.send(Method::GET, &[("path", "/"), ("limit", limit.as_str())])?;
        let folders = parse_listing(response.body());
        if folders.is_empty() && !response.is_success() {
            debug!(
                status = response.status().as_u16(),
                "listing request rejected, treating as empty"
            );
        }
        Ok(folders)
    }

    /// DELETE `/resources?path=<path>`. A status other than 202/204 is logged
    /// as a warning and returned, never raised.
    pub fn delete_folder(&self, path: &str) -> Result<ApiResponse> {
        let response = self.send(Method::DELETE, &[("path", path)])?;
        if !response.is_delete_accepted() {
            warn!(
                folder = path,
                status = response.status().as_u16(),
                "Failed to delete folder"
            );
        }
        Ok(response)
    }

    /// Poll the listing until `name` shows up, backing off between attempts.
    /// Returns the listing that contained the folder, or [`Error::Timeout`]
    /// once `poll.timeout` has elapsed.
    pub fn wait_for_folder(&self, name: &str, poll: &PollConfig) -> Result<Vec<FolderDescriptor>> {
        let started = Instant::now();
        let mut delay = poll.first_delay();
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            let folders = self.list_folders()?;
            if find_folder(&folders, name) {
                info!(folder = name, attempts, elapsed = ?started.elapsed(), "Folder visible in listing");
                return Ok(folders);
            }

            let elapsed = started.elapsed();
            if elapsed >= poll.timeout {
                return Err(Error::Timeout {
                    name: name.to_string(),
                    waited: elapsed,
                });
            }

            let pause = delay.min(poll.timeout - elapsed);
            debug!(folder = name, attempts, ?pause, "Folder not listed yet");
            thread::sleep(pause);
            delay = poll.next_delay(delay);
        }
    }

    fn resources_url(&self) -> String {
        format!("{}/resources", self.base_url)
    }

    fn auth_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.auth.clone());
        headers
    }

    fn send(&self, method: Method, query: &[(&str, &str)]) -> Result<ApiResponse> {
        let res = self
            .client
            .request(method.clone(), self.resources_url())
            .headers(self.auth_headers())
            .query(query)
            .send()?;
        let response = ApiResponse::read(res)?;
        debug!(%method, ?query, status = response.status().as_u16(), "Disk API call");
        Ok(response)
    }
}

impl ApiResponse {
    fn read(res: Response) -> Result<Self> {
        let status = res.status();
        let body = res.text()?;
        Ok(ApiResponse { status, body })
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// 202 (deletion queued) and 204 (deleted) both count as done.
    pub fn is_delete_accepted(&self) -> bool {
        matches!(self.status, StatusCode::ACCEPTED | StatusCode::NO_CONTENT)
    }

    pub fn json<T: DeserializeOwned>(&self) -> serde_json::Result<T> {
        serde_json::from_str(&self.body)
    }

    /// Decoded error envelope, if this is a failure that carries one.
    pub fn api_error(&self) -> Option<ApiErrorBody> {
        if self.is_success() {
            return None;
        }
        self.json::<ApiErrorBody>()
            .ok()
            .filter(|body| !body.error.is_empty())
    }
}

impl fmt::Display for ApiResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status {}, body: {}", self.status, self.body)
    }
}

/// True iff some descriptor is called exactly `name`.
pub fn find_folder(folders: &[FolderDescriptor], name: &str) -> bool {
    folders.iter().any(|folder| folder.name == name)
}

fn auth_header(token: &Token) -> std::result::Result<HeaderValue, ConfigError> {
    let mut value = HeaderValue::from_str(&format!("OAuth {}", token.as_str()))
        .map_err(|_| ConfigError::InvalidToken)?;
    value.set_sensitive(true);
    Ok(value)
}

fn parse_listing(body: &str) -> Vec<FolderDescriptor> {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Vec::new();
    };
    value
        .pointer("/_embedded/items")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| FolderDescriptor::deserialize(item).ok())
                .collect()
        })
        .unwrap_or_default()
}
