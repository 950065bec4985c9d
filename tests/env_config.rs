//! Environment-driven configuration.
//!
//! Environment variables are process-wide, so everything that touches them
//! lives in this single test binary and runs as one test.

use std::io::Write;
use std::path::PathBuf;

use disk_autotest::config::{DEFAULT_BASE_URL, DEFAULT_TOKEN_FILE};
use disk_autotest::{ConfigError, DiskApiClient, DiskConfig, Error};
use tokio::runtime::Runtime;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn client_from_env() {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());
    let dir = tempfile::tempdir().unwrap();

    // Defaults when nothing is set.
    std::env::remove_var("DISK_API_URL");
    std::env::remove_var("DISK_TOKEN_FILE");
    assert_eq!(DiskConfig::base_url_from_env(), DEFAULT_BASE_URL);
    assert_eq!(DiskConfig::token_file_from_env(), PathBuf::from(DEFAULT_TOKEN_FILE));

    std::env::set_var("DISK_API_URL", format!("{}/v1/disk", server.uri()));

    // Missing token file stops before any request.
    let missing = dir.path().join("token_ya.txt");
    std::env::set_var("DISK_TOKEN_FILE", &missing);
    match DiskApiClient::from_env() {
        Err(Error::Config(ConfigError::MissingTokenFile { path })) => assert_eq!(path, missing),
        Err(e) => panic!("expected MissingTokenFile, got {}", e),
        Ok(_) => panic!("client built without a token file"),
    }

    // So does a blank one.
    let blank = dir.path().join("blank.txt");
    std::fs::write(&blank, "  \n").unwrap();
    std::env::set_var("DISK_TOKEN_FILE", &blank);
    match DiskApiClient::from_env() {
        Err(Error::Config(ConfigError::EmptyToken { path })) => assert_eq!(path, blank),
        Err(e) => panic!("expected EmptyToken, got {}", e),
        Ok(_) => panic!("client built from a blank token file"),
    }

    assert!(rt.block_on(server.received_requests()).unwrap().is_empty());

    // A real token file routes requests to DISK_API_URL with that token.
    let good = dir.path().join("good.txt");
    let mut file = std::fs::File::create(&good).unwrap();
    writeln!(file, "y0_env-token").unwrap();
    std::env::set_var("DISK_TOKEN_FILE", &good);

    rt.block_on(
        Mock::given(method("PUT"))
            .and(path("/v1/disk/resources"))
            .and(header("Authorization", "OAuth y0_env-token"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server),
    );

    let api = DiskApiClient::from_env().unwrap_or_else(|e| panic!("{}", e));
    let response = api.create_folder("test-folder-env").unwrap();
    assert_eq!(response.status().as_u16(), 201);

    std::env::remove_var("DISK_API_URL");
    std::env::remove_var("DISK_TOKEN_FILE");
}
