// Library root
// -----------
// The crate bundles two small exercises behind one library surface. The
// binary (`main.rs`) wires them into an interactive menu.
//
// Module responsibilities:
// - `api`: blocking HTTP client for the cloud disk REST API (create, list
//   and delete folders) plus the polling helper for eventual consistency.
// - `config`: token file reading and client configuration.
// - `error`: error kinds shared by the library.
// - `fixture`: unique folder names and drop-based cleanup for tests.
// - `exercises`: the three pure decision functions.
// - `ui`: terminal menu flows that delegate to `api` and `exercises`.
pub mod api;
pub mod config;
pub mod error;
pub mod exercises;
pub mod fixture;
pub mod ui;

pub use api::{find_folder, ApiResponse, DiskApiClient, FolderDescriptor};
pub use config::{read_token_from_file, DiskConfig, PollConfig, Token};
pub use error::{ConfigError, Error, Result};
