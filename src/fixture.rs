// Per-test remote folder: a fresh unique name plus best-effort removal when
// the guard goes out of scope.

use tracing::warn;
use uuid::Uuid;

use crate::api::DiskApiClient;

/// `test-folder-<uuid>`; unique enough that parallel runs never collide.
pub fn unique_folder_name() -> String {
    format!("test-folder-{}", Uuid::new_v4())
}

/// Owns a folder name for the duration of one test. The folder is not
/// created here; dropping the guard deletes whatever ended up at that path.
pub struct TestFolder {
    client: DiskApiClient,
    name: String,
}

impl TestFolder {
    pub fn new(client: &DiskApiClient) -> Self {
        TestFolder {
            client: client.clone(),
            name: unique_folder_name(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn client(&self) -> &DiskApiClient {
        &self.client
    }
}

impl Drop for TestFolder {
    fn drop(&mut self) {
        // Rejected deletes are already logged by the client.
        if let Err(e) = self.client.delete_folder(&self.name) {
            warn!(folder = %self.name, error = %e, "Failed to clean up test folder");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_folder_names_differ() {
        let first = unique_folder_name();
        let second = unique_folder_name();

        assert!(first.starts_with("test-folder-"));
        assert_eq!(first.len(), "test-folder-".len() + 36);
        assert_ne!(first, second);
    }
}
