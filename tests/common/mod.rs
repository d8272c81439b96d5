use std::sync::Mutex;

use contas_core::config::{AppConfig, ConfigManager};
use contas_core::core::workspace::Workspace;
use contas_core::storage::JsonStore;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the
/// test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated store, workspace, and config backed by a unique
/// directory for each test.
pub fn setup_test_env() -> (JsonStore, Workspace, AppConfig) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let store = JsonStore::open(base.join("data")).expect("open json store");
    let workspace = Workspace::load_from(&store).expect("hydrate workspace");
    let manager =
        ConfigManager::with_base_dir(base).expect("create config manager for temp dir");
    let config = manager.load().expect("load default config");

    (store, workspace, config)
}
