use std::fs;
use std::path::Path;

use dashboard_gateway::AtomicFileWriter;
use dashboard_logging::{dash_error, dash_info, dash_warn};
use serde::{Deserialize, Serialize};

const STATE_FILENAME: &str = ".dashboard_state.ron";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
struct PersistedState {
    #[serde(default)]
    remembered_user: Option<String>,
}

pub(crate) fn load_remembered_user(state_dir: &Path) -> Option<String> {
    let path = state_dir.join(STATE_FILENAME);
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
        Err(err) => {
            dash_warn!("Failed to read persisted state from {:?}: {}", path, err);
            return None;
        }
    };

    let state: PersistedState = match ron::from_str(&content) {
        Ok(state) => state,
        Err(err) => {
            dash_warn!("Failed to parse persisted state from {:?}: {}", path, err);
            return None;
        }
    };

    let user = state.remembered_user.filter(|name| !name.trim().is_empty());
    if user.is_some() {
        dash_info!("Restored remembered user from {:?}", path);
    }
    user
}

pub(crate) fn save_remembered_user(state_dir: &Path, user: Option<&str>) {
    let state = PersistedState {
        remembered_user: user.map(ToOwned::to_owned),
    };

    let pretty = ron::ser::PrettyConfig::new();
    let content = match ron::ser::to_string_pretty(&state, pretty) {
        Ok(text) => text,
        Err(err) => {
            dash_error!("Failed to serialize persisted state: {}", err);
            return;
        }
    };

    let writer = AtomicFileWriter::new(state_dir.to_path_buf());
    if let Err(err) = writer.write(STATE_FILENAME, content.as_bytes()) {
        dash_error!("Failed to write persisted state to {:?}: {}", state_dir, err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn remembered_user_survives_a_restart() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_remembered_user(dir.path()), None);

        save_remembered_user(dir.path(), Some("alice"));
        assert_eq!(load_remembered_user(dir.path()).as_deref(), Some("alice"));

        save_remembered_user(dir.path(), None);
        assert_eq!(load_remembered_user(dir.path()), None);
    }

    #[test]
    fn corrupt_state_is_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(STATE_FILENAME), "not ron at all {").unwrap();
        assert_eq!(load_remembered_user(dir.path()), None);
    }
}
