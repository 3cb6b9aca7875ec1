use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const TUTORIAL_KEY: &str = "hasSeenTutorial";
pub const TUTORIAL_SEEN: &str = "true";

/// Narrower viewports never get the tour.
pub const MIN_TOUR_VIEWPORT: u32 = 768;

#[derive(Debug, Error)]
pub enum OnboardingError {
    #[error("onboarding store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("onboarding store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Persistent key/value flags that survive restarts.
pub trait OnboardingStore {
    fn get(&self, key: &str) -> Result<Option<String>, OnboardingError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), OnboardingError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl OnboardingStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, OnboardingError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), OnboardingError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Flags kept as a flat JSON object on disk. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<HashMap<String, String>, OnboardingError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl OnboardingStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, OnboardingError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), OnboardingError> {
        let mut values = self.load()?;
        values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(&values)?)?;
        Ok(())
    }
}

/// True when the tour should open on its own: flag unset and a desktop viewport.
/// An unreadable store counts as unset.
pub fn should_start_automatically<S: OnboardingStore>(store: &S, viewport_width: u32) -> bool {
    if viewport_width < MIN_TOUR_VIEWPORT {
        return false;
    }
    match store.get(TUTORIAL_KEY) {
        Ok(flag) => flag.is_none(),
        Err(e) => {
            tracing::warn!("⚠️ onboarding flag unreadable, showing tour: {}", e);
            true
        }
    }
}

/// Record that the tour was seen (finished or skipped).
pub fn finish<S: OnboardingStore>(store: &mut S) -> Result<(), OnboardingError> {
    store.set(TUTORIAL_KEY, TUTORIAL_SEEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tour_starts_once_on_desktop() {
        let mut store = MemoryStore::default();
        assert!(should_start_automatically(&store, 1280));
        assert!(!should_start_automatically(&store, 767));

        finish(&mut store).unwrap();
        assert_eq!(store.get(TUTORIAL_KEY).unwrap().as_deref(), Some("true"));
        assert!(!should_start_automatically(&store, 1280));
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs").join("onboarding.json");

        let store = JsonFileStore::new(&path);
        assert!(should_start_automatically(&store, 1024));

        let mut store = JsonFileStore::new(&path);
        finish(&mut store).unwrap();

        let reopened = JsonFileStore::new(&path);
        assert!(!should_start_automatically(&reopened, 1024));
        assert_eq!(reopened.get(TUTORIAL_KEY).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn corrupt_file_counts_as_unset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("onboarding.json");
        fs::write(&path, b"{not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(store.get(TUTORIAL_KEY), Err(OnboardingError::Corrupt(_))));
        assert!(should_start_automatically(&store, 1024));
    }
}
