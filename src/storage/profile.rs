//! Single-document profile store (`profile.json`)

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::PesoError;
use crate::models::UserProfile;

use super::file_io::{read_json, write_json_atomic};

pub struct ProfileStore {
    path: PathBuf,
    profile: RwLock<UserProfile>,
}

impl ProfileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            profile: RwLock::new(UserProfile::default()),
        }
    }

    /// Load the profile, falling back to defaults when the file is absent
    pub fn load(&self) -> Result<(), PesoError> {
        let loaded: UserProfile = read_json(&self.path)?;
        *self
            .profile
            .write()
            .map_err(|e| PesoError::Storage(format!("Failed to acquire write lock: {}", e)))? =
            loaded;
        Ok(())
    }

    pub fn save(&self) -> Result<(), PesoError> {
        let profile = self.get()?;
        write_json_atomic(&self.path, &profile)
    }

    pub fn get(&self) -> Result<UserProfile, PesoError> {
        self.profile
            .read()
            .map(|p| p.clone())
            .map_err(|e| PesoError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    pub fn set(&self, profile: UserProfile) -> Result<(), PesoError> {
        *self
            .profile
            .write()
            .map_err(|e| PesoError::Storage(format!("Failed to acquire write lock: {}", e)))? =
            profile;
        Ok(())
    }

    pub fn exists_on_disk(&self) -> bool {
        self.path.exists()
    }
}
