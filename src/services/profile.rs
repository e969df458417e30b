//! Profile service

use crate::audit::EntityType;
use crate::error::{PesoError, PesoResult};
use crate::models::UserProfile;
use crate::storage::{Storage, Table};

/// Fields to change on the profile; `None` leaves a field alone
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    /// A blank URL clears the avatar
    pub avatar_url: Option<String>,
    pub currency: Option<String>,
}

pub struct ProfileService<'a> {
    storage: &'a Storage,
}

impl<'a> ProfileService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// The stored profile, or defaults when none has been saved
    pub fn get(&self) -> PesoResult<UserProfile> {
        self.storage.profile.get()
    }

    pub fn initials(&self) -> PesoResult<String> {
        Ok(self.get()?.initials())
    }

    pub fn update(&self, update: ProfileUpdate) -> PesoResult<UserProfile> {
        let before = self.get()?;
        let mut profile = before.clone();

        if let Some(name) = update.name {
            profile.name = name.trim().to_string();
        }
        if let Some(email) = update.email {
            profile.email = email.trim().to_string();
        }
        if let Some(url) = update.avatar_url {
            let url = url.trim();
            profile.avatar_url = (!url.is_empty()).then(|| url.to_string());
        }
        if let Some(currency) = update.currency {
            profile.currency = currency.trim().to_uppercase();
        }
        profile
            .validate()
            .map_err(|e| PesoError::Validation(e.to_string()))?;

        self.storage.profile.set(profile.clone())?;
        self.storage.flush(&[Table::Profile])?;
        self.storage
            .log_singleton_update(EntityType::Profile, &before, &profile)?;

        tracing::info!(name = %profile.name, "updated profile");
        Ok(profile)
    }
}
