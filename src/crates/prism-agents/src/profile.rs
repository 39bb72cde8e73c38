//! Agent identity and fixed traits.

use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("agent id cannot be empty")]
    EmptyId,
    #[error("agent name cannot be empty")]
    EmptyName,
    #[error("agent must have at least one interest")]
    EmptyInterests,
}

/// Static identity and personality used to build prompts and to seed a
/// simulation. Immutable once constructed.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AgentProfile {
    pub id: String,
    pub name: String,
    pub interests: Vec<String>,
    #[serde(default = "default_personality")]
    pub personality: String,
    #[serde(default)]
    pub stance: HashMap<String, String>,
}

fn default_personality() -> String {
    "neutral".to_string()
}

impl AgentProfile {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        interests: Vec<String>,
    ) -> Result<Self, ProfileError> {
        let profile = Self {
            id: id.into(),
            name: name.into(),
            interests,
            personality: default_personality(),
            stance: HashMap::new(),
        };
        profile.validate()?;
        Ok(profile)
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.id.trim().is_empty() {
            return Err(ProfileError::EmptyId);
        }
        if self.name.trim().is_empty() {
            return Err(ProfileError::EmptyName);
        }
        if self.interests.is_empty() {
            return Err(ProfileError::EmptyInterests);
        }
        Ok(())
    }
}
