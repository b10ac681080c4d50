//! Content type profiles: named font-size ranges and length ceilings per text role.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::{LayoutError, Result};

/// How much a text role matters when space is contended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Normal,
    Low,
}

/// Font-size bounds and length limit for a semantic text role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentTypeProfile {
    pub name: String,
    /// Characters beyond this are truncated before fitting.
    pub max_length: usize,
    pub min_font_size: u32,
    pub max_font_size: u32,
    pub priority: Priority,
}

impl ContentTypeProfile {
    pub fn new(
        name: impl Into<String>,
        max_length: usize,
        min_font_size: u32,
        max_font_size: u32,
        priority: Priority,
    ) -> Self {
        ContentTypeProfile {
            name: name.into(),
            max_length,
            min_font_size,
            max_font_size,
            priority,
        }
    }

    pub fn admits(&self, font_size: u32) -> bool {
        (self.min_font_size..=self.max_font_size).contains(&font_size)
    }
}

/// Named profile lookup. Read-only once handed to the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRegistry {
    profiles: BTreeMap<String, ContentTypeProfile>,
}

impl ProfileRegistry {
    /// `title`, `subtitle`, `body`, `caption` and `bullet`.
    ///
    /// The search starts at 80% of `max_font_size`, which lands on the
    /// conventional slide sizes: 44pt titles, 32pt subtitles, 22pt body text.
    pub fn standard() -> Self {
        Self::from_profiles([
            ContentTypeProfile::new("title", 80, 28, 56, Priority::High),
            ContentTypeProfile::new("subtitle", 120, 18, 40, Priority::Medium),
            ContentTypeProfile::new("body", 600, 12, 28, Priority::Normal),
            ContentTypeProfile::new("caption", 150, 8, 18, Priority::Low),
            ContentTypeProfile::new("bullet", 400, 12, 28, Priority::Normal),
        ])
    }

    pub fn from_profiles(profiles: impl IntoIterator<Item = ContentTypeProfile>) -> Self {
        ProfileRegistry {
            profiles: profiles
                .into_iter()
                .map(|p| (p.name.trim().to_lowercase(), p))
                .collect(),
        }
    }

    /// Case-insensitive lookup.
    pub fn get(&self, name: &str) -> Result<&ContentTypeProfile> {
        self.profiles
            .get(&name.trim().to_lowercase())
            .ok_or_else(|| LayoutError::NotFound(format!("content type '{name}'")))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentTypeProfile> {
        self.profiles.values()
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
