use serde::{Deserialize, Serialize};

/// Signals recovered from a profile page, or synthesized from its URL.
///
/// `name` is never empty: when no heuristic matches, it is derived from the
/// URL slug, and the slug deriver itself falls back to "Professional".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileSignals {
    pub name: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub experience: Vec<String>,
    /// Not extracted yet; kept so downstream formatting already handles it.
    pub skills: Vec<String>,
}

impl ProfileSignals {
    /// Signals carrying only a name, used when the page could not be fetched.
    pub fn name_only(name: String) -> Self {
        Self {
            name,
            ..Self::default()
        }
    }

    /// True when nothing beyond the name was recovered.
    pub fn is_name_only(&self) -> bool {
        self.title.is_none()
            && self.company.is_none()
            && self.location.is_none()
            && self.experience.is_empty()
            && self.skills.is_empty()
    }
}
