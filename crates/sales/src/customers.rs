use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::ProfileId;

/// Customer profile row (`profiles` table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub id: ProfileId,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Customer directory search: case-insensitive substring on name, email, or id.
/// A blank term returns every profile; any other term is matched untrimmed.
pub fn search_profiles<'a>(
    profiles: &'a [CustomerProfile],
    term: &str,
) -> Vec<&'a CustomerProfile> {
    if term.trim().is_empty() {
        return profiles.iter().collect();
    }
    let term = term.to_lowercase();

    profiles
        .iter()
        .filter(|profile| {
            [
                profile.name.as_deref(),
                Some(profile.email.as_str()),
                Some(profile.id.as_str()),
            ]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&term))
        })
        .collect()
}
