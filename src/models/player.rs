//! Player roster model.

use serde::{Deserialize, Serialize};

/// A roster entry.
///
/// Supplied by the persistence layer; any field except the name may be
/// missing or empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Player {
    pub name: String,

    #[serde(default)]
    pub profile_image_url: String,

    /// Optional birthday formatted `DD-MM`.
    #[serde(default)]
    pub birthday: String,
}

impl Player {
    pub fn new(name: String) -> Self {
        Self {
            name,
            ..Default::default()
        }
    }

    /// Parse the `DD-MM` birthday into (day, month), if present and valid.
    pub fn birthday_day_month(&self) -> Option<(u32, u32)> {
        let (day, month) = self.birthday.trim().split_once('-')?;
        let day = day.trim().parse::<u32>().ok()?;
        let month = month.trim().parse::<u32>().ok()?;
        // Validate against a leap year so 29-02 is accepted.
        chrono::NaiveDate::from_ymd_opt(2024, month, day)?;
        Some((day, month))
    }
}
