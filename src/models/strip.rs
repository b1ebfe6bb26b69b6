use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// One published comic strip, as recorded in the site's strip index.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Strip {
    pub title: String,
    /// ISO `YYYY-MM-DD` date string. Ordering relies on zero padding.
    pub publish_date: String,
    /// Site URL of the strip image, e.g. `/Porterias/strips/001.png`.
    pub image_url: String,
}

/// The strip index document: `{ "strips": [ ... ] }`.
#[derive(Deserialize, Debug, Default)]
pub struct StripIndex {
    #[serde(default)]
    pub strips: Vec<Strip>,
}

impl StripIndex {
    /// Reads the index from disk. A missing or malformed file is not an
    /// error; it yields an empty index and a warning, so the caller falls
    /// through to the default rendering.
    pub fn load(path: &Path) -> Self {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("⚠ Could not read {}: {}, using default image", path.display(), e);
                return Self::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(index) => index,
            Err(e) => {
                warn!("⚠ Malformed strip index {}: {}, using default image", path.display(), e);
                Self::default()
            }
        }
    }

    /// The most recently published strip: greatest `publish_date` by string
    /// comparison, which matches chronological order only for zero-padded
    /// ISO dates.
    pub fn latest(&self) -> Option<&Strip> {
        self.strips
            .iter()
            .max_by(|a, b| a.publish_date.cmp(&b.publish_date))
    }
}
