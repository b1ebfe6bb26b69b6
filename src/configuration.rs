use config::{Config, ConfigError};
use serde::Deserialize;

#[derive(Deserialize, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Site output directory, the root everything else is relative to.
    pub public_dir: String,
    /// Strip index JSON, relative to `public_dir`.
    pub strips_file: String,
    /// Output PNG, relative to `public_dir`.
    pub output_file: String,
    /// Literal prefix stripped from `image_url` values to map them to
    /// local files under `public_dir`.
    pub url_prefix: String,
}

impl Settings {
    /// Loads settings from `config_file` if it exists; every key has a
    /// default so the tool runs with no configuration at all.
    pub fn new(config_file: &str) -> Result<Self, ConfigError> {
        let builder = Config::builder()
            .set_default("public_dir", "public")?
            .set_default("strips_file", "data/strips.json")?
            .set_default("output_file", "og-image.png")?
            .set_default("url_prefix", "/Porterias/")?
            .add_source(config::File::with_name(config_file).required(false))
            .build()?;
        builder.try_deserialize()
    }
}
