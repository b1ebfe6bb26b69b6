pub mod configuration;
pub mod fonts;
pub mod models;
pub mod render;
pub mod run;

pub use configuration::Settings;
pub use models::{Strip, StripIndex};
pub use run::run;
