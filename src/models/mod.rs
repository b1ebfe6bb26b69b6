pub mod strip;

pub use strip::{Strip, StripIndex};
