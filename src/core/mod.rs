pub mod config;
pub mod error;
pub mod types;

pub use config::BattleConfig;
pub use error::{BroadsideError, Result};
pub use types::{Difficulty, PlayerId};
