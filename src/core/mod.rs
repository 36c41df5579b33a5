pub mod config;
pub mod error;
pub mod table;
pub mod types;

pub use config::RulesConfig;
pub use error::{CombatError, ConfigError, Result, StateError, ValidationError};
pub use types::CombatantId;
