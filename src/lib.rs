//! Firefight - turn-based tactical combat engine
//!
//! `core` holds cross-cutting types, `combat` the rules and the session
//! state machine, `engine` the collaborators and the locked service facade.

pub mod combat;
pub mod core;
pub mod engine;
