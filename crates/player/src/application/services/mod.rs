//! Application services
//!
//! This module contains application services that implement use cases
//! for the Tacref Player. Services depend on port traits, not concrete
//! infrastructure implementations.

pub mod recent_factions_service;

pub use recent_factions_service::RecentFactionsService;
