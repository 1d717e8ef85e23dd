//! Tacref Domain - reference data vocabulary and the pure parts of the
//! client interaction engine.
//!
//! Nothing in this crate touches storage, input devices or a UI framework.

pub mod error;
pub mod faction;
pub mod ids;
pub mod outline;
pub mod recent;

pub use error::DomainError;
pub use faction::{FactionRecord, RecordEntry};
pub use ids::FactionId;
pub use outline::{
    build_outline, OutlinePosition, Section, SectionKind, SectionOutline, Subsection,
};
pub use recent::{RecentFactions, RECENT_FACTIONS_CAPACITY};
