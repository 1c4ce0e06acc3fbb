//! Vigil Core - Data model and scoring engine for conflict escalation monitoring
//!
//! This crate provides the pure, I/O-free building blocks:
//! - The `Article` record every source adapter produces
//! - Static tables: monitored targets, source credibility tiers, keyword tiers
//! - The threat-probability scoring engine
//! - NOTAM classification, flight-disruption detection and casualty extraction

pub mod article;
pub mod text;
pub mod tiers;
pub mod targets;
pub mod scoring;
pub mod notam;
pub mod flights;
pub mod casualties;

pub use article::*;
pub use text::*;
pub use tiers::*;
pub use targets::*;
pub use scoring::*;
pub use notam::*;
pub use flights::*;
pub use casualties::*;

/// Score every target starts from before news is weighed in
pub const BASE_SCORE: i32 = 25;

/// Half-life of an article's influence, in days
pub const HALF_LIFE_DAYS: f64 = 2.0;

/// Decay applied to articles whose timestamp cannot be parsed
pub const UNPARSABLE_DECAY: f64 = 0.1;

/// Articles at most this old count as "recent" for momentum
pub const RECENT_WINDOW_HOURS: f64 = 48.0;

/// Default analysis window, in days
pub const DEFAULT_WINDOW_DAYS: u32 = 7;

/// Largest analysis window accepted from callers, in days
pub const MAX_WINDOW_DAYS: u32 = 90;

/// Maximum number of ranked contributors kept on an assessment
pub const MAX_TOP_CONTRIBUTORS: usize = 15;
