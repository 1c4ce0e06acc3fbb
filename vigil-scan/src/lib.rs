//! Vigil Scan - Aggregation and report assembly
//!
//! Runs source adapters and turns their articles into cacheable reports:
//! - **Aggregator**: concurrent, order-preserving adapter fan-out
//! - **Catalog**: which adapters feed each target, NOTAM and flight scan
//! - **Report**: threat report built around the scoring engine
//! - **Scanner**: the seam the runtime drives, with a live implementation

pub mod aggregator;
pub mod catalog;
pub mod flights;
pub mod live;
pub mod notams;
pub mod report;
pub mod traits;

#[cfg(test)]
mod testing;

pub use aggregator::*;
pub use catalog::*;
pub use flights::*;
pub use live::*;
pub use notams::*;
pub use report::*;
pub use traits::*;
