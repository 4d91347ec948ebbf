//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Request to upstream:
//!     → timeouts.rs (bound send + full response read)
//!     → Timeout surfaces as 504, never retried
//! ```
//!
//! # Design Decisions
//! - Every upstream call has a deadline
//! - Each upstream call is attempted exactly once

pub mod timeouts;

pub use timeouts::with_deadline;
