//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path
//!     → router.rs (route lookup)
//!     → matcher.rs (leading-segment prefix check)
//!     → Return: matched Route or None
//!
//! Route compilation (at startup):
//!     UpstreamsConfig
//!     → one Route per Service
//!     → Freeze as immutable RouteTable
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Prefixes are disjoint, so at most one route matches
//! - Deterministic: same input always matches same route

pub mod matcher;
pub mod router;

pub use matcher::PathPrefixMatcher;
pub use router::{Route, RouteTable, Service, Upstream};
