//! Clash Core - shared types for the clash command gate.
//!
//! This crate provides:
//! - [`ContextSnapshot`]: read-only facts about the invocation environment
//! - Path resolution helpers shared by the classifier and the preview engine
//! - [`Decision`] and [`RiskSignal`], the vocabulary every other crate speaks
//! - [`ClashHome`]: the on-disk layout for home-level state
//!
//! Nothing in here evaluates a command. The ladder lives in `clash-approval`,
//! the dry-run simulators in `clash-preview`.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod context;
pub mod dirs;
pub mod error;
pub mod paths;
pub mod types;

pub use context::{ContextSnapshot, GitSummary};
pub use dirs::ClashHome;
pub use error::{ContextError, ContextResult};
pub use types::{Decision, RiskSignal};
