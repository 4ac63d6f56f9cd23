//! Clash Preview - dry-run simulation of destructive commands.
//!
//! Given a [`PreviewHint`] attached to a CONFIRM verdict, the engine
//! forecasts how many items the command would affect and samples a few of
//! them, without touching the filesystem or the repository:
//!
//! - `rm`: existence check of each resolved target
//! - `find ... -delete`: the same `find` with `-delete` stripped
//! - `git clean`: `git clean -n -d` with caller force/dry-run flags removed
//!
//! [`run`] never fails. Any problem is carried in [`PreviewResult::error`].

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod engine;
pub mod hint;
pub mod result;

pub use engine::run;
pub use hint::{PreviewHint, PreviewKind};
pub use result::PreviewResult;
