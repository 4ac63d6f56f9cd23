//! Clash Approval - the decision ladder and everything allowed to change
//! its result.
//!
//! # Components
//!
//! - [`Verdict`]: decision, hardness, reasons, risk signals, preview hint
//!   and safer alternative for one command
//! - [`Ladder`]: the classifier. Pure and total; it never fails
//! - [`Arbiter`]: optional second opinion on CONFIRM verdicts, applied
//!   through [`arbiter::clamp`] so it can only tighten
//! - [`break_glass`]: the exact-phrase emergency override
//!
//! # Example
//!
//! ```
//! use clash_approval::Ladder;
//! use clash_config::Policy;
//! use clash_core::{ContextSnapshot, Decision};
//!
//! let policy = Policy::defaults().unwrap();
//! let ctx = ContextSnapshot::new("/tmp");
//! let verdict = Ladder::new(&policy).evaluate(&["rm".into(), "-rf".into(), "/".into()], &ctx);
//! assert_eq!(verdict.decision(), Decision::Block);
//! assert!(verdict.is_hard());
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod arbiter;
pub mod break_glass;
pub mod ladder;
pub mod verdict;

pub use arbiter::{Arbiter, ArbiterDecision, ArbiterInput, StubArbiter};
pub use break_glass::BREAK_GLASS_PHRASE;
pub use ladder::{Ladder, evaluate};
pub use verdict::Verdict;
