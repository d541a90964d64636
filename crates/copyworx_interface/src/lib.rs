//! Trait definitions for the CopyWorx section generation workflow.
//!
//! The model backend and session storage are external collaborators; this
//! crate defines the seams they plug into.

mod driver;
mod repository;

pub use driver::GenerationDriver;
pub use repository::{SessionFilter, SessionRepository, SessionSummary};
