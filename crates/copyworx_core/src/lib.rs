//! Core data types for the CopyWorx section generation workflow.
//!
//! This crate provides the foundation data types shared by the model drivers,
//! the session workflow, and the command-line front end.

mod form;
mod message;
mod observability;
mod output;
mod request;
mod role;
mod section;
mod session;

pub use form::FormInputs;
pub use message::{Message, MessageBuilder};
pub use observability::{LogFormat, init_tracing};
pub use output::{Output, TokenUsage};
pub use request::{
    GenerateRequest, GenerateRequestBuilder, GenerateResponse, GenerateResponseBuilder,
};
pub use role::Role;
pub use section::{
    SectionDefinition, SectionDefinitionBuilder, SectionKind, SectionResult, SectionStatus,
};
pub use session::{GenerationSession, RedoPolicy};
