//! compass-advisor: collaborator contracts for a planning session — the
//! simulated-ledger document parser and the prompt builders.
//!
//! Everything here is pure value/string transformation. Network calls are
//! the CLI's job; keeping them out of this crate keeps every prompt and
//! every parse testable without credentials.

pub mod document;
pub mod prompt;

pub use document::{parse_ledger_document, MalformedLedger};
pub use prompt::{
    format_percent, plan_prompt, question_prompt, simulation_prompt, ADVISOR_SYSTEM_PROMPT,
    SIMULATOR_SYSTEM_PROMPT,
};
