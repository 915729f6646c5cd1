//! # Prompt Templates
//!
//! Prompt templates used by the analysis engine. Templates are plain strings
//! with `{name}` placeholders; the server can override them from its config.

pub mod legal;
