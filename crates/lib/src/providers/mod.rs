//! # Providers
//!
//! External services the advisor talks to: hosted language models and
//! embedding endpoints (`ai`), and the vector-backed knowledge store (`db`).

pub mod ai;
pub mod db;
