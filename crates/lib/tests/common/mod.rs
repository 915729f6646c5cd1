#![allow(dead_code)]
//! # Common Test Utilities
//!
//! Shared setup for the integration tests in this crate.

use dotenvy::dotenv;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initializes the tracing subscriber and loads .env for tests.
pub fn setup_tracing() {
    INIT.call_once(|| {
        dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// The running example used across the advisor tests.
pub const LANDLORD_CASE: &str = "My landlord is refusing to return my security deposit of Rs. 50,000 after I vacated the apartment. The rental agreement clearly states the deposit should be returned within 30 days. It's been 3 months now.";
