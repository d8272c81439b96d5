#![doc(test(attr(deny(warnings))))]

//! Contas Core implements the lifecycle of payable and receivable bills:
//! entity model, status derivation, filtering, installment expansion, and
//! summaries, persisted through pluggable storage backends.

pub mod auth;
pub mod cep;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod export;
pub mod storage;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter =
            EnvFilter::from_default_env().add_directive("contas_core=info".parse().unwrap());

        fmt().with_env_filter(filter).init();
        tracing::info!("Contas Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
