//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use bank_provisioning::{
    config::{Config, ServiceKind},
    middleware::audit::AuditContext,
    services::record_number::NumberSource,
};

pub const MOBILE: &str = "9876543210";
pub const OTHER_MOBILE: &str = "9123456780";

/// Hands out the given numbers in order, repeating the last one forever.
pub struct SequenceNumbers {
    numbers: Vec<i64>,
    next: AtomicUsize,
}

impl SequenceNumbers {
    pub fn new(numbers: &[i64]) -> Self {
        assert!(!numbers.is_empty());
        Self {
            numbers: numbers.to_vec(),
            next: AtomicUsize::new(0),
        }
    }

    /// How many candidates were drawn so far.
    pub fn drawn(&self) -> usize {
        self.next.load(Ordering::SeqCst)
    }
}

impl NumberSource for SequenceNumbers {
    fn next_number(&self) -> i64 {
        let i = self.next.fetch_add(1, Ordering::SeqCst);
        self.numbers[i.min(self.numbers.len() - 1)]
    }
}

pub fn auditor(name: &str) -> AuditContext {
    AuditContext::new(name)
}

/// Configuration with defaults only, as if no variable were set.
pub fn default_config(service: ServiceKind) -> Config {
    Config::from_vars(service, Vec::<(String, String)>::new()).expect("empty config")
}

/// Install a test subscriber; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("warn")
        .try_init();
}
