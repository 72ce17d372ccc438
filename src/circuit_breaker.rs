//! # Circuit Breaker Module
//!
//! A small circuit breaker guarding the remote suggestion endpoint. When
//! transport failures pile up, the breaker opens and suggestion requests fail
//! fast instead of hammering an endpoint that is already down. After the
//! configured reset window it closes again and lets the next request probe
//! whether the service has recovered.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::suggestion_config::RetryConfig;

#[derive(Debug, Default)]
struct BreakerState {
    failures: u32,
    last_failure: Option<Instant>,
}

/// Failure breaker for suggestion requests.
///
/// Closed while the failure count stays below `circuit_breaker_threshold`;
/// open (failing fast) until `circuit_breaker_reset_secs` have elapsed since
/// the last failure, at which point the count resets.
#[derive(Debug)]
pub struct CircuitBreaker {
    state: Mutex<BreakerState>,
    threshold: u32,
    reset_after: Duration,
}

impl CircuitBreaker {
    /// Create a breaker from the retry configuration
    pub fn new(config: &RetryConfig) -> Self {
        Self {
            state: Mutex::new(BreakerState::default()),
            threshold: config.circuit_breaker_threshold,
            reset_after: Duration::from_secs(config.circuit_breaker_reset_secs),
        }
    }

    /// Whether requests should currently fail fast.
    ///
    /// Resets the breaker as a side effect once the reset window has passed.
    pub fn is_open(&self) -> bool {
        let mut state = self.state.lock().unwrap();
        if state.failures < self.threshold {
            return false;
        }
        match state.last_failure {
            Some(at) if at.elapsed() < self.reset_after => true,
            _ => {
                *state = BreakerState::default();
                false
            }
        }
    }

    /// Record a transport failure
    pub fn record_failure(&self) {
        let mut state = self.state.lock().unwrap();
        state.failures += 1;
        state.last_failure = Some(Instant::now());
    }

    /// Record a successful request, closing the breaker
    pub fn record_success(&self) {
        let mut state = self.state.lock().unwrap();
        *state = BreakerState::default();
    }
}
