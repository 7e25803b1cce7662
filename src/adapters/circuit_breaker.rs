use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use tracing::warn;

use crate::config::types::BreakerConfig;
use crate::error::{Result, ServiceError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    Closed,
    Open,
    HalfOpen,
}

impl std::fmt::Display for BreakerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Closed => write!(f, "closed"),
            Self::Open => write!(f, "open"),
            Self::HalfOpen => write!(f, "half-open"),
        }
    }
}

struct Inner {
    state: BreakerState,
    consecutive_failures: u32,
    opened_at: Option<Instant>,
    half_open_in_flight: u32,
}

/// Consecutive-failure circuit breaker guarding one downstream service.
///
/// Calls that fail with a remote fault count towards `failure_threshold`;
/// once reached, calls are rejected with `CircuitOpen` until `open_timeout`
/// has passed, after which up to `half_open_max_requests` trial calls decide
/// whether the circuit closes again.
pub struct CircuitBreaker {
    name: &'static str,
    failure_threshold: u32,
    open_timeout: Duration,
    half_open_max_requests: u32,
    inner: Mutex<Inner>,
}

impl CircuitBreaker {
    pub fn new(name: &'static str, config: &BreakerConfig) -> Self {
        Self {
            name,
            failure_threshold: config.failure_threshold.max(1),
            open_timeout: Duration::from_secs(config.open_timeout_secs),
            half_open_max_requests: config.half_open_max_requests.max(1),
            inner: Mutex::new(Inner {
                state: BreakerState::Closed,
                consecutive_failures: 0,
                opened_at: None,
                half_open_in_flight: 0,
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn state(&self) -> BreakerState {
        let mut inner = self.lock();
        self.refresh(&mut inner);
        inner.state
    }

    pub async fn call<T, F>(&self, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let permit = self.acquire()?;
        let result = operation.await;
        permit.settle(result.as_ref().err());
        result
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn acquire(&self) -> Result<Permit<'_>> {
        let mut inner = self.lock();
        self.refresh(&mut inner);
        match inner.state {
            BreakerState::Closed => Ok(Permit {
                breaker: self,
                trial: false,
                settled: false,
            }),
            BreakerState::HalfOpen if inner.half_open_in_flight < self.half_open_max_requests => {
                inner.half_open_in_flight += 1;
                Ok(Permit {
                    breaker: self,
                    trial: true,
                    settled: false,
                })
            }
            BreakerState::HalfOpen | BreakerState::Open => {
                Err(ServiceError::CircuitOpen { service: self.name })
            }
        }
    }

    fn refresh(&self, inner: &mut Inner) {
        if inner.state == BreakerState::Open
            && inner
                .opened_at
                .is_some_and(|at| at.elapsed() >= self.open_timeout)
        {
            self.transition(inner, BreakerState::HalfOpen);
            inner.half_open_in_flight = 0;
        }
    }

    fn on_success(&self) {
        let mut inner = self.lock();
        inner.consecutive_failures = 0;
        if inner.state == BreakerState::HalfOpen {
            self.transition(&mut inner, BreakerState::Closed);
            inner.half_open_in_flight = 0;
            inner.opened_at = None;
        }
    }

    fn on_failure(&self) {
        let mut inner = self.lock();
        inner.consecutive_failures = inner.consecutive_failures.saturating_add(1);
        let trip = match inner.state {
            BreakerState::HalfOpen => true,
            BreakerState::Closed => inner.consecutive_failures >= self.failure_threshold,
            BreakerState::Open => false,
        };
        if trip {
            self.transition(&mut inner, BreakerState::Open);
            inner.opened_at = Some(Instant::now());
            inner.half_open_in_flight = 0;
        }
    }

    /// A half-open trial ended without an outcome; free its slot.
    fn release_trial(&self) {
        let mut inner = self.lock();
        if inner.state == BreakerState::HalfOpen {
            inner.half_open_in_flight = inner.half_open_in_flight.saturating_sub(1);
        }
    }

    fn transition(&self, inner: &mut Inner, to: BreakerState) {
        if inner.state != to {
            warn!(breaker = self.name, from = %inner.state, to = %to, "Circuit breaker state change");
            inner.state = to;
        }
    }
}

/// Admission to one guarded call.
///
/// A permit dropped before `settle` (the caller's future was cancelled) gives
/// its half-open trial slot back, so a later call can still run the trial.
struct Permit<'a> {
    breaker: &'a CircuitBreaker,
    trial: bool,
    settled: bool,
}

impl Permit<'_> {
    fn settle(mut self, error: Option<&ServiceError>) {
        self.settled = true;
        match error {
            Some(e) if e.is_remote_fault() => self.breaker.on_failure(),
            _ => self.breaker.on_success(),
        }
    }
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        if self.trial && !self.settled {
            self.breaker.release_trial();
        }
    }
}
