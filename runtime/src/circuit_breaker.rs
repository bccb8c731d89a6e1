//! Circuit breaker guarding the notification gateway.
//!
//! Registration must not fail because confirmations cannot be sent, and a
//! struggling notification backend must not be hammered by every new
//! registration. The breaker counts consecutive failures, opens once a
//! threshold is reached, rejects calls while open, and probes recovery
//! through a half-open state after a cooldown.

use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::sync::RwLock;

/// Circuit breaker configuration.
#[derive(Debug, Clone)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures before the circuit opens.
    pub failure_threshold: usize,
    /// How long the circuit stays open before probing recovery.
    pub cooldown: Duration,
    /// Successes required in half-open state to close the circuit.
    pub success_threshold: usize,
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            failure_threshold: 5,
            cooldown: Duration::from_secs(30),
            success_threshold: 2,
        }
    }
}

/// Circuit breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Calls pass through; failures are counted.
    Closed,
    /// Calls are rejected until the cooldown expires.
    Open,
    /// Probing recovery with live calls.
    HalfOpen,
}

/// Errors from calls made through the breaker.
#[derive(Error, Debug)]
pub enum CircuitBreakerError<E> {
    /// Circuit is open, the call was not attempted.
    #[error("circuit breaker is open")]
    Open,
    /// The call was attempted and failed.
    #[error("operation failed: {0}")]
    Inner(E),
}

#[derive(Debug)]
struct BreakerState {
    state: State,
    failure_count: usize,
    success_count: usize,
    last_failure_at: Option<Instant>,
}

/// Failure-counting circuit breaker.
#[derive(Debug)]
pub struct CircuitBreaker {
    config: CircuitBreakerConfig,
    state: RwLock<BreakerState>,
}

impl CircuitBreaker {
    /// Create a closed breaker with the given configuration.
    #[must_use]
    pub fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            state: RwLock::new(BreakerState {
                state: State::Closed,
                failure_count: 0,
                success_count: 0,
                last_failure_at: None,
            }),
        }
    }

    /// Current state of the breaker.
    pub async fn state(&self) -> State {
        self.state.read().await.state
    }

    /// Run an operation through the breaker.
    ///
    /// # Errors
    ///
    /// Returns [`CircuitBreakerError::Open`] if the circuit rejects the call,
    /// or [`CircuitBreakerError::Inner`] if the operation itself fails.
    pub async fn call<F, Fut, T, E>(&self, operation: F) -> Result<T, CircuitBreakerError<E>>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<T, E>>,
    {
        if !self.can_attempt().await {
            metrics::counter!("circuit_breaker.rejected.total").increment(1);
            return Err(CircuitBreakerError::Open);
        }

        match operation().await {
            Ok(result) => {
                self.on_success().await;
                Ok(result)
            }
            Err(err) => {
                self.on_failure().await;
                Err(CircuitBreakerError::Inner(err))
            }
        }
    }

    async fn can_attempt(&self) -> bool {
        let mut state = self.state.write().await;

        match state.state {
            State::Closed | State::HalfOpen => true,
            State::Open => {
                let cooled_down = state
                    .last_failure_at
                    .is_some_and(|at| at.elapsed() >= self.config.cooldown);
                if cooled_down {
                    tracing::info!("circuit breaker open -> half-open");
                    metrics::counter!("circuit_breaker.half_open.total").increment(1);
                    state.state = State::HalfOpen;
                    state.success_count = 0;
                }
                cooled_down
            }
        }
    }

    async fn on_success(&self) {
        let mut state = self.state.write().await;

        match state.state {
            State::Closed => {
                state.failure_count = 0;
            }
            State::HalfOpen => {
                state.success_count += 1;
                if state.success_count >= self.config.success_threshold {
                    tracing::info!(
                        successes = state.success_count,
                        "circuit breaker half-open -> closed"
                    );
                    metrics::counter!("circuit_breaker.closed.total").increment(1);
                    state.state = State::Closed;
                    state.failure_count = 0;
                    state.success_count = 0;
                    state.last_failure_at = None;
                }
            }
            State::Open => {
                state.failure_count = 0;
            }
        }
    }

    async fn on_failure(&self) {
        let mut state = self.state.write().await;
        state.last_failure_at = Some(Instant::now());

        match state.state {
            State::Closed => {
                state.failure_count += 1;
                if state.failure_count >= self.config.failure_threshold {
                    tracing::warn!(
                        failures = state.failure_count,
                        "circuit breaker closed -> open"
                    );
                    metrics::counter!("circuit_breaker.opened.total").increment(1);
                    state.state = State::Open;
                }
            }
            State::HalfOpen => {
                tracing::warn!("circuit breaker half-open -> open, recovery probe failed");
                metrics::counter!("circuit_breaker.opened.total").increment(1);
                state.state = State::Open;
                state.failure_count = 1;
                state.success_count = 0;
            }
            State::Open => {
                state.failure_count += 1;
            }
        }
    }
}
