//! @ai:module:intent Token-bucket throttling for oracle API requests
//! @ai:module:layer infrastructure
//! @ai:module:public_api RateLimiter, RateLimiterTrait
//! @ai:module:stateless false

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// @ai:intent Trait for rate limiting functionality
pub trait RateLimiterTrait: Send + Sync {
    /// @ai:intent Wait until a request is allowed
    fn wait(&self) -> impl std::future::Future<Output = ()> + Send;
}

/// @ai:intent Token bucket refilled continuously at `requests_per_minute`
///            Starts full, so the first minute's worth of calls pass immediately
pub struct RateLimiter {
    state: Arc<Mutex<BucketState>>,
    requests_per_minute: u32,
}

struct BucketState {
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    /// @ai:intent Create a new rate limiter
    /// @ai:pre requests_per_minute > 0
    /// @ai:effects pure
    pub fn new(requests_per_minute: u32) -> Self {
        let requests_per_minute = requests_per_minute.max(1);
        Self {
            state: Arc::new(Mutex::new(BucketState {
                tokens: requests_per_minute as f64,
                last_refill: Instant::now(),
            })),
            requests_per_minute,
        }
    }

    pub fn requests_per_minute(&self) -> u32 {
        self.requests_per_minute
    }

    fn tokens_per_second(&self) -> f64 {
        self.requests_per_minute as f64 / 60.0
    }

    /// @ai:effects state:write, time
    fn refill(&self, state: &mut BucketState) {
        let now = Instant::now();
        let elapsed = now.duration_since(state.last_refill);
        state.tokens = (state.tokens + elapsed.as_secs_f64() * self.tokens_per_second())
            .min(self.requests_per_minute as f64);
        state.last_refill = now;
    }
}

impl RateLimiterTrait for RateLimiter {
    /// @ai:effects state:write, time
    async fn wait(&self) {
        loop {
            let sleep_duration = {
                let mut state = self.state.lock().await;
                self.refill(&mut state);

                if state.tokens >= 1.0 {
                    state.tokens -= 1.0;
                    return;
                }

                Duration::from_secs_f64((1.0 - state.tokens) / self.tokens_per_second())
            };

            tracing::debug!("Rate limit reached, waiting {:?}", sleep_duration);
            tokio::time::sleep(sleep_duration).await;
        }
    }
}
