/// Sliding-window request limiter for outbound API calls
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub struct RateLimiter {
    /// Timestamps of requests inside the current window
    request_times: Mutex<VecDeque<Instant>>,
    max_requests: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            request_times: Mutex::new(VecDeque::new()),
            max_requests,
            window,
        }
    }

    pub fn per_second(max_requests: usize) -> Self {
        Self::new(max_requests, Duration::from_secs(1))
    }

    /// Record a request if the window has room, otherwise return how long to wait
    fn check_and_record(&self, now: Instant) -> Duration {
        let mut request_times = match self.request_times.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        while let Some(&front) = request_times.front() {
            if now.duration_since(front) >= self.window {
                request_times.pop_front();
            } else {
                break;
            }
        }

        if request_times.len() >= self.max_requests {
            if let Some(&oldest) = request_times.front() {
                return self.window - now.duration_since(oldest);
            }
        }

        request_times.push_back(now);
        Duration::ZERO
    }

    /// Wait until a request may be sent
    pub async fn acquire(&self) {
        loop {
            let wait = self.check_and_record(Instant::now());
            if wait.is_zero() {
                return;
            }
            tracing::debug!("API rate limit: waiting {}ms", wait.as_millis());
            tokio::time::sleep(wait).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limiter_allows_requests_within_limit() {
        let limiter = RateLimiter::per_second(5);
        let now = Instant::now();

        for _ in 0..5 {
            assert_eq!(limiter.check_and_record(now), Duration::ZERO);
        }
    }

    #[test]
    fn test_rate_limiter_blocks_over_limit() {
        let limiter = RateLimiter::per_second(5);
        let now = Instant::now();

        for _ in 0..5 {
            limiter.check_and_record(now);
        }

        let wait = limiter.check_and_record(now + Duration::from_millis(200));
        assert_eq!(wait, Duration::from_millis(800));
    }

    #[test]
    fn test_rate_limiter_frees_slots_after_window() {
        let limiter = RateLimiter::per_second(2);
        let now = Instant::now();

        limiter.check_and_record(now);
        limiter.check_and_record(now);
        assert_eq!(limiter.check_and_record(now + Duration::from_secs(1)), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_acquire_within_limit_does_not_wait() {
        let limiter = RateLimiter::per_second(3);
        let started = Instant::now();
        for _ in 0..3 {
            limiter.acquire().await;
        }
        assert!(started.elapsed() < Duration::from_millis(500));
    }
}
