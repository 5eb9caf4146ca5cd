use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// Source of waiting, swapped out in tests
#[async_trait::async_trait]
pub trait Delay: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Wall-clock delay backed by the tokio timer
pub struct TokioDelay;

#[async_trait::async_trait]
impl Delay for TokioDelay {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Sequential queue that waits a fixed interval between handing out items.
///
/// The first item is released immediately; every following one only after
/// the interval has elapsed.
pub struct RateLimitedQueue<T> {
    items: VecDeque<T>,
    interval: Duration,
    delay: Arc<dyn Delay>,
    released: usize,
}

impl<T> RateLimitedQueue<T> {
    pub fn new(items: impl IntoIterator<Item = T>, interval: Duration, delay: Arc<dyn Delay>) -> Self {
        Self {
            items: items.into_iter().collect(),
            interval,
            delay,
            released: 0,
        }
    }

    pub async fn next(&mut self) -> Option<T> {
        let item = self.items.pop_front()?;
        if self.released > 0 && !self.interval.is_zero() {
            self.delay.sleep(self.interval).await;
        }
        self.released += 1;
        Some(item)
    }

    pub fn released(&self) -> usize {
        self.released
    }
}
