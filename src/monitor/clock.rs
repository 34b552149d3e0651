use async_trait::async_trait;
use chrono::{Local, NaiveDateTime};
use std::time::Duration;

/// Source of wall-clock time and of the pause between cycles
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current local wall-clock time, used to stamp log lines
    fn now(&self) -> NaiveDateTime;

    /// Suspends the caller for `duration`
    async fn sleep(&self, duration: Duration);
}

/// The real clock: local time and tokio timers
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Renders an interval for operator messages ("5 minutes", "90 seconds")
pub fn describe_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    match secs {
        60 => "1 minute".to_string(),
        s if s > 0 && s % 60 == 0 => format!("{} minutes", s / 60),
        1 => "1 second".to_string(),
        s => format!("{} seconds", s),
    }
}
