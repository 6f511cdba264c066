use std::{future::Future, time::Duration};

use rand::Rng;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("delay minimum {min:?} is greater than maximum {max:?}")]
pub struct InvalidDelayBounds {
    pub min: Duration,
    pub max: Duration,
}

pub trait Clock {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

pub struct TokioClock;

impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await
    }
}

/// Gate between consecutive outbound requests.
pub trait Pacer {
    fn pause(&self) -> impl Future<Output = ()>;
}

/// Sleeps for a duration drawn uniformly from `[min, max]`.
pub struct PolitenessDelay<C: Clock> {
    clock: C,
    min: Duration,
    max: Duration,
}

impl<C: Clock> PolitenessDelay<C> {
    pub fn new(clock: C, min: Duration, max: Duration) -> Result<Self, InvalidDelayBounds> {
        if min > max {
            return Err(InvalidDelayBounds { min, max });
        }
        Ok(PolitenessDelay { clock, min, max })
    }

    pub fn next_delay(&self) -> Duration {
        rand::thread_rng().gen_range(self.min..=self.max)
    }
}

impl<C: Clock> Pacer for PolitenessDelay<C> {
    async fn pause(&self) {
        let delay = self.next_delay();
        log::info!("Waiting for {:.2} seconds...", delay.as_secs_f64());
        self.clock.sleep(delay).await;
    }
}
