use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use shutterbox_application::Transport;
use shutterbox_domain::{ImageAsset, TransportOutcome};
use tracing::debug;

/// Stand-in for a real endpoint: waits a fixed delay, then succeeds with the
/// configured probability.
#[derive(Debug, Clone)]
pub struct SimulatedTransport {
    delay: Duration,
    success_rate: f64,
}

impl SimulatedTransport {
    pub fn new(delay: Duration, success_rate: f64) -> Self {
        let success_rate = if success_rate.is_nan() {
            0.0
        } else {
            success_rate.clamp(0.0, 1.0)
        };
        Self {
            delay,
            success_rate,
        }
    }

    pub fn success_rate(&self) -> f64 {
        self.success_rate
    }
}

#[async_trait]
impl Transport for SimulatedTransport {
    async fn upload(&self, asset: &ImageAsset) -> TransportOutcome {
        tokio::time::sleep(self.delay).await;
        let delivered = rand::rng().random_bool(self.success_rate);
        debug!(asset_id = %asset.id, delivered, "simulated upload resolved");

        if delivered {
            TransportOutcome::Delivered {
                receipt: Some(format!("simulated://{}", asset.id)),
            }
        } else {
            TransportOutcome::Failed {
                reason: "simulated upload failure".to_string(),
            }
        }
    }
}
