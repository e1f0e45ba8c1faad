use chrono::{DateTime, SubsecRound, Utc};
use shutterbox_application::Clock;

/// Wall clock truncated to the microsecond precision the catalog stores.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(6)
    }
}
