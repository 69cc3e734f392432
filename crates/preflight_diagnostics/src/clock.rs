//! Process-wide monotonic source for condition transition times.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicI64, Ordering};

static LAST_NANOS: AtomicI64 = AtomicI64::new(i64::MIN);

/// Returns the current wall-clock time, clamped so that it never precedes a
/// value previously returned by this function in the same process.
///
/// Wall clocks can step backwards; conditions built later must still carry a
/// transition time greater than or equal to those built earlier.
pub fn transition_time() -> DateTime<Utc> {
    let now = Utc::now();
    let Some(now_nanos) = now.timestamp_nanos_opt() else {
        return now;
    };
    let prev = LAST_NANOS.fetch_max(now_nanos, Ordering::SeqCst);
    if prev > now_nanos {
        DateTime::from_timestamp_nanos(prev)
    } else {
        now
    }
}
