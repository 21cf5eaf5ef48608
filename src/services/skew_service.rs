use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::errors::TransferError;

/// Source of "now" for skew checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time of the host.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Checks a client-asserted `X-Timestamp` (milliseconds since epoch)
/// against the server clock.
///
/// The client value is truncated to whole seconds before comparing; the
/// server side keeps its full precision. A skew equal to the tolerance is
/// accepted.
#[derive(Clone)]
pub struct SkewValidator {
    tolerance: Duration,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for SkewValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkewValidator")
            .field("tolerance", &self.tolerance)
            .finish_non_exhaustive()
    }
}

impl SkewValidator {
    pub fn new(tolerance_seconds: u32, clock: Arc<dyn Clock>) -> Self {
        Self {
            tolerance: Duration::seconds(i64::from(tolerance_seconds)),
            clock,
        }
    }

    /// Validate a raw header value. Returns the client time on success.
    pub fn check(&self, raw: Option<&str>) -> Result<DateTime<Utc>, TransferError> {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(TransferError::MissingTimestamp),
        };

        let millis: i64 = raw.parse().map_err(|_| TransferError::InvalidTimestamp)?;

        // Integer division truncates toward zero, dropping the milliseconds.
        let client_time = DateTime::from_timestamp(millis / 1000, 0);

        tracing::info!(x_timestamp = raw, converted = ?client_time, "received X-Timestamp");

        let client_time = client_time.ok_or(TransferError::Rejected)?;

        let diff = self.clock.now() - client_time;
        let skew = if diff < Duration::zero() { -diff } else { diff };

        if skew <= self.tolerance {
            Ok(client_time)
        } else {
            tracing::debug!(skew_ms = skew.num_milliseconds(), "transfer outside tolerance");
            Err(TransferError::Rejected)
        }
    }
}
