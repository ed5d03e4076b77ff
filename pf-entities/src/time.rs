use std::fmt;

use time::{format_description::well_known::Rfc3339, OffsetDateTime};

/// Unix timestamp with millisecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn now() -> Self {
        OffsetDateTime::now_utc().into()
    }

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(from: OffsetDateTime) -> Self {
        Self((from.unix_timestamp_nanos() / 1_000_000) as i64)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        let date_time = OffsetDateTime::from_unix_timestamp_nanos(i128::from(self.0) * 1_000_000)
            .map_err(|_| fmt::Error)?;
        let formatted = date_time.format(&Rfc3339).map_err(|_| fmt::Error)?;
        f.write_str(&formatted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millis_round_trip() {
        let ts = Timestamp::from_millis(1_724_918_400_123);
        assert_eq!(1_724_918_400_123, ts.as_millis());
    }

    #[test]
    fn display_is_rfc3339() {
        let ts = Timestamp::from_millis(0);
        assert_eq!("1970-01-01T00:00:00Z", ts.to_string());
    }
}
