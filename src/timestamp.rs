//! `point_in_time`: UTC timestamp parsing and its u32-seconds wire encoding.

use byteorder::{ByteOrder, LittleEndian};
use chrono::NaiveDateTime;

use crate::error::GrapheneError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parses `YYYY-MM-DDTHH:MM:SS` as UTC (no timezone offset accepted beyond
/// the literal `Z`-less form) and returns seconds since the Unix epoch.
///
/// Fails if the string doesn't match the pattern, or if the computed epoch
/// seconds don't fit in a `u32` (values beyond 2^32 - 1, i.e. year 2106).
pub fn parse_point_in_time(s: &str) -> Result<u32, GrapheneError> {
    let naive =
        NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT).map_err(|_| GrapheneError::BadTimestamp)?;
    let secs = naive.and_utc().timestamp();
    u32::try_from(secs).map_err(|_| GrapheneError::BadTimestamp)
}

/// Encodes already-parsed epoch seconds as a little-endian u32 (the wire
/// form of `point_in_time`).
#[inline]
pub fn encode_point_in_time(epoch_seconds: u32) -> [u8; 4] {
    let mut buf = [0u8; 4];
    LittleEndian::write_u32(&mut buf, epoch_seconds);
    buf
}

/// Parses and encodes in one step, as used by [`crate::value::Value::PointInTime`].
pub fn point_in_time_bytes(s: &str) -> Result<[u8; 4], GrapheneError> {
    Ok(encode_point_in_time(parse_point_in_time(s)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_zero() {
        assert_eq!(point_in_time_bytes("1970-01-01T00:00:00").unwrap(), [0, 0, 0, 0]);
    }

    #[test]
    fn known_value() {
        // 2016-01-01T00:00:00 UTC = 1451606400
        let bytes = point_in_time_bytes("2016-01-01T00:00:00").unwrap();
        assert_eq!(LittleEndian::read_u32(&bytes), 1_451_606_400);
    }

    #[test]
    fn rejects_malformed_strings() {
        assert_eq!(
            parse_point_in_time("2016-01-01 00:00:00"),
            Err(GrapheneError::BadTimestamp)
        );
        assert_eq!(
            parse_point_in_time("2016-01-01T00:00:00Z"),
            Err(GrapheneError::BadTimestamp)
        );
        assert_eq!(parse_point_in_time("not a timestamp"), Err(GrapheneError::BadTimestamp));
    }
}
