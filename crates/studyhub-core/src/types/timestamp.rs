// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::Duration;
use chrono::NaiveDateTime;
use chrono::SubsecRound;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::types::date::Date;

const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// A UTC timestamp without a timezone and millisecond precision.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(NaiveDateTime);

impl Timestamp {
    pub fn new(ndt: NaiveDateTime) -> Self {
        Self(ndt.trunc_subsecs(3))
    }

    /// Converts a timestamp into a `NaiveDateTime`.
    pub fn into_inner(self) -> NaiveDateTime {
        self.0
    }

    /// The current timestamp in UTC.
    #[cfg(feature = "clock")]
    pub fn now() -> Self {
        Self(chrono::Utc::now().naive_utc().trunc_subsecs(3))
    }

    /// The date component of this timestamp.
    pub fn date(self) -> Date {
        Date::new(self.0.date())
    }

    /// This timestamp moved forward by a whole number of days. Saturates at
    /// the largest representable timestamp.
    pub fn plus_days(self, days: u32) -> Self {
        match self.0.checked_add_signed(Duration::days(i64::from(days))) {
            Some(ndt) => Self(ndt),
            None => Self(NaiveDateTime::MAX.trunc_subsecs(3)),
        }
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(FORMAT))
    }
}

impl TryFrom<String> for Timestamp {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let ndt = NaiveDateTime::parse_from_str(&value, FORMAT)
            .map_err(|_| ErrorReport::new(format!("Failed to parse timestamp: '{value}'.")))?;
        Ok(Timestamp::new(ndt))
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> String {
        ts.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::try_from(s.to_string()).unwrap()
    }

    #[test]
    fn test_timestamp_to_string() {
        assert_eq!(
            ts("2023-10-05T14:30:15.123").to_string(),
            "2023-10-05T14:30:15.123"
        );
    }

    #[test]
    fn test_try_from_invalid_string() {
        assert!(Timestamp::try_from("2023-10-05 14:30".to_string()).is_err());
    }

    #[test]
    fn test_serde() {
        let serialized = serde_json::to_string(&ts("2023-10-05T14:30:15.123")).unwrap();
        assert_eq!(serialized, "\"2023-10-05T14:30:15.123\"");
        let deserialized: Timestamp = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, ts("2023-10-05T14:30:15.123"));
    }

    #[test]
    fn test_plus_days_crosses_month() {
        assert_eq!(
            ts("2024-01-28T09:00:00.000").plus_days(6),
            ts("2024-02-03T09:00:00.000")
        );
    }

    #[test]
    fn test_plus_days_saturates() {
        let far = ts("2024-01-01T00:00:00.000").plus_days(u32::MAX);
        assert!(far > ts("9999-12-31T23:59:59.999"));
    }

    #[test]
    fn test_ordering() {
        assert!(ts("2024-01-01T00:00:00.000") < ts("2024-01-01T00:00:00.001"));
    }
}
