//! Request and response types for the Ambient channel API

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Records
// =============================================================================

/// A stored channel record as returned by the service.
///
/// Records are open JSON objects: whatever fields the writer sent, plus
/// service-assigned fields such as `created`.
pub type Record = Map<String, Value>;

// =============================================================================
// Data Points
// =============================================================================

/// A single measurement destined for one channel record.
///
/// A data point is an open set of named fields (`d1`..`d8`, `lat`, `lng`,
/// `comment`, ...) with JSON-compatible values. The optional `created`
/// field carries the measurement time; when absent the service stamps the
/// record with its arrival time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataPoint {
    fields: Map<String, Value>,
}

impl DataPoint {
    /// Create an empty data point; the service assigns the record time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a data point stamped with `t`.
    ///
    /// `created` is sent as epoch milliseconds with whole-second
    /// precision; sub-second parts of `t` are discarded.
    pub fn created_at<Tz: TimeZone>(t: DateTime<Tz>) -> Self {
        let mut fields = Map::new();
        fields.insert("created".to_string(), Value::from(t.timestamp() * 1000));
        Self { fields }
    }

    /// Set a named field, returning the point for chaining.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Get a field value, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Whether the point carries no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// POST body for the bulk-write endpoint.
#[derive(Debug, Serialize)]
pub(crate) struct SendBody<'a> {
    #[serde(rename = "writeKey")]
    pub write_key: &'a str,
    pub data: &'a [DataPoint],
}

// =============================================================================
// Read Queries
// =============================================================================

/// Query modifiers for [`read_with`](crate::AmbientClient::read_with).
///
/// Modifiers accumulate in call order and are forwarded to the service
/// as-is: repeating a modifier sends the parameter twice, and combining
/// `date` with `range` sends both. The service decides what wins.
#[derive(Debug, Clone, Default)]
pub struct ReadQuery {
    params: Vec<(&'static str, String)>,
}

impl ReadQuery {
    /// Create an empty query (service defaults apply).
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict results to one calendar day.
    pub fn date(mut self, date: NaiveDate) -> Self {
        self.params.push(("date", date.format("%Y-%m-%d").to_string()));
        self
    }

    /// Restrict results to the window from `start` to `end`.
    pub fn range(mut self, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        self.params
            .push(("start", start.format("%Y-%m-%d %H:%M:%S").to_string()));
        self.params
            .push(("end", end.format("%Y-%m-%d %H:%M:%S").to_string()));
        self
    }

    /// Cap the number of returned records.
    pub fn count(mut self, n: u32) -> Self {
        self.params.push(("n", n.to_string()));
        self
    }

    /// Skip the `skip` most recent records before the cap applies.
    pub fn skip(mut self, skip: u32) -> Self {
        self.params.push(("skip", skip.to_string()));
        self
    }

    pub(crate) fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn created_is_whole_second_epoch_millis() {
        let t = Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap();
        let point = DataPoint::created_at(t);
        assert_eq!(
            point.get("created"),
            Some(&Value::from(1_700_000_000_000_i64))
        );
    }

    #[test]
    fn created_discards_subsecond_precision() {
        let t = Utc.timestamp_opt(1_700_000_000, 999_000_000).unwrap();
        let point = DataPoint::created_at(t);
        assert_eq!(
            point.get("created"),
            Some(&Value::from(1_700_000_000_000_i64))
        );
    }

    #[test]
    fn new_point_has_no_timestamp() {
        let point = DataPoint::new().field("d1", 3.14);
        assert_eq!(point.get("created"), None);
    }

    #[test]
    fn fields_serialize_flat() {
        let t = Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap();
        let point = DataPoint::created_at(t)
            .field("d1", 3.14)
            .field("comment", "calibrated");
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "created": 1_700_000_000_000_i64,
                "d1": 3.14,
                "comment": "calibrated",
            })
        );
    }

    #[test]
    fn send_body_renames_write_key() {
        let points = vec![DataPoint::new().field("d1", 1)];
        let body = SendBody {
            write_key: "wk",
            data: &points,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "writeKey": "wk",
                "data": [{"d1": 1}],
            })
        );
    }

    #[test]
    fn date_and_range_use_service_formats() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        let start = day.and_hms_opt(9, 0, 0).unwrap();
        let end = day.and_hms_opt(17, 30, 5).unwrap();
        let query = ReadQuery::new().date(day).range(start, end);
        let expected = vec![
            ("date", "2024-03-07".to_string()),
            ("start", "2024-03-07 09:00:00".to_string()),
            ("end", "2024-03-07 17:30:05".to_string()),
        ];
        assert_eq!(query.params(), expected.as_slice());
    }

    #[test]
    fn query_keeps_call_order_and_duplicates() {
        let query = ReadQuery::new().count(10).skip(5).count(20);
        let expected = vec![
            ("n", "10".to_string()),
            ("skip", "5".to_string()),
            ("n", "20".to_string()),
        ];
        assert_eq!(query.params(), expected.as_slice());
    }
}
