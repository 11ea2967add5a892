//! Resource row model.
//!
//! A resource row is one field worker scheduled for the visible period.
//! Shift and lunch windows arrive as informal 12-hour text exactly as the
//! dispatch feed provides them; they are parsed lazily and a row whose text
//! does not parse simply has no such window.

use serde::{Deserialize, Serialize};

use crate::clock::{parse_clock_time, ClockTime};
use crate::geo::GeoPoint;

/// A scheduled worker for the visible period.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceRow {
    /// Unique row identifier (feeds without `resourceId` use `id`).
    #[serde(alias = "id")]
    pub resource_id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Shift start, e.g. `"6:00 AM"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_start: Option<String>,
    /// Shift end, e.g. `"2:00 PM"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_end: Option<String>,
    /// Lunch start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch_start: Option<String>,
    /// Lunch end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lunch_end: Option<String>,
    /// Home latitude (origin of the first travel leg).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_lat: Option<f64>,
    /// Home longitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_lng: Option<f64>,
    /// Estimated comeback time (epoch ms), attached after layout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ecbt: Option<i64>,
}

impl ResourceRow {
    /// Creates a row with no schedule.
    pub fn new(resource_id: impl Into<String>) -> Self {
        Self {
            resource_id: resource_id.into(),
            ..Default::default()
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the shift text.
    pub fn with_shift(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.shift_start = Some(start.into());
        self.shift_end = Some(end.into());
        self
    }

    /// Sets the lunch text.
    pub fn with_lunch(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.lunch_start = Some(start.into());
        self.lunch_end = Some(end.into());
        self
    }

    /// Sets the home coordinates.
    pub fn with_home(mut self, lat: f64, lng: f64) -> Self {
        self.home_lat = Some(lat);
        self.home_lng = Some(lng);
        self
    }

    /// Parsed shift start/end, `None` unless both parse.
    pub fn shift_times(&self) -> Option<(ClockTime, ClockTime)> {
        parse_pair(self.shift_start.as_deref(), self.shift_end.as_deref())
    }

    /// Parsed lunch start/end, `None` unless both parse.
    pub fn lunch_times(&self) -> Option<(ClockTime, ClockTime)> {
        parse_pair(self.lunch_start.as_deref(), self.lunch_end.as_deref())
    }

    /// Home location, when both coordinates are present.
    pub fn home(&self) -> Option<GeoPoint> {
        GeoPoint::from_parts(self.home_lat, self.home_lng)
    }

    /// Returns a copy carrying the computed ECBT.
    pub fn with_ecbt(mut self, ecbt_ms: i64) -> Self {
        self.ecbt = Some(ecbt_ms);
        self
    }
}

fn parse_pair(start: Option<&str>, end: Option<&str>) -> Option<(ClockTime, ClockTime)> {
    Some((parse_clock_time(start)?, parse_clock_time(end)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_builder() {
        let r = ResourceRow::new("R1")
            .with_name("Alex")
            .with_shift("6:00 AM", "2:00 PM")
            .with_lunch("11:00 AM", "11:30 AM")
            .with_home(51.50, -0.12);

        assert_eq!(r.resource_id, "R1");
        assert_eq!(r.name, "Alex");
        let (start, end) = r.shift_times().unwrap();
        assert_eq!(start.minutes_of_day(), 360);
        assert_eq!(end.minutes_of_day(), 840);
        let (ls, le) = r.lunch_times().unwrap();
        assert_eq!(le.minutes_of_day() - ls.minutes_of_day(), 30);
        assert_eq!(r.home(), Some(GeoPoint::new(51.50, -0.12)));
        assert_eq!(r.ecbt, None);
    }

    #[test]
    fn test_half_specified_shift_is_none() {
        let mut r = ResourceRow::new("R1");
        r.shift_start = Some("6:00 AM".into());
        assert!(r.shift_times().is_none());

        let r = ResourceRow::new("R2").with_shift("6:00 AM", "later");
        assert!(r.shift_times().is_none());
    }

    #[test]
    fn test_deserialize_with_id_alias() {
        let json = r#"{
            "id": "E-17",
            "shiftStart": "10:00 PM",
            "shiftEnd": "6:00 AM",
            "homeLat": 40.7,
            "homeLng": -74.0
        }"#;
        let r: ResourceRow = serde_json::from_str(json).unwrap();
        assert_eq!(r.resource_id, "E-17");
        assert!(r.shift_times().is_some());
        assert!(r.lunch_times().is_none());
        assert!(r.home().is_some());
    }

    #[test]
    fn test_serialize_omits_missing_fields() {
        let r = ResourceRow::new("R1").with_ecbt(42);
        let value = serde_json::to_value(&r).unwrap();
        assert_eq!(value["resourceId"], "R1");
        assert_eq!(value["ecbt"], 42);
        assert!(value.get("shiftStart").is_none());
    }
}
