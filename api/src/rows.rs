use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use serde_repr::{Deserialize_repr, Serialize_repr};

/// Identifies one route. The backend treats these as opaque strings.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RouteID(pub String);

impl fmt::Display for RouteID {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The server's verdict on one schedule type at the queried location. Only
/// the server evaluates frequency; these arrive as integers and anything
/// outside 0-2 fails the decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum ScheduleFlag {
    NoTrips = 0,
    BelowFrequency = 1,
    MeetsFrequency = 2,
}

/// One row of /api/schedule/nearby: a (route, optional branch) pair with a
/// flag per schedule type, in the backend's column order. Older servers
/// sent each row as a bare positional array; both forms decode.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteRow {
    pub route_id: RouteID,
    pub branch_letter: Option<String>,
    pub reduced: ScheduleFlag,
    pub holiday: ScheduleFlag,
    pub saturday: ScheduleFlag,
    pub sunday: ScheduleFlag,
    pub weekday: ScheduleFlag,
    pub first_run_seconds: Option<i64>,
    pub last_run_seconds: Option<i64>,
    pub total_trips: Option<usize>,
    pub most_frequent_minutes: Option<f64>,
    pub least_frequent_minutes: Option<f64>,
}

impl RouteRow {
    /// Routes without branches display as "Main".
    pub fn branch_label(&self) -> &str {
        self.branch_letter.as_deref().unwrap_or("Main")
    }

    /// The five flags with their display names, in the canonical order.
    pub fn flags(&self) -> [(&'static str, ScheduleFlag); 5] {
        [
            ("Reduced", self.reduced),
            ("Holiday", self.holiday),
            ("Saturday", self.saturday),
            ("Sunday", self.sunday),
            ("Weekday", self.weekday),
        ]
    }
}

// The named wire form. Aliases cover the field spellings different server
// revisions have used.
#[derive(Deserialize)]
struct NamedRow {
    #[serde(alias = "route")]
    route_id: String,
    #[serde(default, alias = "branch")]
    branch_letter: Option<String>,
    #[serde(alias = "Reduced")]
    reduced: ScheduleFlag,
    #[serde(alias = "Holiday")]
    holiday: ScheduleFlag,
    #[serde(alias = "Saturday")]
    saturday: ScheduleFlag,
    #[serde(alias = "Sunday")]
    sunday: ScheduleFlag,
    #[serde(alias = "Weekday")]
    weekday: ScheduleFlag,
    #[serde(default)]
    first_run_seconds: Option<i64>,
    #[serde(default)]
    last_run_seconds: Option<i64>,
    #[serde(default)]
    total_trips: Option<usize>,
    #[serde(default)]
    most_frequent_minutes: Option<f64>,
    #[serde(default)]
    least_frequent_minutes: Option<f64>,
}

impl<'de> Deserialize<'de> for RouteRow {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let raw = Value::deserialize(d)?;
        match raw {
            Value::Object(_) => {
                let row: NamedRow = serde_json::from_value(raw).map_err(D::Error::custom)?;
                Ok(Self {
                    route_id: RouteID(row.route_id),
                    branch_letter: row.branch_letter.filter(|b| !b.is_empty()),
                    reduced: row.reduced,
                    holiday: row.holiday,
                    saturday: row.saturday,
                    sunday: row.sunday,
                    weekday: row.weekday,
                    first_run_seconds: row.first_run_seconds,
                    last_run_seconds: row.last_run_seconds,
                    total_trips: row.total_trips,
                    most_frequent_minutes: row.most_frequent_minutes,
                    least_frequent_minutes: row.least_frequent_minutes,
                })
            }
            Value::Array(items) => from_positional(items).map_err(D::Error::custom),
            _ => Err(D::Error::custom(
                "expected an object or an array for a schedule row",
            )),
        }
    }
}

// The legacy wire form: SQL columns in order, no field names. The five
// flags are mandatory; the trailing stats may be truncated.
fn from_positional(items: Vec<Value>) -> Result<RouteRow, String> {
    if !(7..=12).contains(&items.len()) {
        return Err(format!(
            "positional row has {} elements, expected 7 to 12",
            items.len()
        ));
    }

    let route_id = match &items[0] {
        Value::String(x) => RouteID(x.clone()),
        other => return Err(format!("route_id should be a string, got {other}")),
    };
    let branch_letter = match &items[1] {
        Value::Null => None,
        Value::String(x) if x.is_empty() => None,
        Value::String(x) => Some(x.clone()),
        other => return Err(format!("branch_letter should be a string or null, got {other}")),
    };

    let mut flags = [ScheduleFlag::NoTrips; 5];
    for (idx, flag) in flags.iter_mut().enumerate() {
        *flag = serde_json::from_value(items[2 + idx].clone())
            .map_err(|err| format!("flag {} of {}: {}", idx, route_id, err))?;
    }

    Ok(RouteRow {
        route_id,
        branch_letter,
        reduced: flags[0],
        holiday: flags[1],
        saturday: flags[2],
        sunday: flags[3],
        weekday: flags[4],
        first_run_seconds: trailing(&items, 7)?,
        last_run_seconds: trailing(&items, 8)?,
        total_trips: trailing(&items, 9)?,
        most_frequent_minutes: trailing(&items, 10)?,
        least_frequent_minutes: trailing(&items, 11)?,
    })
}

fn trailing<T: serde::de::DeserializeOwned>(items: &[Value], idx: usize) -> Result<Option<T>, String> {
    match items.get(idx) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_json::from_value(value.clone())
            .map(Some)
            .map_err(|err| format!("element {idx}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(raw: &str) -> serde_json::Result<RouteRow> {
        serde_json::from_str(raw)
    }

    #[test]
    fn test_decode_named_row() {
        let row = decode(
            r#"{
                "route_id": "21",
                "branch_letter": "A",
                "reduced": 0,
                "holiday": 1,
                "saturday": 2,
                "sunday": 1,
                "weekday": 2,
                "first_run_seconds": 18000,
                "last_run_seconds": 93240,
                "total_trips": 120,
                "most_frequent_minutes": 8.5,
                "least_frequent_minutes": 30.0
            }"#,
        )
        .unwrap();

        assert_eq!(row.route_id, RouteID("21".to_string()));
        assert_eq!(row.branch_letter, Some("A".to_string()));
        assert_eq!(row.reduced, ScheduleFlag::NoTrips);
        assert_eq!(row.holiday, ScheduleFlag::BelowFrequency);
        assert_eq!(row.saturday, ScheduleFlag::MeetsFrequency);
        assert_eq!(row.first_run_seconds, Some(18000));
        assert_eq!(row.total_trips, Some(120));
        assert_eq!(row.most_frequent_minutes, Some(8.5));
    }

    #[test]
    fn test_decode_positional_row() {
        let full = decode(r#"["21", "A", 0, 1, 2, 1, 2, 18000, 93240, 120, 8.5, 30.0]"#).unwrap();
        let named = decode(
            r#"{
                "route_id": "21",
                "branch_letter": "A",
                "reduced": 0,
                "holiday": 1,
                "saturday": 2,
                "sunday": 1,
                "weekday": 2,
                "first_run_seconds": 18000,
                "last_run_seconds": 93240,
                "total_trips": 120,
                "most_frequent_minutes": 8.5,
                "least_frequent_minutes": 30.0
            }"#,
        )
        .unwrap();
        assert_eq!(full, named);

        // Old servers truncate the stats columns
        let minimal = decode(r#"["5", null, 2, 2, 2, 2, 2]"#).unwrap();
        assert_eq!(minimal.route_id, RouteID("5".to_string()));
        assert_eq!(minimal.branch_letter, None);
        assert_eq!(minimal.first_run_seconds, None);
        assert_eq!(minimal.total_trips, None);
    }

    #[test]
    fn test_field_aliases() {
        let row = decode(
            r#"{
                "route": "63",
                "branch": "",
                "Reduced": 1,
                "Holiday": 0,
                "Saturday": 0,
                "Sunday": 0,
                "Weekday": 2
            }"#,
        )
        .unwrap();
        assert_eq!(row.route_id, RouteID("63".to_string()));
        // Empty string means no branch
        assert_eq!(row.branch_letter, None);
        assert_eq!(row.branch_label(), "Main");
        assert_eq!(row.weekday, ScheduleFlag::MeetsFrequency);
    }

    #[test]
    fn test_reject_unknown_flag_values() {
        assert!(decode(r#"["21", null, 3, 0, 0, 0, 0]"#).is_err());
        assert!(decode(
            r#"{
                "route_id": "21",
                "reduced": -1,
                "holiday": 0,
                "saturday": 0,
                "sunday": 0,
                "weekday": 0
            }"#
        )
        .is_err());
        assert!(decode(r#""just a string""#).is_err());
    }

    #[test]
    fn test_reject_wrong_arity() {
        assert!(decode(r#"["21", null, 0, 1]"#).is_err());
        assert!(decode(r#"["21", null, 0, 1, 2, 1, 2, 1, 2, 3, 4, 5, 6, 7]"#).is_err());
    }

    #[test]
    fn test_flags_order() {
        let row = decode(r#"["94", "B", 0, 1, 2, 0, 1]"#).unwrap();
        let names: Vec<&str> = row.flags().iter().map(|(name, _)| *name).collect();
        assert_eq!(names, vec!["Reduced", "Holiday", "Saturday", "Sunday", "Weekday"]);
        assert_eq!(row.flags()[2].1, ScheduleFlag::MeetsFrequency);
    }
}
