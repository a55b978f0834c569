//! Review API payload types.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// One homework entry from the `homeworks` list.
///
/// Both fields are optional here; the status parser decides whether a record
/// is usable. A field of the wrong JSON type counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeworkRecord {
    pub name: Option<String>,
    pub status: Option<String>,
}

impl HomeworkRecord {
    pub fn new(name: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            status: Some(status.into()),
        }
    }

    /// Read a record out of one raw list element.
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_owned);
        Self {
            name: text("homework_name"),
            status: text("status"),
        }
    }

    /// Wire form of the record; absent fields become `null`.
    pub fn to_value(&self) -> Value {
        json!({
            "homework_name": self.name,
            "status": self.status,
        })
    }
}

/// Successful (not error-shaped) response of the homework statuses endpoint.
///
/// List elements stay raw JSON so that only the newest one is ever decoded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Most recent submission first
    #[serde(default)]
    pub homeworks: Option<Vec<Value>>,

    /// Server time to use as the next `from_date`
    #[serde(default)]
    pub current_date: Option<i64>,
}

impl ApiResponse {
    pub fn new(homeworks: &[HomeworkRecord], current_date: Option<i64>) -> Self {
        Self {
            homeworks: Some(homeworks.iter().map(HomeworkRecord::to_value).collect()),
            current_date,
        }
    }

    /// The newest homework, if the response carries any.
    ///
    /// A missing `homeworks` key and an empty list both mean "no update".
    pub fn newest(&self) -> Option<HomeworkRecord> {
        self.homeworks
            .as_deref()
            .and_then(<[_]>::first)
            .map(HomeworkRecord::from_value)
    }
}
