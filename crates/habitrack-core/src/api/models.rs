//! Wire types for the habit tracker API.

use serde::{Deserialize, Deserializer, Serialize};

/// Accepts ids sent either as JSON strings or numbers.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Str(String),
        Int(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Str(s) => s,
        Raw::Int(n) => n.to_string(),
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub points: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub user_id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitStatus {
    #[serde(deserialize_with = "string_or_number")]
    pub habit_id: String,
    pub habit_name: String,
    #[serde(default)]
    pub is_done: bool,
}

/// One user's completion statuses for one calendar day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTrack {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub user_id: String,
    #[serde(default)]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub habit_statuses: Vec<HabitStatus>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignUpRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignUpResponse {
    pub user: User,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterHabitRequest<'a> {
    /// The server assigns ids; registration always sends `"0"`.
    pub id: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterHabitResponse {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarkDoneRequest<'a> {
    pub date: &'a str,
    pub habit_id: &'a str,
}

/// Body of endpoints that only acknowledge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_null_statuses_read_as_empty() {
        let track: DailyTrack = serde_json::from_value(json!({
            "id": "t1",
            "user_id": "u1",
            "date": "2025-01-02",
            "habit_statuses": null
        }))
        .unwrap();
        assert!(track.habit_statuses.is_empty());
    }

    #[test]
    fn test_numeric_ids_are_accepted() {
        let habit: Habit =
            serde_json::from_value(json!({"id": 1, "user_id": 7, "name": "Read"})).unwrap();
        assert_eq!(habit.id, "1");
        assert_eq!(habit.user_id, "7");
    }

    #[test]
    fn test_register_request_shape() {
        let body = serde_json::to_value(RegisterHabitRequest {
            id: "0",
            name: "Run",
        })
        .unwrap();
        assert_eq!(body, json!({"id": "0", "name": "Run"}));
    }
}
