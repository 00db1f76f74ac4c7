// Types for workout sessions
// Sessions embed their exercises in full; JSON field names are camelCase
// (`workDuration`, `imageUrl`) to stay compatible with existing session files.

use serde::{Deserialize, Serialize};

/// Opaque unique identifier for sessions and exercises
pub type EntityId = String;

/// Generate a fresh collision-resistant identifier (UUID v4, simple form)
pub fn generate_id() -> EntityId {
    uuid::Uuid::new_v4().simple().to_string()
}

/// Format seconds as `MM:SS`
/// Minutes are zero-padded to two digits and may exceed 59.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// One movement definition with set count and work/rest durations
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: EntityId,
    pub name: String,
    /// Free-text equipment tag ("Kettlebell", "Dumbbell", ...)
    #[serde(default)]
    pub equipment: String,
    /// Number of sets (>= 1)
    pub sets: u32,
    /// Work duration per set in seconds (>= 1)
    pub work_duration: u32,
    /// Rest duration between sets in seconds (may be 0)
    pub rest_duration: u32,
    /// Illustrative image reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Exercise {
    /// Create an exercise with a fresh id and no image
    pub fn new(
        name: impl Into<String>,
        equipment: impl Into<String>,
        sets: u32,
        work_duration: u32,
        rest_duration: u32,
    ) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            equipment: equipment.into(),
            sets,
            work_duration,
            rest_duration,
            image_url: None,
        }
    }

    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Total time of this exercise: every work set plus the rests between them
    /// Saturates instead of overflowing on oversized stored values.
    pub fn total_seconds(&self) -> u32 {
        let work = self.sets.saturating_mul(self.work_duration);
        let rest = self.sets.saturating_sub(1).saturating_mul(self.rest_duration);
        work.saturating_add(rest)
    }
}

/// A named, ordered collection of exercises performed as one workout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub id: EntityId,
    pub name: String,
    pub exercises: Vec<Exercise>,
}

impl Session {
    /// Create a session with a fresh id
    pub fn new(name: impl Into<String>, exercises: Vec<Exercise>) -> Self {
        Self {
            id: generate_id(),
            name: name.into(),
            exercises,
        }
    }

    /// Sum of sets across all exercises
    pub fn total_sets(&self) -> u32 {
        self.exercises
            .iter()
            .fold(0u32, |total, ex| total.saturating_add(ex.sets))
    }

    /// Estimated workout duration shown on the session card
    pub fn estimated_seconds(&self) -> u32 {
        self.exercises
            .iter()
            .fold(0u32, |total, ex| total.saturating_add(ex.total_seconds()))
    }

    /// "1 exercise" / "3 exercises"
    pub fn exercise_count_label(&self) -> String {
        let count = self.exercises.len();
        format!("{} exercise{}", count, if count == 1 { "" } else { "s" })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_unique() {
        let a = generate_id();
        let b = generate_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 32);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(9), "00:09");
        assert_eq!(format_clock(75), "01:15");
        assert_eq!(format_clock(3600), "60:00");
    }

    #[test]
    fn test_exercise_total_seconds() {
        let ex = Exercise::new("Kettlebell Swing", "Kettlebell", 4, 30, 20);
        // 4 * 30 work + 3 * 20 rest
        assert_eq!(ex.total_seconds(), 180);

        let single = Exercise::new("Plank", "", 1, 45, 15);
        assert_eq!(single.total_seconds(), 45);
    }

    #[test]
    fn test_session_totals() {
        let session = Session::new(
            "Legs",
            vec![
                Exercise::new("Squat", "Dumbbell", 2, 30, 10),
                Exercise::new("Lunge", "Dumbbell", 1, 20, 0),
            ],
        );
        assert_eq!(session.total_sets(), 3);
        assert_eq!(session.estimated_seconds(), 70 + 20);
        assert_eq!(session.exercise_count_label(), "2 exercises");
    }

    #[test]
    fn test_json_field_names() {
        let ex = Exercise::new("Goblet Squat", "Kettlebell", 3, 40, 20).with_image("http://img");
        let json = serde_json::to_string(&ex).unwrap();
        assert!(json.contains("\"workDuration\":40"));
        assert!(json.contains("\"restDuration\":20"));
        assert!(json.contains("\"imageUrl\":\"http://img\""));
    }

    #[test]
    fn test_deserialize_record_without_optional_fields() {
        // Custom exercises carry neither equipment nor image
        let json = r#"{"id":"abc","name":"Push Up","sets":3,"workDuration":30,"restDuration":15}"#;
        let ex: Exercise = serde_json::from_str(json).unwrap();
        assert_eq!(ex.equipment, "");
        assert_eq!(ex.image_url, None);
        assert_eq!(ex.sets, 3);
    }

    #[test]
    fn test_oversized_values_saturate() {
        let json = r#"[{"id":"a","name":"Long","exercises":[
            {"id":"e","name":"Hold","sets":70000,"workDuration":70000,"restDuration":70000},
            {"id":"f","name":"Hold","sets":4294967295,"workDuration":1,"restDuration":0}
        ]}]"#;
        let sessions: Vec<Session> = serde_json::from_str(json).unwrap();
        let session = &sessions[0];

        assert_eq!(session.exercises[0].total_seconds(), u32::MAX);
        assert_eq!(session.estimated_seconds(), u32::MAX);
        assert_eq!(session.total_sets(), u32::MAX);
    }
}
