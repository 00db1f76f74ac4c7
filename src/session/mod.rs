// Workout sessions: data model, persistence, builder and template catalog

pub mod builder;
pub mod library;
pub mod store;
pub mod templates;
pub mod types;

pub use builder::{ExerciseForm, SessionBuilder};
pub use library::SessionLibrary;
pub use store::{STORAGE_FILE_NAME, SessionStore, StoreError};
pub use templates::{ExerciseTemplate, TEMPLATE_CATEGORIES, templates_for};
pub use types::{EntityId, Exercise, Session, format_clock, generate_id};

/// Session validation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Session has no exercises")]
    NoExercises,

    #[error("Exercise {0} must have at least one set")]
    NoSets(String),

    #[error("Exercise {0} must have a work duration of at least one second")]
    NoWorkDuration(String),
}

/// Check that a session can be played back
/// Every exercise needs at least one set and a non-zero work duration;
/// rest may be zero.
pub fn validate_session(session: &Session) -> Result<(), SessionError> {
    if session.exercises.is_empty() {
        return Err(SessionError::NoExercises);
    }

    for exercise in &session.exercises {
        if exercise.sets == 0 {
            return Err(SessionError::NoSets(exercise.name.clone()));
        }
        if exercise.work_duration == 0 {
            return Err(SessionError::NoWorkDuration(exercise.name.clone()));
        }
    }

    Ok(())
}
