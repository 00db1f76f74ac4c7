// Session builder - draft editing for a new or existing session
// Invalid input never raises: the blocked action simply does nothing.

use crate::session::templates::ExerciseTemplate;
use crate::session::types::{EntityId, Exercise, Session, generate_id};

/// Form fields for one exercise
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseForm {
    pub name: String,
    pub sets: u32,
    pub work_duration: u32,
    pub rest_duration: u32,
}

impl Default for ExerciseForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            sets: 3,
            work_duration: 30,
            rest_duration: 15,
        }
    }
}

impl ExerciseForm {
    fn from_exercise(exercise: &Exercise) -> Self {
        Self {
            name: exercise.name.clone(),
            sets: exercise.sets,
            work_duration: exercise.work_duration,
            rest_duration: exercise.rest_duration,
        }
    }

    /// Trimmed name, or None when blank
    fn valid_name(&self) -> Option<&str> {
        let name = self.name.trim();
        (!name.is_empty()).then_some(name)
    }

    /// Can this form be committed?
    pub fn is_valid(&self) -> bool {
        self.valid_name().is_some()
    }

    /// (sets, work, rest) clamped to their minimums
    fn clamped_numbers(&self) -> (u32, u32, u32) {
        (self.sets.max(1), self.work_duration.max(1), self.rest_duration)
    }
}

/// Draft of a session being created or edited
#[derive(Debug, Clone, Default)]
pub struct SessionBuilder {
    /// Id of the session being edited, None for a new one
    existing_id: Option<EntityId>,
    pub name: String,
    exercises: Vec<Exercise>,
    /// Custom exercise form
    pub form: ExerciseForm,
    /// Exercise currently edited inline and its form
    editing: Option<(EntityId, ExerciseForm)>,
}

impl SessionBuilder {
    /// Start a new, empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing an existing session
    pub fn edit(session: &Session) -> Self {
        Self {
            existing_id: Some(session.id.clone()),
            name: session.name.clone(),
            exercises: session.exercises.clone(),
            ..Self::default()
        }
    }

    pub fn is_editing_existing(&self) -> bool {
        self.existing_id.is_some()
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    /// Add an exercise from the custom form
    /// Returns false (and changes nothing) when the name is blank.
    pub fn add_exercise(&mut self) -> bool {
        let Some(name) = self.form.valid_name() else {
            return false;
        };
        let (sets, work, rest) = self.form.clamped_numbers();
        self.exercises.push(Exercise::new(name, "", sets, work, rest));
        self.form = ExerciseForm::default();
        true
    }

    /// Append a copy of a template with a fresh id
    pub fn add_from_template(&mut self, template: &ExerciseTemplate) {
        self.exercises.push(template.to_exercise());
    }

    pub fn remove_exercise(&mut self, id: &str) {
        self.exercises.retain(|ex| ex.id != id);
        if self.editing_id() == Some(id) {
            self.editing = None;
        }
    }

    /// Begin inline editing of one exercise, replacing any edit in progress
    pub fn start_edit(&mut self, id: &str) -> bool {
        match self.exercises.iter().find(|ex| ex.id == id) {
            Some(exercise) => {
                self.editing = Some((exercise.id.clone(), ExerciseForm::from_exercise(exercise)));
                true
            }
            None => false,
        }
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_ref().map(|(id, _)| id.as_str())
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut ExerciseForm> {
        self.editing.as_mut().map(|(_, form)| form)
    }

    /// Commit the inline edit
    /// The edited exercise keeps its id, equipment and image. Inert with a blank name.
    pub fn save_edit(&mut self) -> bool {
        let Some((id, form)) = &self.editing else {
            return false;
        };
        let Some(name) = form.valid_name() else {
            return false;
        };
        let (sets, work, rest) = form.clamped_numbers();

        if let Some(exercise) = self.exercises.iter_mut().find(|ex| &ex.id == id) {
            exercise.name = name.to_string();
            exercise.sets = sets;
            exercise.work_duration = work;
            exercise.rest_duration = rest;
        }
        self.editing = None;
        true
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// A session needs a name and at least one exercise
    pub fn can_save(&self) -> bool {
        !self.name.trim().is_empty() && !self.exercises.is_empty()
    }

    /// Produce the finished session, or None while it cannot be saved
    pub fn build(&self) -> Option<Session> {
        if !self.can_save() {
            return None;
        }
        Some(Session {
            id: self.existing_id.clone().unwrap_or_else(generate_id),
            name: self.name.trim().to_string(),
            exercises: self.exercises.clone(),
        })
    }
}
