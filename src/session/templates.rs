// Exercise template catalog
// Static blueprints the builder copies into new exercises.

use crate::session::types::Exercise;

/// Predefined exercise blueprint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseTemplate {
    pub name: &'static str,
    pub equipment: &'static str,
    pub sets: u32,
    pub work_duration: u32,
    pub rest_duration: u32,
    /// Pexels photo id used to build the image URL
    pub photo_id: u32,
}

impl ExerciseTemplate {
    const fn new(
        name: &'static str,
        equipment: &'static str,
        sets: u32,
        work_duration: u32,
        rest_duration: u32,
        photo_id: u32,
    ) -> Self {
        Self {
            name,
            equipment,
            sets,
            work_duration,
            rest_duration,
            photo_id,
        }
    }

    pub fn image_url(&self) -> String {
        format!(
            "https://images.pexels.com/photos/{id}/pexels-photo-{id}.jpeg?auto=compress&cs=tinysrgb&w=600",
            id = self.photo_id
        )
    }

    /// Instantiate as a new exercise with a fresh id
    pub fn to_exercise(&self) -> Exercise {
        Exercise::new(
            self.name,
            self.equipment,
            self.sets,
            self.work_duration,
            self.rest_duration,
        )
        .with_image(self.image_url())
    }
}

/// Category names in display order
pub const TEMPLATE_CATEGORIES: [&str; 4] = ["Glutes", "Quads", "Hamstrings", "Inner Thighs"];

const GLUTES: &[ExerciseTemplate] = &[
    ExerciseTemplate::new("Kettlebell Swing", "Kettlebell", 4, 30, 20, 2417488),
    ExerciseTemplate::new("Goblet Squat", "Kettlebell", 3, 40, 20, 6539865),
    ExerciseTemplate::new("Dumbbell Hip Thrust", "Dumbbell", 4, 35, 20, 2774181),
    ExerciseTemplate::new("Dumbbell Glute Bridge", "Dumbbell", 3, 35, 15, 416778),
    ExerciseTemplate::new("Kettlebell Single Leg Deadlift", "Kettlebell", 3, 30, 20, 416809),
    ExerciseTemplate::new("Dumbbell Step-Up", "Dumbbell", 3, 30, 15, 4853325),
];

const QUADS: &[ExerciseTemplate] = &[
    ExerciseTemplate::new("Dumbbell Front Squat", "Dumbbell", 4, 35, 20, 4662333),
    ExerciseTemplate::new("Kettlebell Front Rack Squat", "Kettlebell", 3, 35, 20, 4720230),
    ExerciseTemplate::new("Dumbbell Bulgarian Split Squat", "Dumbbell", 3, 30, 20, 7690849),
    ExerciseTemplate::new("Dumbbell Walking Lunge", "Dumbbell", 3, 40, 20, 2011384),
    ExerciseTemplate::new("Kettlebell Goblet Pulse Squat", "Kettlebell", 3, 30, 15, 5163854),
    ExerciseTemplate::new("Dumbbell Reverse Lunge", "Dumbbell", 3, 30, 15, 14604685),
];

const HAMSTRINGS: &[ExerciseTemplate] = &[
    ExerciseTemplate::new("Dumbbell Romanian Deadlift", "Dumbbell", 4, 35, 20, 13822300),
    ExerciseTemplate::new("Kettlebell Deadlift", "Kettlebell", 4, 35, 20, 14623670),
    ExerciseTemplate::new("Dumbbell Stiff-Leg Deadlift", "Dumbbell", 3, 30, 20, 4944313),
    ExerciseTemplate::new("Kettlebell Good Morning", "Kettlebell", 3, 30, 15, 4164849),
    ExerciseTemplate::new("Dumbbell Single Leg Romanian Deadlift", "Dumbbell", 3, 30, 20, 2247179),
];

const INNER_THIGHS: &[ExerciseTemplate] = &[
    ExerciseTemplate::new("Dumbbell Sumo Squat", "Dumbbell", 4, 35, 20, 6551104),
    ExerciseTemplate::new("Kettlebell Sumo Deadlift", "Kettlebell", 3, 35, 20, 20379171),
    ExerciseTemplate::new("Dumbbell Cossack Squat", "Dumbbell", 3, 30, 20, 17898139),
    ExerciseTemplate::new("Kettlebell Lateral Lunge", "Kettlebell", 3, 30, 15, 14591541),
    ExerciseTemplate::new("Dumbbell Sumo Squat Pulse", "Dumbbell", 3, 25, 15, 16952731),
    ExerciseTemplate::new("Dumbbell Curtsy Lunge", "Dumbbell", 3, 30, 15, 18812272),
];

/// Look up the blueprints of a category
/// Unknown categories yield an empty slice.
pub fn templates_for(category: &str) -> &'static [ExerciseTemplate] {
    match category {
        "Glutes" => GLUTES,
        "Quads" => QUADS,
        "Hamstrings" => HAMSTRINGS,
        "Inner Thighs" => INNER_THIGHS,
        _ => &[],
    }
}
