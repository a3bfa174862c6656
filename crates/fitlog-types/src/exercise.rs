//! Exercise records

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A stored exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: Uuid,
    pub name: String,
    pub exercise_type: String,
}

/// Client-supplied exercise fields, used for both create and update
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ExerciseDraft {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub exercise_type: String,
}

impl ExerciseDraft {
    /// Attach a freshly generated ID
    pub fn into_exercise(self) -> Exercise {
        Exercise {
            id: Uuid::new_v4(),
            name: self.name,
            exercise_type: self.exercise_type,
        }
    }
}
