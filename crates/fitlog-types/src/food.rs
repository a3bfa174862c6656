//! Food records

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A stored food item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub id: Uuid,
    pub name: String,
    pub price: f64,
}

/// Client-supplied food fields, used for both create and update
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FoodDraft {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
}

impl FoodDraft {
    /// Attach a freshly generated ID
    pub fn into_food(self) -> Food {
        Food {
            id: Uuid::new_v4(),
            name: self.name,
            price: self.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_food_draft_rules() {
        let ok = FoodDraft {
            name: "Oats".to_string(),
            price: 2.5,
        };
        assert!(ok.validate().is_ok());

        let negative = FoodDraft {
            price: -1.0,
            ..ok.clone()
        };
        assert!(negative.validate().is_err());

        let short = FoodDraft {
            name: "O".to_string(),
            ..ok
        };
        assert!(short.validate().is_err());
    }

    #[test]
    fn test_into_food_assigns_distinct_ids() {
        let draft = FoodDraft {
            name: "Rice".to_string(),
            price: 1.0,
        };
        let a = draft.clone().into_food();
        let b = draft.into_food();
        assert_ne!(a.id, b.id);
        assert_eq!(a.name, "Rice");
    }
}
