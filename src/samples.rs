use mongodb::bson::{doc, Document};

/// Recipes inserted by the `seed` binary.
pub fn sample_recipes() -> Vec<Document> {
    vec![
        doc! {
            "name": "Vegan Chili",
            "meal_type": "dinner",
            "ingredients": ["beans", "tomatoes", "onion", "bell pepper"],
            "instructions": "Cook all ingredients together.",
            "tags": ["vegan", "gluten-free"],
            "nutrition": {"calories": 350, "protein": 12, "carbs": 45, "fat": 10},
        },
        doc! {
            "name": "Pancakes",
            "meal_type": "breakfast",
            "ingredients": ["flour", "milk", "egg", "baking powder"],
            "instructions": "Mix and fry.",
            "tags": ["vegetarian"],
        },
        doc! {
            "name": "Chicken Salad",
            "meal_type": "lunch",
            "ingredients": ["chicken", "lettuce", "tomato", "cucumber"],
            "instructions": "Mix all ingredients.",
            "tags": ["gluten-free"],
            "nutrition": {"calories": 350, "protein": 12, "carbs": 45, "fat": 10},
        },
    ]
}
