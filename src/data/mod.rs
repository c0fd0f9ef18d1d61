//! Core data models for the recipe feed
//!
//! This module contains the recipe record decoded from the remote feed, the
//! wire envelope around it, and the client that fetches it.

pub mod recipes;
pub mod video;

pub use recipes::{FetchError, RecipeClient, RecipeSource};
pub use video::youtube_embed_url;

use serde::Deserialize;
use std::hash::{Hash, Hasher};

/// A single dish from the remote recipe feed
///
/// Identity is the `uuid`: two recipes compare equal (and hash the same)
/// whenever their uuids match, regardless of the other fields.
#[derive(Debug, Clone, Deserialize)]
pub struct Recipe {
    /// Cuisine label as published by the feed (e.g. "Malaysian")
    pub cuisine: String,
    /// Dish name
    pub name: String,
    /// Full-size photo
    #[serde(default)]
    pub photo_url_large: Option<String>,
    /// Thumbnail photo
    #[serde(default)]
    pub photo_url_small: Option<String>,
    /// Stable identifier
    pub uuid: String,
    /// Link to the original recipe page
    #[serde(default)]
    pub source_url: Option<String>,
    /// Link to a video walkthrough
    #[serde(default)]
    pub youtube_url: Option<String>,
}

impl PartialEq for Recipe {
    fn eq(&self, other: &Self) -> bool {
        self.uuid == other.uuid
    }
}

impl Eq for Recipe {}

impl Hash for Recipe {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uuid.hash(state);
    }
}

/// Wire envelope returned by the recipe endpoint: `{"recipes": [...]}`
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeResponse {
    pub recipes: Vec<Recipe>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn recipe(uuid: &str, name: &str) -> Recipe {
        Recipe {
            cuisine: "Italian".to_string(),
            name: name.to_string(),
            photo_url_large: None,
            photo_url_small: None,
            uuid: uuid.to_string(),
            source_url: None,
            youtube_url: None,
        }
    }

    #[test]
    fn test_recipes_with_same_uuid_are_equal() {
        let a = recipe("1", "Pizza");
        let b = recipe("1", "Calzone");
        assert_eq!(a, b);
    }

    #[test]
    fn test_recipes_with_different_uuid_are_not_equal() {
        let a = recipe("1", "Pizza");
        let b = recipe("2", "Pizza");
        assert_ne!(a, b);
    }

    #[test]
    fn test_hash_follows_uuid_identity() {
        let mut set = HashSet::new();
        set.insert(recipe("1", "Pizza"));
        set.insert(recipe("1", "Calzone"));
        set.insert(recipe("2", "Tacos"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_deserialize_snake_case_fields() {
        let json = r#"{
            "cuisine": "Malaysian",
            "name": "Apam Balik",
            "photo_url_large": "https://example.com/large.jpg",
            "photo_url_small": "https://example.com/small.jpg",
            "uuid": "0c6ca6e7-e32a-4053-b824-1dbf749910d8",
            "source_url": "https://example.com/apam",
            "youtube_url": "https://www.youtube.com/watch?v=6R8ffRRJcrg"
        }"#;

        let recipe: Recipe = serde_json::from_str(json).expect("Failed to deserialize Recipe");

        assert_eq!(recipe.cuisine, "Malaysian");
        assert_eq!(recipe.name, "Apam Balik");
        assert_eq!(
            recipe.photo_url_large.as_deref(),
            Some("https://example.com/large.jpg")
        );
        assert_eq!(
            recipe.photo_url_small.as_deref(),
            Some("https://example.com/small.jpg")
        );
        assert_eq!(recipe.uuid, "0c6ca6e7-e32a-4053-b824-1dbf749910d8");
        assert_eq!(recipe.source_url.as_deref(), Some("https://example.com/apam"));
        assert_eq!(
            recipe.youtube_url.as_deref(),
            Some("https://www.youtube.com/watch?v=6R8ffRRJcrg")
        );
    }

    #[test]
    fn test_deserialize_missing_optional_fields() {
        let json = r#"{"cuisine": "British", "name": "Bakewell Tart", "uuid": "abc"}"#;

        let recipe: Recipe = serde_json::from_str(json).expect("Failed to deserialize Recipe");

        assert!(recipe.photo_url_large.is_none());
        assert!(recipe.photo_url_small.is_none());
        assert!(recipe.source_url.is_none());
        assert!(recipe.youtube_url.is_none());
    }

    #[test]
    fn test_deserialize_missing_required_field_fails() {
        let json = r#"{"cuisine": "British", "uuid": "abc"}"#;
        let result: Result<Recipe, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_response_envelope_preserves_order() {
        let json = r#"{"recipes": [
            {"cuisine": "Italian", "name": "Pizza", "uuid": "1"},
            {"cuisine": "Mexican", "name": "Tacos", "uuid": "2"}
        ]}"#;

        let response: RecipeResponse = serde_json::from_str(json).expect("Failed to deserialize");

        assert_eq!(response.recipes.len(), 2);
        assert_eq!(response.recipes[0].name, "Pizza");
        assert_eq!(response.recipes[1].name, "Tacos");
    }
}
