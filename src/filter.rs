//! Cuisine filters for the recipe list.
//!
//! This module defines the fixed set of cuisine filters and the pure
//! pipeline that derives the displayed list from the loaded recipes and the
//! selected filter.

use crate::data::Recipe;

/// Cuisine filter a user can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterOption {
    /// Every recipe
    #[default]
    All,
    Italian,
    Mexican,
    Asian,
    French,
    American,
    Indian,
    Mediterranean,
    MiddleEastern,
    British,
    Japanese,
    Thai,
    Spanish,
    Greek,
    /// Catch-all for cuisines that have no dedicated filter
    Other,
}

impl FilterOption {
    /// Returns a slice containing all filter variants in display order.
    pub fn all() -> &'static [FilterOption] {
        &[
            FilterOption::All,
            FilterOption::Italian,
            FilterOption::Mexican,
            FilterOption::Asian,
            FilterOption::French,
            FilterOption::American,
            FilterOption::Indian,
            FilterOption::Mediterranean,
            FilterOption::MiddleEastern,
            FilterOption::British,
            FilterOption::Japanese,
            FilterOption::Thai,
            FilterOption::Spanish,
            FilterOption::Greek,
            FilterOption::Other,
        ]
    }

    /// Returns the display label, which is also the cuisine string matched
    /// against the feed.
    pub fn label(&self) -> &'static str {
        match self {
            FilterOption::All => "All Cuisines",
            FilterOption::Italian => "Italian",
            FilterOption::Mexican => "Mexican",
            FilterOption::Asian => "Asian",
            FilterOption::French => "French",
            FilterOption::American => "American",
            FilterOption::Indian => "Indian",
            FilterOption::Mediterranean => "Mediterranean",
            FilterOption::MiddleEastern => "Middle Eastern",
            FilterOption::British => "British",
            FilterOption::Japanese => "Japanese",
            FilterOption::Thai => "Thai",
            FilterOption::Spanish => "Spanish",
            FilterOption::Greek => "Greek",
            FilterOption::Other => "Other",
        }
    }

    /// Whether this is one of the named cuisines (not `All` or `Other`).
    pub fn is_specific(&self) -> bool {
        !matches!(self, FilterOption::All | FilterOption::Other)
    }

    /// Looks up the named cuisine whose label matches `cuisine`,
    /// ignoring case.
    pub fn from_cuisine(cuisine: &str) -> Option<FilterOption> {
        let cuisine = cuisine.to_lowercase();
        FilterOption::all()
            .iter()
            .copied()
            .filter(FilterOption::is_specific)
            .find(|option| option.label().to_lowercase() == cuisine)
    }

    /// Parses user input into a FilterOption.
    ///
    /// Matching is case-insensitive, ignores surrounding whitespace and
    /// treats `-` and `_` as spaces, so `middle-eastern` selects
    /// Middle Eastern. `all` is accepted as a short form of `All Cuisines`.
    ///
    /// Returns `None` if the input doesn't match any filter.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<FilterOption> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        if normalized == "all" {
            return Some(FilterOption::All);
        }
        FilterOption::all()
            .iter()
            .copied()
            .find(|option| option.label().to_lowercase() == normalized)
    }

    /// Whether a recipe with the given cuisine passes this filter.
    pub fn matches(&self, cuisine: &str) -> bool {
        match self {
            FilterOption::All => true,
            FilterOption::Other => FilterOption::from_cuisine(cuisine).is_none(),
            specific => cuisine.to_lowercase() == specific.label().to_lowercase(),
        }
    }
}

/// Derives the displayed list from the loaded recipes and the selected
/// filter, preserving feed order.
pub fn filter_recipes(recipes: &[Recipe], filter: FilterOption) -> Vec<Recipe> {
    if filter == FilterOption::All {
        return recipes.to_vec();
    }
    recipes
        .iter()
        .filter(|recipe| filter.matches(&recipe.cuisine))
        .cloned()
        .collect()
}

/// Returns the filters worth offering for the given recipes.
///
/// `All` always comes first, followed by every named cuisine present in the
/// data, then `Other` if any non-empty cuisine has no dedicated filter.
pub fn available_filter_options(recipes: &[Recipe]) -> Vec<FilterOption> {
    let mut has_other = false;
    let mut present = Vec::new();

    for recipe in recipes {
        match FilterOption::from_cuisine(&recipe.cuisine) {
            Some(option) => {
                if !present.contains(&option) {
                    present.push(option);
                }
            }
            None if !recipe.cuisine.is_empty() => has_other = true,
            None => {}
        }
    }

    let mut options = vec![FilterOption::All];
    options.extend(
        FilterOption::all()
            .iter()
            .copied()
            .filter(|option| present.contains(option)),
    );
    if has_other {
        options.push(FilterOption::Other);
    }
    options
}
