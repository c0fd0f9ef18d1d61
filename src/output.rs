//! Plain-text rendering of recipe lists and cards

use crate::data::{youtube_embed_url, Recipe};
use crate::filter::FilterOption;

/// One line per recipe in the list view
pub fn recipe_line(recipe: &Recipe) -> String {
    let video = if recipe.youtube_url.is_some() { " [video]" } else { "" };
    format!("{} ({}){}  {}", recipe.name, recipe.cuisine, video, recipe.uuid)
}

/// The filtered list, headed by a count
///
/// An empty result under a specific filter renders as "No <label> Recipes".
pub fn recipe_list(recipes: &[Recipe], filter: FilterOption) -> String {
    if recipes.is_empty() && filter != FilterOption::All {
        return format!("No {} Recipes", filter.label());
    }

    let header = match (recipes.len(), filter) {
        (1, FilterOption::All) => "1 recipe".to_string(),
        (n, FilterOption::All) => format!("{} recipes", n),
        (1, f) => format!("1 {} recipe", f.label()),
        (n, f) => format!("{} {} recipes", n, f.label()),
    };

    let mut out = header;
    for recipe in recipes {
        out.push('\n');
        out.push_str(&recipe_line(recipe));
    }
    out
}

/// Expanded view of a single recipe: photo, embedded video and source link
pub fn recipe_card(recipe: &Recipe) -> String {
    let photo = recipe
        .photo_url_large
        .as_deref()
        .or(recipe.photo_url_small.as_deref())
        .unwrap_or("No photo available");
    let video = recipe
        .youtube_url
        .as_deref()
        .and_then(youtube_embed_url)
        .unwrap_or_else(|| "No video available".to_string());
    let source = recipe.source_url.as_deref().unwrap_or("No source available");

    format!(
        "{}\nCuisine: {}\nPhoto:   {}\nVideo:   {}\nSource:  {}\nId:      {}",
        recipe.name, recipe.cuisine, photo, video, source, recipe.uuid
    )
}

/// The filter menu, marking the selected option
pub fn filter_menu(options: &[FilterOption], selected: FilterOption) -> String {
    options
        .iter()
        .map(|option| {
            let marker = if *option == selected { "*" } else { " " };
            format!("{} {}", marker, option.label())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
