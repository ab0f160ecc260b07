//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggestions come straight from the scenario table, the catalog and the people
//! list, so users pick labels that resolve exactly.

use crate::{
    bot::BotData,
    core::{catalog, person, scenario},
    errors::{Error, Result},
};

/// Discord autocomplete limit
const MAX_CHOICES: usize = 25;

fn filter_sorted(values: impl IntoIterator<Item = String>, partial: &str) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    let mut matching: Vec<String> = values
        .into_iter()
        .filter(|value| value.to_lowercase().contains(&partial_lower))
        .collect();
    matching.sort();
    matching.dedup();
    matching.truncate(MAX_CHOICES);
    matching
}

/// Suggests configured origin locations.
pub async fn autocomplete_origin(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(origins) = scenario::list_origins(&ctx.data().database).await else {
        return Vec::new();
    };
    filter_sorted(origins, partial)
}

/// Suggests configured movement type labels.
///
/// Discord does not pass sibling arguments to autocomplete, so every type of every
/// origin is offered.
pub async fn autocomplete_movement_type(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(scenarios) = scenario::get_all_scenarios(&ctx.data().database).await else {
        return Vec::new();
    };
    filter_sorted(scenarios.into_iter().map(|s| s.movement_type), partial)
}

/// Suggests article numbers.
pub async fn autocomplete_article_number(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(articles) = catalog::list_articles(&ctx.data().database).await else {
        return Vec::new();
    };
    filter_sorted(articles.into_iter().map(|a| a.article_number), partial)
}

/// Suggests active technicians as `"<id> - <name>"`.
pub async fn autocomplete_technician(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let Ok(technicians) = person::list_technicians(&ctx.data().database).await else {
        return Vec::new();
    };
    filter_sorted(
        technicians
            .into_iter()
            .map(|t| format!("{} - {}", t.id, t.display_name())),
        partial,
    )
}

/// Reads the person id back from a technician suggestion (or a bare id).
#[must_use]
pub fn parse_technician_choice(choice: &str) -> Option<i64> {
    choice
        .split(" - ")
        .next()
        .and_then(|id| id.trim().parse().ok())
}

/// Optional technician argument: blank means none, anything else must parse.
///
/// # Errors
/// `Config` if a non-blank choice carries no person id.
pub fn technician_choice(choice: Option<String>) -> Result<Option<i64>> {
    choice
        .filter(|value| !value.trim().is_empty())
        .map(|value| {
            parse_technician_choice(&value).ok_or_else(|| Error::Config {
                message: format!("Unknown technician '{value}'"),
            })
        })
        .transpose()
}
