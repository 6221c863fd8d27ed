//! Display strings for recipe fields.
//!
//! Everything in here is pure: the renderer decides where a line goes, these
//! functions only decide what it says.

use crate::recipe::{Ingredient, Substitution};
use std::path::Path;

/// Convert a `HH:MM:SS` duration into `"1h 15min"` / `"30 min"`.
///
/// Anything that doesn't have two integer leading segments is returned unchanged.
pub fn format_duration(duration: &str) -> String {
    let mut parts = duration.split(':');
    let hours = parts.next().and_then(|h| h.trim().parse::<i64>().ok());
    let minutes = parts.next().and_then(|m| m.trim().parse::<i64>().ok());

    match (hours, minutes) {
        (Some(hours), Some(minutes)) if hours > 0 => format!("{hours}h {minutes}min"),
        (Some(_), Some(minutes)) => format!("{minutes} min"),
        _ => duration.to_string(),
    }
}

/// Build the display line for an ingredient.
pub fn format_ingredient(ingredient: &Ingredient) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(3);
    if let Some(amount) = ingredient.amount.as_deref().map(str::trim) {
        if !amount.is_empty() {
            parts.push(amount);
        }
    }
    if let Some(unit) = ingredient.unit.as_deref().map(str::trim) {
        if !unit.is_empty() {
            parts.push(unit);
        }
    }
    parts.push(&ingredient.item);

    let mut line = parts.join(" ");

    match (&ingredient.amount_alt, &ingredient.unit_alt) {
        (Some(amount), Some(unit)) => line.push_str(&format!("  ({amount} {unit})")),
        (Some(amount), None) => line.push_str(&format!("  ({amount})")),
        _ => {}
    }
    if ingredient.optional {
        line.push_str("  [optional]");
    }
    if let Some(brand) = &ingredient.brand {
        line.push_str(&format!("  [Brand: {brand}]"));
    }
    if let Some(reference) = &ingredient.reference {
        line.push_str(&format!("  (see: {})", reference_name(reference)));
    }
    if ingredient.garnish {
        line.push_str("  [garnish]");
    }

    line
}

/// Build the display line for a substitution.
pub fn format_substitution(substitution: &Substitution) -> String {
    let mut line = format_ingredient(&substitution.ingredient);
    if let Some(target) = substitution.target() {
        line.push_str(&format!("  \u{2192} replaces {target}"));
    }
    line
}

/// Friendly name for a referenced recipe file: `sauces/base_sauce.yaml` -> `Base Sauce`.
pub fn reference_name(reference: &str) -> String {
    let stem = Path::new(reference)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    title_case(&stem.replace('_', " "))
}

/// Upper-case the first letter of every run of letters and lower-case the rest.
fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            result.push(c);
            previous_is_letter = false;
        }
    }
    result
}
