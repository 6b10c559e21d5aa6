//! Write-time validation shared by manual entry, edits and imports.

use crate::error::{EngineError, EngineResult};
use crate::types::RecipeDraft;

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 30;
pub const MAX_NAME_LEN: usize = 200;

/// Trim every line and drop the blank ones, keeping order.
pub fn normalize_lines(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_non_negative(label: &str, value: Option<i32>) -> EngineResult<()> {
    match value {
        Some(v) if v < 0 => Err(EngineError::invalid(format!("{label} cannot be negative"))),
        _ => Ok(()),
    }
}

/// Validate and normalize a recipe submission.
///
/// Requires a name, at least one non-empty ingredient and at least one
/// non-empty step. Blank lines are dropped rather than rejected.
pub fn validate_draft(draft: RecipeDraft) -> EngineResult<RecipeDraft> {
    let name = draft.name.trim().to_string();
    if name.is_empty() {
        return Err(EngineError::invalid("Recipe name cannot be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(EngineError::invalid(format!(
            "Recipe name cannot be longer than {MAX_NAME_LEN} characters"
        )));
    }

    let ingredients = normalize_lines(draft.ingredients);
    if ingredients.is_empty() {
        return Err(EngineError::invalid("Add at least one ingredient"));
    }

    let steps = normalize_lines(draft.steps);
    if steps.is_empty() {
        return Err(EngineError::invalid("Add at least one step"));
    }

    check_non_negative("Prep time", draft.prep_minutes)?;
    check_non_negative("Cook time", draft.cook_minutes)?;
    if let Some(servings) = draft.servings {
        if servings < 1 {
            return Err(EngineError::invalid("Servings must be at least 1"));
        }
    }
    if let Some(rating) = draft.rating {
        if !(1..=5).contains(&rating) {
            return Err(EngineError::invalid("Rating must be between 1 and 5"));
        }
    }

    Ok(RecipeDraft {
        name,
        ingredients,
        steps,
        image_url: normalize_optional(draft.image_url),
        source_url: normalize_optional(draft.source_url),
        category: normalize_optional(draft.category),
        ..draft
    })
}

/// Normalize a username (trim + lowercase) and check the allowed character set.
///
/// Usernames appear in public URLs, so only `[a-z0-9_-]` is accepted and the
/// first character must be a letter or digit.
pub fn validate_username(raw: &str) -> EngineResult<String> {
    let username = raw.trim().to_lowercase();
    let len = username.chars().count();

    if !(USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len) {
        return Err(EngineError::invalid(format!(
            "Username must be between {USERNAME_MIN_LEN} and {USERNAME_MAX_LEN} characters"
        )));
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
    {
        return Err(EngineError::invalid(
            "Username may only contain letters, digits, '_' and '-'",
        ));
    }

    if !username
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphanumeric())
    {
        return Err(EngineError::invalid(
            "Username must start with a letter or digit",
        ));
    }

    Ok(username)
}

/// Cover colors are `#rrggbb`; returned lowercased.
pub fn validate_color(raw: &str) -> EngineResult<String> {
    let color = raw.trim().to_lowercase();
    let valid = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());
    if valid {
        Ok(color)
    } else {
        Err(EngineError::invalid("Cover color must look like #a1b2c3"))
    }
}
