//! Item sources for the prompt

use std::path::Path;

use tracing::debug;

use crate::error::{Result, TypeaheadError};

/// Items offered when no file is given
pub const US_STATES: &[&str] = &[
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
];

/// Load the items to complete
///
/// # Arguments
/// * `path` - Items file; `None` selects [`US_STATES`]
pub fn load_items(path: Option<&Path>) -> Result<Vec<String>> {
    let Some(path) = path else {
        return Ok(US_STATES.iter().map(|s| s.to_string()).collect());
    };

    let content = std::fs::read_to_string(path).map_err(|e| {
        TypeaheadError::Generic(format!(
            "Failed to read items file {}: {}",
            path.display(),
            e
        ))
    })?;
    let json = path.extension().is_some_and(|ext| ext == "json");
    let items = parse_items(&content, json)?;
    debug!(path = %path.display(), count = items.len(), "items loaded");

    Ok(items)
}

/// Parse items from a JSON array of strings or from lines
///
/// Content starting with `[` is treated as JSON even without `json`. Blank
/// lines are skipped and surrounding whitespace is removed.
pub fn parse_items(content: &str, json: bool) -> Result<Vec<String>> {
    if json || content.trim_start().starts_with('[') {
        let items: Vec<String> = serde_json::from_str(content)?;
        return Ok(items);
    }

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_items() {
        let items = load_items(None).unwrap();
        assert_eq!(items.len(), 50);
        assert_eq!(items[0], "Alabama");
    }

    #[test]
    fn test_parse_lines() {
        let items = parse_items("apple\n\n  banana \ncherry\n", false).unwrap();
        assert_eq!(items, vec!["apple", "banana", "cherry"]);
    }

    #[test]
    fn test_parse_json() {
        let items = parse_items(r#"["New York", "Ohio"]"#, true).unwrap();
        assert_eq!(items, vec!["New York", "Ohio"]);

        let items = parse_items(r#"  ["Utah"]"#, false).unwrap();
        assert_eq!(items, vec!["Utah"]);
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(parse_items(r#"["Utah", 3]"#, true).is_err());
    }

    #[test]
    fn test_missing_file() {
        let err = load_items(Some(Path::new("/nonexistent/items.txt"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/items.txt"));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir()
            .join(format!("typeahead-items-{}.json", std::process::id()));
        std::fs::write(&path, r#"["red", "green"]"#).unwrap();

        let items = load_items(Some(&path)).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(items, vec!["red", "green"]);
    }
}
