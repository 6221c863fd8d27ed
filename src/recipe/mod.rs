//! Recipe records as written in YAML files.
//!
//! Loading is strict about shape and loose about scalars: an `optional` field that is
//! neither a list nor a mapping is an error, but `amount: 2` and `amount: "2"` are the
//! same thing. A file without a `name` is reported separately from a file that fails
//! to parse, because the batch driver skips the former and errors on the latter.

mod component;
pub use component::*;

mod ingredient;
pub use ingredient::*;

mod scalar;

mod step;
pub use step::*;

use serde::Deserialize;
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Everything we need to know to lay out a recipe document
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Recipe {
    #[serde(deserialize_with = "scalar::required")]
    pub name: String,

    #[serde(default, deserialize_with = "scalar::optional")]
    pub region: Option<String>,
    #[serde(default, deserialize_with = "scalar::optional")]
    pub ethnicity: Option<String>,
    #[serde(default, deserialize_with = "scalar::optional")]
    pub restaurant: Option<String>,
    #[serde(default, deserialize_with = "scalar::optional")]
    pub category: Option<String>,

    /// Durations, usually written as `HH:MM:SS`
    #[serde(default, deserialize_with = "scalar::optional")]
    pub prep_time: Option<String>,
    #[serde(default, deserialize_with = "scalar::optional")]
    pub cook_time: Option<String>,

    #[serde(rename = "yield", default, deserialize_with = "scalar::optional")]
    pub yield_amount: Option<String>,
    #[serde(default, deserialize_with = "scalar::optional")]
    pub yield_unit: Option<String>,
    #[serde(default, deserialize_with = "scalar::optional")]
    pub method: Option<String>,

    #[serde(default)]
    pub source: Option<SourceLinks>,

    #[serde(default)]
    pub components: Option<Vec<Component>>,
    #[serde(default)]
    pub ingredients: Option<Vec<Ingredient>>,
    #[serde(default)]
    pub optional: Option<OptionalSection>,
    #[serde(default)]
    pub steps: Option<Vec<Step>>,
    #[serde(default)]
    pub steps_alt: Option<Vec<Step>>,
    #[serde(default)]
    pub substitutions: Option<Vec<Substitution>>,
    #[serde(default)]
    pub garnishes: Option<Vec<Garnish>>,
    #[serde(default, deserialize_with = "scalar::optional_list")]
    pub notes: Option<Vec<String>>,
}

/// Where the recipe came from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct SourceLinks {
    #[serde(default, deserialize_with = "scalar::optional")]
    pub url: Option<String>,
    #[serde(default, deserialize_with = "scalar::optional")]
    pub url2: Option<String>,
}

impl SourceLinks {
    /// The links that are present, `url` before `url2`.
    pub fn links(&self) -> impl Iterator<Item = &str> {
        [self.url.as_deref(), self.url2.as_deref()].into_iter().flatten()
    }
}

#[derive(Error, Debug)]
pub enum RecipeError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid recipe YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document is empty, isn't a mapping, or has no `name`
    #[error("no 'name' field")]
    MissingName,
}

impl Recipe {
    /// Load a recipe from a YAML file.
    pub fn load(path: &Path) -> Result<Recipe, RecipeError> {
        let contents = std::fs::read_to_string(path).map_err(|source| RecipeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Recipe::from_yaml(&contents)
    }

    /// Parse a recipe from YAML text, checking for `name` before anything else.
    pub fn from_yaml(contents: &str) -> Result<Recipe, RecipeError> {
        let value: Value = serde_yaml::from_str(contents)?;
        let has_name = match &value {
            Value::Mapping(map) => map.get("name").is_some_and(|name| !name.is_null()),
            _ => false,
        };
        if !has_name {
            return Err(RecipeError::MissingName);
        }
        Ok(serde_yaml::from_value(value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
name: Pad Thai
region: Central Thailand
category: Noodles
prep_time: "00:30:00"
cook_time: "00:15:00"
yield: 2
yield_unit: servings
source:
  url: https://example.com/pad-thai
components:
  - name: Sauce
    yield: 1
    yield_unit: cup
    ingredients:
      - item: tamarind paste
        amount: 3
        unit: tbsp
    steps:
      - Whisk everything together
ingredients:
  - item: rice noodles
    amount: 200
    unit: g
optional:
  - item: chili flakes
steps:
  - Soak the noodles
  - optional: top with peanuts
substitutions:
  - item: tofu
    replaces: shrimp
garnishes:
  - item: lime wedge
notes:
  - Best eaten fresh
"#;

    #[test]
    fn can_load_full_recipe() {
        let recipe = Recipe::from_yaml(FULL).expect("can parse recipe");
        assert_eq!(recipe.name, "Pad Thai");
        assert_eq!(recipe.yield_amount.as_deref(), Some("2"));
        assert_eq!(recipe.components.as_ref().map(Vec::len), Some(1));
        assert_eq!(recipe.steps.as_ref().map(Vec::len), Some(2));
        assert_eq!(
            recipe.steps.as_ref().unwrap()[1].text(),
            "optional: top with peanuts"
        );
        assert_eq!(
            recipe.source.as_ref().unwrap().links().collect::<Vec<_>>(),
            vec!["https://example.com/pad-thai"]
        );
        assert_eq!(recipe.garnishes.unwrap()[0].item, "lime wedge");
    }

    #[test]
    fn missing_name_is_reported_separately() {
        let err = Recipe::from_yaml("ingredients:\n  - item: salt\n").unwrap_err();
        assert!(matches!(err, RecipeError::MissingName));

        let err = Recipe::from_yaml("- just\n- a list\n").unwrap_err();
        assert!(matches!(err, RecipeError::MissingName));

        let err = Recipe::from_yaml("name: ~\n").unwrap_err();
        assert!(matches!(err, RecipeError::MissingName));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = Recipe::from_yaml("name: [unclosed\n").unwrap_err();
        assert!(matches!(err, RecipeError::Yaml(_)));
    }

    #[test]
    fn bad_shapes_are_parse_errors() {
        let err = Recipe::from_yaml("name: Soup\noptional: 3\n").unwrap_err();
        assert!(matches!(err, RecipeError::Yaml(_)));
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let recipe = Recipe::from_yaml("name: Toast\ntags: [breakfast]\n").unwrap();
        assert_eq!(recipe.name, "Toast");
        assert!(recipe.ingredients.is_none());
    }
}
