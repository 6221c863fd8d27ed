use super::{scalar, Ingredient, Step, Substitution};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_yaml::Value;

/// A named sub-recipe (a sauce, a dough, a marinade, ...) inside a recipe.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Component {
    #[serde(deserialize_with = "scalar::required")]
    pub name: String,
    #[serde(rename = "yield", default, deserialize_with = "scalar::optional")]
    pub yield_amount: Option<String>,
    #[serde(default, deserialize_with = "scalar::optional")]
    pub yield_unit: Option<String>,
    #[serde(default)]
    pub ingredients: Option<Vec<Ingredient>>,
    #[serde(default)]
    pub steps: Option<Vec<Step>>,
    #[serde(default)]
    pub substitutions: Option<Vec<Substitution>>,
    #[serde(default)]
    pub optional: Option<OptionalSection>,
}

/// The `optional` field, which comes in two shapes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionalSection {
    /// `optional:` followed directly by ingredient entries
    List(Vec<Ingredient>),
    /// `optional:` with `components:` and/or `ingredients:` underneath
    Grouped(OptionalGroup),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct OptionalGroup {
    #[serde(default)]
    pub components: Option<Vec<Component>>,
    #[serde(default)]
    pub ingredients: Option<Vec<Ingredient>>,
}

impl OptionalSection {
    /// An empty list, or a mapping with neither `components` nor `ingredients`.
    pub fn is_empty(&self) -> bool {
        match self {
            OptionalSection::List(items) => items.is_empty(),
            OptionalSection::Grouped(group) => {
                group.components.is_none() && group.ingredients.is_none()
            }
        }
    }
}

impl<'de> Deserialize<'de> for OptionalSection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Sequence(_) => serde_yaml::from_value(value)
                .map(OptionalSection::List)
                .map_err(D::Error::custom),
            Value::Mapping(_) => serde_yaml::from_value(value)
                .map(OptionalSection::Grouped)
                .map_err(D::Error::custom),
            _ => Err(D::Error::custom(
                "optional must be a list of ingredients or a mapping of components/ingredients",
            )),
        }
    }
}
