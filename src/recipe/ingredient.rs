use super::scalar;
use serde::Deserialize;

/// One line of an ingredient list.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Ingredient {
    #[serde(deserialize_with = "scalar::required")]
    pub item: String,
    #[serde(default, deserialize_with = "scalar::optional")]
    pub amount: Option<String>,
    #[serde(default, deserialize_with = "scalar::optional")]
    pub unit: Option<String>,
    /// Alternative quantity, e.g. grams next to cups
    #[serde(default, deserialize_with = "scalar::optional")]
    pub amount_alt: Option<String>,
    #[serde(default, deserialize_with = "scalar::optional")]
    pub unit_alt: Option<String>,
    #[serde(default, deserialize_with = "scalar::truthy")]
    pub optional: bool,
    #[serde(default, deserialize_with = "scalar::non_empty")]
    pub brand: Option<String>,
    /// Path of another recipe file this ingredient is made from
    #[serde(rename = "ref", default, deserialize_with = "scalar::non_empty")]
    pub reference: Option<String>,
    #[serde(default, deserialize_with = "scalar::truthy")]
    pub garnish: bool,
}

/// An ingredient that can stand in for another one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Substitution {
    #[serde(flatten)]
    pub ingredient: Ingredient,
    #[serde(default, deserialize_with = "scalar::non_empty")]
    pub replaces: Option<String>,
    #[serde(rename = "for", default, deserialize_with = "scalar::non_empty")]
    pub for_item: Option<String>,
}

impl Substitution {
    /// The ingredient being replaced; `replaces` takes priority over `for`.
    pub fn target(&self) -> Option<&str> {
        self.replaces.as_deref().or(self.for_item.as_deref())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Garnish {
    #[serde(deserialize_with = "scalar::required")]
    pub item: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_amounts_become_text() {
        let ing: Ingredient = serde_yaml::from_str("item: flour\namount: 2\nunit: cups").unwrap();
        assert_eq!(ing.amount.as_deref(), Some("2"));
        assert_eq!(ing.unit.as_deref(), Some("cups"));
        assert!(!ing.optional);
    }

    #[test]
    fn item_is_required() {
        let ing: Result<Ingredient, _> = serde_yaml::from_str("amount: 2");
        assert!(ing.is_err());
    }

    #[test]
    fn ref_and_flags_are_read() {
        let ing: Ingredient = serde_yaml::from_str(
            "item: sauce\nref: sauces/base_sauce.yaml\noptional: true\ngarnish: 1",
        )
        .unwrap();
        assert_eq!(ing.reference.as_deref(), Some("sauces/base_sauce.yaml"));
        assert!(ing.optional);
        assert!(ing.garnish);
    }

    #[test]
    fn replaces_wins_over_for() {
        let sub: Substitution =
            serde_yaml::from_str("item: oat milk\nreplaces: whole milk\nfor: cream").unwrap();
        assert_eq!(sub.ingredient.item, "oat milk");
        assert_eq!(sub.target(), Some("whole milk"));

        let sub: Substitution = serde_yaml::from_str("item: oat milk\nfor: cream").unwrap();
        assert_eq!(sub.target(), Some("cream"));

        let sub: Substitution = serde_yaml::from_str("item: oat milk\nreplaces: ''\nfor: cream").unwrap();
        assert_eq!(sub.target(), Some("cream"));
    }
}
