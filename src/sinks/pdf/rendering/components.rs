//! Component blocks and the optional section.

use super::title_page::with_unit;
use super::{RecipeWriter, COMPONENT_INDENT, LABEL_X, LIST_X};
use crate::format::format_substitution;
use crate::recipe::{Component, OptionalSection};
use crate::sinks::pdf::layout::{colours, TextStyle};

/// `"▸ Sauce  (yields 1 cup)"`
fn component_heading(component: &Component) -> String {
    match &component.yield_amount {
        Some(amount) => format!(
            "\u{25B8} {}  (yields {})",
            component.name,
            with_unit(amount, component.yield_unit.as_deref())
        ),
        None => format!("\u{25B8} {}", component.name),
    }
}

impl RecipeWriter<'_> {
    fn sub_label(&mut self, label: &str) {
        let style = TextStyle::regular(self.config.font_size_label_pt, colours::GREY_TEXT);
        self.layout.cell(self.fonts, LABEL_X, 5.0, label, style);
        self.layout.ln(1.0);
    }

    pub(super) fn render_component(&mut self, component: &Component) {
        let style = TextStyle::bold(self.config.font_size_subheading_pt, colours::MEDIUM_BROWN);
        self.layout
            .cell(self.fonts, LIST_X, 7.0, &component_heading(component), style);
        self.layout.ln(2.0);

        if let Some(ingredients) = &component.ingredients {
            self.sub_label("Ingredients:");
            self.render_ingredients(ingredients, COMPONENT_INDENT);
        }

        if let Some(steps) = &component.steps {
            self.sub_label("Steps:");
            self.render_steps(steps, COMPONENT_INDENT);
        }

        if let Some(substitutions) = &component.substitutions {
            self.sub_label("Substitutions:");
            for substitution in substitutions {
                self.bullet_line(&format_substitution(substitution), COMPONENT_INDENT);
            }
        }

        if let Some(optional) = component.optional.as_ref().filter(|o| !o.is_empty()) {
            let ingredients = match optional {
                OptionalSection::List(items) => Some(items),
                OptionalSection::Grouped(group) => {
                    if group.components.is_some() {
                        log::warn!(
                            "ignoring components nested in the optional section of component '{}'",
                            component.name
                        );
                    }
                    group.ingredients.as_ref()
                }
            };
            if let Some(ingredients) = ingredients {
                self.sub_label("Optional:");
                self.render_ingredients(ingredients, COMPONENT_INDENT);
            }
        }

        self.layout.ln(2.0);
    }

    pub(super) fn render_optional_section(&mut self, optional: &OptionalSection) {
        if optional.is_empty() {
            return;
        }
        self.render_section_header("Optional");

        match optional {
            OptionalSection::List(items) => self.render_ingredients(items, 0.0),
            OptionalSection::Grouped(group) => {
                if let Some(components) = &group.components {
                    for component in components {
                        self.render_component(component);
                    }
                }
                if let Some(ingredients) = &group.ingredients {
                    self.render_ingredients(ingredients, 0.0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::pdf::config::PDF;
    use crate::sinks::pdf::fonts::LoadedFonts;

    fn texts(yaml: &str) -> Vec<String> {
        let config = PDF::default();
        let fonts = LoadedFonts::Builtin;
        let mut writer = RecipeWriter::new(&config, &fonts, "Test");
        let component: Component = serde_yaml::from_str(yaml).unwrap();
        writer.render_component(&component);
        writer.layout.pages[0]
            .texts()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn can_render_headings() {
        let component: Component =
            serde_yaml::from_str("name: Sauce\nyield: 1\nyield_unit: cup").unwrap();
        assert_eq!(component_heading(&component), "\u{25B8} Sauce  (yields 1 cup)");
        let component: Component = serde_yaml::from_str("name: Sauce\nyield: 2").unwrap();
        assert_eq!(component_heading(&component), "\u{25B8} Sauce  (yields 2)");
        let component: Component = serde_yaml::from_str("name: Sauce").unwrap();
        assert_eq!(component_heading(&component), "\u{25B8} Sauce");
    }

    #[test]
    fn sub_blocks_come_in_order() {
        let texts = texts(
            r#"
name: Dough
optional:
  - item: rosemary
substitutions:
  - item: spelt flour
    replaces: flour
steps:
  - Knead
ingredients:
  - item: flour
    amount: 500
    unit: g
"#,
        );
        assert_eq!(
            texts,
            vec![
                "> Dough",
                "Ingredients:",
                "\u{2022}  500 g flour",
                "Steps:",
                "1.  Knead",
                "Substitutions:",
                "\u{2022}  spelt flour  -> replaces flour",
                "Optional:",
                "\u{2022}  rosemary",
            ]
        );
    }

    #[test]
    fn grouped_optional_inside_a_component_renders_its_ingredients() {
        let texts = texts(
            "name: Dough\noptional:\n  components:\n    - name: Glaze\n  ingredients:\n    - item: sesame\n",
        );
        assert_eq!(texts, vec!["> Dough", "Optional:", "\u{2022}  sesame"]);
    }

    #[test]
    fn grouped_optional_section_renders_components_first() {
        let config = PDF::default();
        let fonts = LoadedFonts::Builtin;
        let mut writer = RecipeWriter::new(&config, &fonts, "Test");
        let optional: OptionalSection = serde_yaml::from_str(
            "ingredients:\n  - item: lime\ncomponents:\n  - name: Crispy shallots\n",
        )
        .unwrap();
        writer.render_optional_section(&optional);
        assert_eq!(
            writer.layout.pages[0].texts().collect::<Vec<_>>(),
            vec!["Optional", "> Crispy shallots", "\u{2022}  lime"]
        );
    }
}
