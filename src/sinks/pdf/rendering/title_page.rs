//! The title block at the top of the first page.
//!
//! The recipe name, a rule, then up to two grey summary lines (where the dish is
//! from, and how long it takes / how much it makes) and the source links.

use super::{RecipeWriter, RULE_X1, RULE_X2};
use crate::format::format_duration;
use crate::recipe::Recipe;
use crate::sinks::pdf::layout::{colours, TextStyle, MARGIN, PAGE_WIDTH};

const TITLE_RULE_THICKNESS: f32 = 0.5;

/// `Region: … | Ethnicity: … | Restaurant: … | Category: …`
pub(super) fn metadata_line(recipe: &Recipe) -> Option<String> {
    let parts: Vec<String> = [
        ("Region", &recipe.region),
        ("Ethnicity", &recipe.ethnicity),
        ("Restaurant", &recipe.restaurant),
        ("Category", &recipe.category),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.as_ref().map(|value| format!("{label}: {value}")))
    .collect();
    join_parts(parts)
}

/// `Prep: … | Cook: … | Yield: … | Method: …`
pub(super) fn time_line(recipe: &Recipe) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    if let Some(prep) = &recipe.prep_time {
        parts.push(format!("Prep: {}", format_duration(prep)));
    }
    if let Some(cook) = &recipe.cook_time {
        parts.push(format!("Cook: {}", format_duration(cook)));
    }
    if let Some(amount) = &recipe.yield_amount {
        parts.push(format!(
            "Yield: {}",
            with_unit(amount, recipe.yield_unit.as_deref())
        ));
    }
    if let Some(method) = &recipe.method {
        parts.push(format!("Method: {method}"));
    }
    join_parts(parts)
}

/// `"2"` and `Some("cups")` become `"2 cups"`.
pub(super) fn with_unit(amount: &str, unit: Option<&str>) -> String {
    match unit {
        Some(unit) => format!("{amount} {unit}"),
        None => amount.to_string(),
    }
}

fn join_parts(parts: Vec<String>) -> Option<String> {
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" | "))
    }
}

impl RecipeWriter<'_> {
    pub(super) fn render_title_block(&mut self, recipe: &Recipe) {
        let title_style = TextStyle::bold(self.config.font_size_title_pt, colours::DARK_BROWN);
        self.layout.multi_cell(
            self.fonts,
            MARGIN,
            PAGE_WIDTH - 2.0 * MARGIN,
            12.0,
            &recipe.name,
            title_style,
        );

        self.layout.rule(
            RULE_X1,
            RULE_X2,
            TITLE_RULE_THICKNESS,
            colours::GREY_ACCENT,
        );
        self.layout.ln(4.0);

        let summary_style = TextStyle::regular(self.config.font_size_body_pt, colours::GREY_TEXT);
        for line in [metadata_line(recipe), time_line(recipe)].into_iter().flatten() {
            self.layout.cell(self.fonts, MARGIN, 6.0, &line, summary_style);
            self.layout.ln(2.0);
        }

        if let Some(source) = &recipe.source {
            let link_style = TextStyle::regular(self.config.font_size_small_pt, colours::LINK);
            for url in source.links() {
                self.layout.cell(self.fonts, MARGIN, 5.0, url, link_style);
                self.layout.ln(1.0);
            }
        }

        self.layout.ln(4.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::pdf::config::PDF;
    use crate::sinks::pdf::fonts::LoadedFonts;

    #[test]
    fn summary_lines_only_show_present_fields() {
        let recipe = Recipe::from_yaml(
            "name: Pho\nregion: Hanoi\ncategory: Soup\nprep_time: \"00:30:00\"\ncook_time: \"03:00:00\"\nyield: 4\nyield_unit: bowls\n",
        )
        .unwrap();
        assert_eq!(
            metadata_line(&recipe).as_deref(),
            Some("Region: Hanoi | Category: Soup")
        );
        assert_eq!(
            time_line(&recipe).as_deref(),
            Some("Prep: 30 min | Cook: 3h 0min | Yield: 4 bowls")
        );

        let bare = Recipe::from_yaml("name: Water\n").unwrap();
        assert_eq!(metadata_line(&bare), None);
        assert_eq!(time_line(&bare), None);
    }

    #[test]
    fn yield_without_unit() {
        let recipe = Recipe::from_yaml("name: Bread\nyield: 1\nmethod: oven\n").unwrap();
        assert_eq!(time_line(&recipe).as_deref(), Some("Yield: 1 | Method: oven"));
    }

    #[test]
    fn title_block_spacing() {
        let config = PDF::default();
        let fonts = LoadedFonts::Builtin;
        let recipe = Recipe::from_yaml(
            "name: Pho\nregion: Hanoi\nsource:\n  url: https://example.com/pho\n  url2: https://example.com/pho-2\n",
        )
        .unwrap();
        let mut writer = RecipeWriter::new(&config, &fonts, &recipe.name);
        writer.render_title_block(&recipe);

        // title 12, rule gap 4, metadata 6 + 2, two links 5 + 1, trailing 4
        let expected = MARGIN + 12.0 + 4.0 + 8.0 + 12.0 + 4.0;
        assert!((writer.layout.y() - expected).abs() < 1e-4);
        assert_eq!(
            writer.layout.pages[0].texts().collect::<Vec<_>>(),
            vec![
                "Pho",
                "Region: Hanoi",
                "https://example.com/pho",
                "https://example.com/pho-2"
            ]
        );
    }
}
