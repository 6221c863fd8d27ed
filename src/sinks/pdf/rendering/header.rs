//! Section headers.
//!
//! A bold heading with a thin rule under it. Headers near the bottom of a page move
//! to the next page so they are never stranded without content.

use super::{RecipeWriter, RULE_X1, RULE_X2, SECTION_BREAK_Y};
use crate::sinks::pdf::layout::{colours, TextStyle, MARGIN};

const RULE_THICKNESS: f32 = 0.2;

impl RecipeWriter<'_> {
    pub(super) fn render_section_header(&mut self, title: &str) {
        if self.layout.y() > SECTION_BREAK_Y {
            self.layout.add_page();
        }
        self.layout.ln(4.0);

        let style = TextStyle::bold(self.config.font_size_heading_pt, colours::MEDIUM_BROWN);
        self.layout.cell(self.fonts, MARGIN, 8.0, title, style);
        self.layout
            .rule(RULE_X1, RULE_X2, RULE_THICKNESS, colours::GREY_ACCENT);
        self.layout.ln(3.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::pdf::config::PDF;
    use crate::sinks::pdf::fonts::LoadedFonts;
    use crate::sinks::pdf::layout::Element;

    #[test]
    fn header_is_text_then_rule() {
        let config = PDF::default();
        let fonts = LoadedFonts::Builtin;
        let mut writer = RecipeWriter::new(&config, &fonts, "Toast");
        writer.render_section_header("Steps");

        assert_eq!(writer.layout.y(), MARGIN + 4.0 + 8.0 + 3.0);
        let elements = &writer.layout.pages[0].elements;
        assert!(matches!(&elements[0], Element::Text { text, .. } if text == "Steps"));
        match &elements[1] {
            Element::Rule { x1, x2, y, .. } => {
                assert_eq!((*x1, *x2), (RULE_X1, RULE_X2));
                assert_eq!(*y, MARGIN + 12.0);
            }
            other => panic!("expected rule, got {other:?}"),
        }
    }

    #[test]
    fn header_near_the_bottom_starts_a_new_page() {
        let config = PDF::default();
        let fonts = LoadedFonts::Builtin;
        let mut writer = RecipeWriter::new(&config, &fonts, "Toast");

        writer.layout.ln(SECTION_BREAK_Y - MARGIN);
        writer.render_section_header("Notes");
        assert_eq!(writer.layout.page_count(), 1);

        writer.layout.ln(SECTION_BREAK_Y - writer.layout.y() + 0.5);
        writer.render_section_header("Garnishes");
        assert_eq!(writer.layout.page_count(), 2);
        assert_eq!(writer.layout.pages[1].texts().collect::<Vec<_>>(), vec!["Garnishes"]);
    }
}
