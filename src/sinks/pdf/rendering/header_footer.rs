//! Footer rendering with a customisable template.
//!
//! Templates support placeholders:
//! - `{n}` - page number, starting at 1
//! - `{total}` - total page count
//!
//! Footers are centred near the bottom of every page. An empty template disables
//! them entirely.

use crate::sinks::pdf::config::PDF;
use crate::sinks::pdf::fonts::LoadedFonts;
use crate::sinks::pdf::layout::{colours, DocumentLayout, TextStyle, BOTTOM_MARGIN, PAGE_HEIGHT};

const FOOTER_HEIGHT: f32 = 10.0;

/// Expand a template string with placeholder values.
fn expand_template(template: &str, page_number: usize, total: usize) -> String {
    template
        .replace("{n}", &page_number.to_string())
        .replace("{total}", &total.to_string())
}

/// Render footers on all pages.
///
/// This must be called after all content is laid out, when the total page
/// count is known.
pub fn render_footers(config: &PDF, fonts: &LoadedFonts, layout: &mut DocumentLayout) {
    if config.footer_template.is_empty() {
        return;
    }

    let style = TextStyle::regular(config.font_size_small_pt, colours::GREY_TEXT);
    let y = PAGE_HEIGHT - BOTTOM_MARGIN;
    let total = layout.page_count();
    for pi in 0..total {
        let text = expand_template(&config.footer_template, pi + 1, total);
        if !text.is_empty() {
            layout.place_centred(fonts, pi, y, FOOTER_HEIGHT, &text, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sinks::pdf::layout::Element;

    #[test]
    fn can_expand_template() {
        assert_eq!(expand_template("Page {n}/{total}", 3, 7), "Page 3/7");
        assert_eq!(expand_template("- {n} -", 12, 40), "- 12 -");
        assert_eq!(expand_template("no numbers", 1, 1), "no numbers");
    }

    #[test]
    fn every_page_gets_a_footer() {
        let fonts = LoadedFonts::Builtin;
        let mut layout = DocumentLayout::new("Toast");
        layout.add_page();
        layout.add_page();
        render_footers(&PDF::default(), &fonts, &mut layout);

        for (pi, page) in layout.pages.iter().enumerate() {
            let footer = format!("Page {}/3", pi + 1);
            assert_eq!(page.texts().collect::<Vec<_>>(), vec![footer.as_str()]);
            match &page.elements[0] {
                Element::Text { baseline, .. } => assert!(*baseline > PAGE_HEIGHT - BOTTOM_MARGIN),
                other => panic!("expected text, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_template_disables_footers() {
        let fonts = LoadedFonts::Builtin;
        let mut layout = DocumentLayout::new("Toast");
        let config = PDF {
            footer_template: String::new(),
            ..PDF::default()
        };
        render_footers(&config, &fonts, &mut layout);
        assert!(layout.pages[0].elements.is_empty());
    }
}
