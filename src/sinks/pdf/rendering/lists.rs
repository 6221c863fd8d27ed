//! Bullet and numbered lines.

use super::{RecipeWriter, LIST_WIDTH, LIST_X};
use crate::recipe::Step;
use crate::sinks::pdf::layout::{colours, TextStyle};

const LINE_HEIGHT: f32 = 5.0;

impl RecipeWriter<'_> {
    fn list_line(&mut self, text: &str, indent: f32) {
        let style = TextStyle::regular(self.config.font_size_body_pt, colours::TEXT);
        self.layout.multi_cell(
            self.fonts,
            LIST_X + indent,
            LIST_WIDTH - indent,
            LINE_HEIGHT,
            text,
            style,
        );
    }

    pub(super) fn bullet_line(&mut self, text: &str, indent: f32) {
        self.list_line(&format!("\u{2022}  {text}"), indent);
        self.layout.ln(1.0);
    }

    pub(super) fn numbered_line(&mut self, number: usize, text: &str, indent: f32) {
        self.list_line(&format!("{number}.  {text}"), indent);
        self.layout.ln(1.5);
    }

    pub(super) fn render_steps(&mut self, steps: &[Step], indent: f32) {
        for (i, step) in steps.iter().enumerate() {
            self.numbered_line(i + 1, &step.text(), indent);
        }
    }
}
