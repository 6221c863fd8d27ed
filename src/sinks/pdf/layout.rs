//! In-memory page accumulation.
//!
//! A [`DocumentLayout`] is a list of pages of positioned text and rules, built by a
//! single forward pass over a vertical cursor. Everything is in millimetres measured
//! from the top-left corner of the page; conversion to PDF space happens when the
//! layout is written out.

use crate::sinks::pdf::fonts::{LoadedFonts, Weight};

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 10.0;
pub const BOTTOM_MARGIN: f32 = 15.0;
/// Lines that would end below this start a new page.
pub const PAGE_BREAK_Y: f32 = PAGE_HEIGHT - BOTTOM_MARGIN;
/// Inner horizontal padding of a text cell.
pub const CELL_PADDING: f32 = 1.0;

const MM_PER_PT: f32 = 25.4 / 72.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    pub const fn new(r: u8, g: u8, b: u8) -> Colour {
        Colour { r, g, b }
    }
}

pub mod colours {
    use super::Colour;

    pub const DARK_BROWN: Colour = Colour::new(62, 39, 35);
    pub const MEDIUM_BROWN: Colour = Colour::new(93, 64, 55);
    pub const TEXT: Colour = Colour::new(33, 33, 33);
    pub const GREY_ACCENT: Colour = Colour::new(188, 170, 164);
    pub const GREY_TEXT: Colour = Colour::new(97, 97, 97);
    pub const LINK: Colour = Colour::new(0, 0, 180);
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextStyle {
    pub weight: Weight,
    pub size_pt: f32,
    pub colour: Colour,
}

impl TextStyle {
    pub fn regular(size_pt: f32, colour: Colour) -> TextStyle {
        TextStyle {
            weight: Weight::Regular,
            size_pt,
            colour,
        }
    }

    pub fn bold(size_pt: f32, colour: Colour) -> TextStyle {
        TextStyle {
            weight: Weight::Bold,
            size_pt,
            colour,
        }
    }

    fn size_mm(&self) -> f32 {
        self.size_pt * MM_PER_PT
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    /// A single line of text with its baseline at `baseline`
    Text {
        x: f32,
        baseline: f32,
        text: String,
        style: TextStyle,
    },
    /// A horizontal line
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        thickness: f32,
        colour: Colour,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    pub elements: Vec<Element>,
}

impl Page {
    /// All text on the page, in the order it was placed.
    #[cfg(test)]
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|element| match element {
            Element::Text { text, .. } => Some(text.as_str()),
            Element::Rule { .. } => None,
        })
    }
}

/// The document being built, plus the cursor on its last page.
#[derive(Clone, Debug, PartialEq)]
pub struct DocumentLayout {
    pub title: String,
    pub pages: Vec<Page>,
    y: f32,
}

impl DocumentLayout {
    /// A layout with one empty page and the cursor at the top margin.
    pub fn new<S: ToString>(title: S) -> DocumentLayout {
        DocumentLayout {
            title: title.to_string(),
            pages: vec![Page::default()],
            y: MARGIN,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn add_page(&mut self) {
        self.pages.push(Page::default());
        self.y = MARGIN;
    }

    /// Move the cursor down.
    pub fn ln(&mut self, h: f32) {
        self.y += h;
    }

    fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn ensure_room(&mut self, h: f32) {
        if self.y + h > PAGE_BREAK_Y {
            self.add_page();
        }
    }

    /// Place one line of text in a cell of height `h` starting at `x`, then move
    /// the cursor below it. Starts a new page first if the cell wouldn't fit.
    pub fn cell(&mut self, fonts: &LoadedFonts, x: f32, h: f32, text: &str, style: TextStyle) {
        self.ensure_room(h);
        let baseline = self.y + h / 2.0 + 0.3 * style.size_mm();
        let text = fonts.drawable(text).into_owned();
        if !text.is_empty() {
            self.current_page().elements.push(Element::Text {
                x: x + CELL_PADDING,
                baseline,
                text,
                style,
            });
        }
        self.y += h;
    }

    /// Wrap `text` to `width` and place each line with [`DocumentLayout::cell`].
    /// Lines flow onto new pages as needed.
    pub fn multi_cell(
        &mut self,
        fonts: &LoadedFonts,
        x: f32,
        width: f32,
        h: f32,
        text: &str,
        style: TextStyle,
    ) {
        let drawable = fonts.drawable(text);
        let max_width = width - 2.0 * CELL_PADDING;
        let mut buf = [0u8; 4];
        let lines = wrap_text(&drawable, max_width, |c| {
            fonts.width_of_text(c.encode_utf8(&mut buf), style.weight, style.size_pt)
        });
        for line in lines {
            self.cell(fonts, x, h, &line, style);
        }
    }

    /// Draw a horizontal rule at the cursor without moving it.
    pub fn rule(&mut self, x1: f32, x2: f32, thickness: f32, colour: Colour) {
        let y = self.y;
        self.current_page().elements.push(Element::Rule {
            x1,
            x2,
            y,
            thickness,
            colour,
        });
    }

    /// Place text centred across the page in a cell at `y` on the given page.
    pub fn place_centred(
        &mut self,
        fonts: &LoadedFonts,
        page_index: usize,
        y: f32,
        h: f32,
        text: &str,
        style: TextStyle,
    ) {
        let Some(page) = self.pages.get_mut(page_index) else {
            return;
        };
        let text = fonts.drawable(text).into_owned();
        let width = fonts.width_of_text(&text, style.weight, style.size_pt);
        let content_width = PAGE_WIDTH - 2.0 * MARGIN;
        page.elements.push(Element::Text {
            x: MARGIN + (content_width - width) / 2.0,
            baseline: y + h / 2.0 + 0.3 * style.size_mm(),
            text,
            style,
        });
    }
}

/// Break `text` into lines no wider than `max_width`.
///
/// Explicit newlines always break. Otherwise a line breaks at its last space, or
/// mid-word when a single word doesn't fit. Every line holds at least one character
/// so the loop always makes progress.
pub fn wrap_text<F>(text: &str, max_width: f32, mut measure: F) -> Vec<String>
where
    F: FnMut(char) -> f32,
{
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let chars: Vec<char> = paragraph.chars().collect();
        let mut paragraph_lines: Vec<String> = Vec::new();
        let mut start = 0;
        let mut last_space: Option<usize> = None;
        let mut width = 0.0;
        let mut i = 0;

        while i < chars.len() {
            let c = chars[i];
            if c == ' ' {
                last_space = Some(i);
            }
            width += measure(c);
            if width > max_width && i > start {
                match last_space {
                    Some(space) if space > start => {
                        paragraph_lines.push(chars[start..space].iter().collect());
                        start = space + 1;
                        // a run of spaces is a single break
                        while start < chars.len() && chars[start] == ' ' {
                            start += 1;
                        }
                    }
                    _ => {
                        paragraph_lines.push(chars[start..i].iter().collect());
                        start = i;
                    }
                }
                last_space = None;
                width = 0.0;
                i = start;
                continue;
            }
            i += 1;
        }

        if start < chars.len() || paragraph_lines.is_empty() {
            paragraph_lines.push(chars[start..].iter().collect());
        }
        lines.extend(paragraph_lines);
    }
    lines
}
