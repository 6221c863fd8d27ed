//! Metrics and glyph coverage for the built-in Helvetica faces.
//!
//! The standard 14 fonts aren't embedded, so there is no font file to measure.
//! Widths below are the AFM advance widths (1/1000 em) for printable ASCII.

use std::borrow::Cow;

#[rustfmt::skip]
const REGULAR_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,                               // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015,                                             // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,                // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,                // 'N'..'Z'
    278, 278, 278, 469, 556, 333,                                                   // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,                // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,                // 'n'..'z'
    334, 260, 334, 584,                                                             // '{'..'~'
];

#[rustfmt::skip]
const BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

const BULLET_WIDTH: u16 = 350;
const DEFAULT_WIDTH: u16 = 556;

/// Advance width of `c` in 1/1000 em.
pub fn advance(c: char, bold: bool) -> u16 {
    let table = if bold { &BOLD_WIDTHS } else { &REGULAR_WIDTHS };
    match c {
        ' '..='~' => table[c as usize - ' ' as usize],
        '\u{2022}' => BULLET_WIDTH,
        _ => DEFAULT_WIDTH,
    }
}

/// Replace characters the built-in fonts can't draw.
///
/// Latin-1 and the bullet are kept; common typographic punctuation is spelled
/// out in ASCII and everything else becomes `?`.
pub fn to_drawable(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_drawable) {
        return Cow::Borrowed(text);
    }

    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            c if is_drawable(c) => result.push(c),
            '\u{2192}' => result.push_str("->"),
            '\u{25B8}' | '\u{25B6}' => result.push('>'),
            '\u{2018}' | '\u{2019}' => result.push('\''),
            '\u{201C}' | '\u{201D}' => result.push('"'),
            '\u{2013}' => result.push('-'),
            '\u{2014}' => result.push_str("--"),
            '\u{2026}' => result.push_str("..."),
            _ => result.push('?'),
        }
    }
    Cow::Owned(result)
}

fn is_drawable(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}' | '\u{2022}')
}
