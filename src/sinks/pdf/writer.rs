//! Serialization of a [`DocumentLayout`] to PDF bytes with `printpdf`.

use crate::sinks::pdf::fonts::{LoadedFonts, Weight};
use crate::sinks::pdf::layout::{Colour, DocumentLayout, Element, Page, PAGE_HEIGHT, PAGE_WIDTH};
use anyhow::{anyhow, Result};
use printpdf::font::ParsedFont;
use printpdf::graphics::{LinePoint, PaintMode, Point, Polygon, PolygonRing, WindingOrder};
use printpdf::text::TextItem;
use printpdf::{BuiltinFont, FontId, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, Pt, Rgb, TextMatrix};

/// The fonts as registered with one PDF document.
enum DocumentFonts {
    Embedded { regular: FontId, bold: FontId },
    Builtin,
}

impl DocumentFonts {
    fn register(doc: &mut PdfDocument, fonts: &LoadedFonts) -> Result<DocumentFonts> {
        match fonts {
            LoadedFonts::Embedded { regular, bold } => {
                let mut warnings = Vec::new();
                let regular_font = ParsedFont::from_bytes(&regular.data, 0, &mut warnings)
                    .ok_or_else(|| anyhow!("Failed to parse font {}", regular.path.display()))?;
                let bold_font = ParsedFont::from_bytes(&bold.data, 0, &mut warnings)
                    .ok_or_else(|| anyhow!("Failed to parse font {}", bold.path.display()))?;
                Ok(DocumentFonts::Embedded {
                    regular: doc.add_font(&regular_font),
                    bold: doc.add_font(&bold_font),
                })
            }
            LoadedFonts::Builtin => Ok(DocumentFonts::Builtin),
        }
    }
}

fn to_pdf_colour(colour: Colour) -> printpdf::color::Color {
    printpdf::color::Color::Rgb(Rgb::new(
        colour.r as f32 / 255.0,
        colour.g as f32 / 255.0,
        colour.b as f32 / 255.0,
        None,
    ))
}

fn mm_to_pt(mm: f32) -> f32 {
    Mm(mm).into_pt().0
}

/// Layout coordinates run down from the top, PDF coordinates up from the bottom.
fn point(x_mm: f32, y_mm: f32) -> Point {
    Point {
        x: Pt(mm_to_pt(x_mm)),
        y: Pt(mm_to_pt(PAGE_HEIGHT - y_mm)),
    }
}

fn page_ops(page: &Page, fonts: &DocumentFonts) -> Vec<Op> {
    let mut ops = Vec::new();
    for element in page.elements.iter() {
        match element {
            Element::Text {
                x,
                baseline,
                text,
                style,
            } => {
                ops.push(Op::StartTextSection);
                ops.push(Op::SetFillColor {
                    col: to_pdf_colour(style.colour),
                });
                let size = Pt(style.size_pt);
                let items = vec![TextItem::Text(text.clone())];
                let matrix = TextMatrix::Translate(
                    Pt(mm_to_pt(*x)),
                    Pt(mm_to_pt(PAGE_HEIGHT - baseline)),
                );
                match fonts {
                    DocumentFonts::Embedded { regular, bold } => {
                        let font = match style.weight {
                            Weight::Regular => regular.clone(),
                            Weight::Bold => bold.clone(),
                        };
                        ops.push(Op::SetFontSize {
                            size,
                            font: font.clone(),
                        });
                        ops.push(Op::SetTextMatrix { matrix });
                        ops.push(Op::WriteText { items, font });
                    }
                    DocumentFonts::Builtin => {
                        let font = match style.weight {
                            Weight::Regular => BuiltinFont::Helvetica,
                            Weight::Bold => BuiltinFont::HelveticaBold,
                        };
                        ops.push(Op::SetFontSizeBuiltinFont {
                            size,
                            font: font.clone(),
                        });
                        ops.push(Op::SetTextMatrix { matrix });
                        ops.push(Op::WriteTextBuiltinFont { items, font });
                    }
                }
                ops.push(Op::EndTextSection);
            }
            Element::Rule {
                x1,
                x2,
                y,
                thickness,
                colour,
            } => {
                ops.push(Op::SetOutlineThickness {
                    pt: Pt(mm_to_pt(*thickness)),
                });
                ops.push(Op::SetOutlineColor {
                    col: to_pdf_colour(*colour),
                });
                let polygon = Polygon {
                    rings: vec![PolygonRing {
                        points: vec![
                            LinePoint {
                                p: point(*x1, *y),
                                bezier: false,
                            },
                            LinePoint {
                                p: point(*x2, *y),
                                bezier: false,
                            },
                        ],
                    }],
                    mode: PaintMode::Stroke,
                    winding_order: WindingOrder::EvenOdd,
                };
                ops.push(Op::DrawPolygon { polygon });
            }
        }
    }
    ops
}

/// Turn a finished layout into the bytes of a PDF file.
pub fn write_pdf(layout: &DocumentLayout, fonts: &LoadedFonts) -> Result<Vec<u8>> {
    let mut doc = PdfDocument::new(&layout.title);
    let document_fonts = DocumentFonts::register(&mut doc, fonts)?;

    doc.pages = layout
        .pages
        .iter()
        .map(|page| {
            PdfPage::new(
                Mm(PAGE_WIDTH),
                Mm(PAGE_HEIGHT),
                page_ops(page, &document_fonts),
            )
        })
        .collect();

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);
    for warning in warnings.iter() {
        log::debug!("pdf: {warning:?}");
    }
    Ok(bytes)
}
