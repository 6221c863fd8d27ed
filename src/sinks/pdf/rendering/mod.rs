//! PDF rendering orchestration.
//!
//! A recipe is laid out top to bottom in a fixed section order, regardless of the
//! order fields appear in the YAML file:
//!
//! Title block → Components → Ingredients → Optional → Steps → Alternative Steps →
//! Substitutions → Garnishes → Notes
//!
//! Each section is only present when the recipe has that field. The optional
//! section is the exception: an empty list or mapping renders no section at all.
//!
//! ## Page Footers
//!
//! The footer shows the total page count, which is only known once everything has
//! been laid out. Footers are therefore added by a separate pass over all pages
//! (see [`header_footer::render_footers()`]) after the content pass is complete.
//!
//! ## Output
//!
//! Layout produces a [`DocumentLayout`], which is only turned into PDF bytes at the
//! very end. This keeps layout testable without parsing PDF files: two layouts of
//! the same recipe compare equal.

mod components;
mod header;
mod header_footer;
mod lists;
mod title_page;

use crate::format::{format_ingredient, format_substitution};
use crate::recipe::{Ingredient, Recipe};
use crate::sinks::pdf::config::{RenderStats, PDF};
use crate::sinks::pdf::fonts::LoadedFonts;
use crate::sinks::pdf::layout::DocumentLayout;
use crate::sinks::pdf::writer::write_pdf;
use anyhow::{Context, Result};
use std::path::Path;

/// Horizontal extent of section rules
const RULE_X1: f32 = 20.0;
const RULE_X2: f32 = 190.0;
/// Start and width of list text at indent 0
const LIST_X: f32 = 22.0;
const LIST_WIDTH: f32 = 166.0;
/// Start of the labels inside a component block
const LABEL_X: f32 = 26.0;
/// Indent of the lists inside a component block
const COMPONENT_INDENT: f32 = 10.0;
/// Section headers below this start on a new page
const SECTION_BREAK_Y: f32 = 250.0;

/// Lays out one recipe into a [`DocumentLayout`].
struct RecipeWriter<'a> {
    config: &'a PDF,
    fonts: &'a LoadedFonts,
    layout: DocumentLayout,
}

impl<'a> RecipeWriter<'a> {
    fn new(config: &'a PDF, fonts: &'a LoadedFonts, title: &str) -> RecipeWriter<'a> {
        RecipeWriter {
            config,
            fonts,
            layout: DocumentLayout::new(title),
        }
    }

    fn write_recipe(&mut self, recipe: &Recipe) {
        self.render_title_block(recipe);

        if let Some(components) = &recipe.components {
            self.render_section_header("Components");
            for component in components {
                self.render_component(component);
            }
        }

        if let Some(ingredients) = &recipe.ingredients {
            self.render_section_header("Ingredients");
            self.render_ingredients(ingredients, 0.0);
        }

        if let Some(optional) = &recipe.optional {
            self.render_optional_section(optional);
        }

        if let Some(steps) = &recipe.steps {
            self.render_section_header("Steps");
            self.render_steps(steps, 0.0);
        }

        if let Some(steps) = &recipe.steps_alt {
            self.render_section_header("Alternative Steps");
            self.render_steps(steps, 0.0);
        }

        if let Some(substitutions) = &recipe.substitutions {
            self.render_section_header("Substitutions");
            for substitution in substitutions {
                self.bullet_line(&format_substitution(substitution), 0.0);
            }
        }

        if let Some(garnishes) = &recipe.garnishes {
            self.render_section_header("Garnishes");
            for garnish in garnishes {
                self.bullet_line(&garnish.item, 0.0);
            }
        }

        if let Some(notes) = &recipe.notes {
            self.render_section_header("Notes");
            for note in notes {
                self.bullet_line(note, 0.0);
            }
        }
    }

    fn render_ingredients(&mut self, ingredients: &[Ingredient], indent: f32) {
        for ingredient in ingredients {
            self.bullet_line(&format_ingredient(ingredient), indent);
        }
    }

    fn finish(mut self) -> DocumentLayout {
        header_footer::render_footers(self.config, self.fonts, &mut self.layout);
        self.layout
    }
}

/// Lay out a recipe, footers included, without writing anything.
pub fn lay_out(config: &PDF, fonts: &LoadedFonts, recipe: &Recipe) -> DocumentLayout {
    let mut writer = RecipeWriter::new(config, fonts, &recipe.name);
    writer.write_recipe(recipe);
    writer.finish()
}

impl PDF {
    /// Render a recipe to `outfile`, creating its parent directories.
    pub fn render(&self, recipe: &Recipe, fonts: &LoadedFonts, outfile: &Path) -> Result<RenderStats> {
        let layout = lay_out(self, fonts, recipe);
        let page_count = layout.page_count();

        let bytes = write_pdf(&layout, fonts).with_context(|| "Failed to render PDF")?;

        if let Some(parent) = outfile.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory {}", parent.display())
            })?;
        }
        std::fs::write(outfile, bytes)
            .with_context(|| format!("Failed to write {}", outfile.display()))?;

        Ok(RenderStats { page_count })
    }
}
