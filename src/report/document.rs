//! In-memory document model produced by the assembler.
//!
//! The model mirrors the handful of word-processing elements the report uses
//! (paragraphs, runs, tables, shaded and bordered cells, pictures) so the
//! layout can be inspected before it is written out as DOCX.

use super::images::EmbeddedImage;

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// A run of text sharing one formatting.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
    /// Font size in points; `None` inherits the document default.
    pub size_pt: Option<usize>,
    /// Hex RGB color such as `003366`.
    pub color: Option<&'static str>,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn size(mut self, pt: usize) -> Self {
        self.size_pt = Some(pt);
        self
    }

    pub fn color(mut self, hex: &'static str) -> Self {
        self.color = Some(hex);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Run {
    Text(TextRun),
    Image(EmbeddedImage),
    LineBreak,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Paragraph {
    pub alignment: Alignment,
    pub runs: Vec<Run>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty paragraph used as vertical spacing.
    pub fn spacer() -> Self {
        Self::default()
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn text(mut self, run: TextRun) -> Self {
        self.runs.push(Run::Text(run));
        self
    }

    pub fn image(mut self, image: EmbeddedImage) -> Self {
        self.runs.push(Run::Image(image));
        self
    }

    pub fn line_break(mut self) -> Self {
        self.runs.push(Run::LineBreak);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Concatenated text of all text runs.
    pub fn plain_text(&self) -> String {
        self.runs
            .iter()
            .filter_map(|run| match run {
                Run::Text(t) => Some(t.text.as_str()),
                Run::LineBreak => Some("\n"),
                Run::Image(_) => None,
            })
            .collect()
    }

    pub fn image_count(&self) -> usize {
        self.runs
            .iter()
            .filter(|run| matches!(run, Run::Image(_)))
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub paragraphs: Vec<Paragraph>,
    /// Background fill as hex RGB.
    pub shading: Option<&'static str>,
    /// Solid single-line border on all four sides.
    pub bordered: bool,
    /// Preferred width in twentieths of a point.
    pub width_twips: Option<usize>,
}

impl Cell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paragraph(mut self, paragraph: Paragraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }

    pub fn shaded(mut self, fill: &'static str) -> Self {
        self.shading = Some(fill);
        self
    }

    pub fn bordered(mut self) -> Self {
        self.bordered = true;
        self
    }

    pub fn width(mut self, twips: usize) -> Self {
        self.width_twips = Some(twips);
        self
    }

    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn image_count(&self) -> usize {
        self.paragraphs.iter().map(Paragraph::image_count).sum()
    }

    /// Number of paragraphs that hold at least one picture.
    pub fn image_lines(&self) -> usize {
        self.paragraphs
            .iter()
            .filter(|p| p.image_count() > 0)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub rows: Vec<Vec<Cell>>,
    /// Column widths in twips.
    pub grid: Vec<usize>,
    /// Suppress the default grid lines.
    pub borderless: bool,
}

impl Table {
    pub fn new(grid: Vec<usize>) -> Self {
        Self {
            rows: Vec::new(),
            grid,
            borderless: false,
        }
    }

    pub fn borderless(mut self) -> Self {
        self.borderless = true;
        self
    }

    pub fn row(mut self, cells: Vec<Cell>) -> Self {
        self.rows.push(cells);
        self
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

/// Page-wide settings applied to the whole document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSetup {
    pub font_family: &'static str,
    pub font_size_pt: usize,
    /// Uniform margin on all four sides, in twips.
    pub margin_twips: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub page: PageSetup,
    /// Repeated at the top of every page.
    pub header: Table,
    pub body: Vec<Block>,
}

impl ReportDocument {
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.body.iter().filter_map(|block| match block {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        })
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.iter().filter_map(|block| match block {
            Block::Paragraph(p) => Some(p),
            Block::Table(_) => None,
        })
    }

    /// Find the first body paragraph whose text equals `text`.
    pub fn find_paragraph(&self, text: &str) -> Option<&Paragraph> {
        self.paragraphs().find(|p| p.plain_text() == text)
    }
}
