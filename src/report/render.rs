//! DOCX serialization of the assembled document via `docx-rs`.

use std::io::Cursor;

use docx_rs::{
    AlignmentType, BorderType, BreakType, Docx, Header, PageMargin, Pic, RunFonts, Shading,
    TableCell, TableCellBorder, TableCellBorderPosition, TableRow, WidthType,
};

use super::document::{Alignment, Block, Cell, Paragraph, ReportDocument, Run, Table};
use super::ReportError;

/// Border width in eighths of a point.
const CELL_BORDER_SIZE: usize = 12;
const CELL_BORDER_COLOR: &str = "000000";

/// Write the document as DOCX bytes.
pub fn render_docx(document: &ReportDocument) -> Result<Vec<u8>, ReportError> {
    let mut buf = Vec::new();
    build_docx(document)
        .build()
        .pack(Cursor::new(&mut buf))
        .map_err(|e| ReportError::Pack(e.to_string()))?;

    log::debug!("Packed report document ({} bytes)", buf.len());
    Ok(buf)
}

/// Map the document model onto a docx-rs document without packing it.
pub fn build_docx(document: &ReportDocument) -> Docx {
    let page = document.page;
    let margin = page.margin_twips;

    let mut docx = Docx::new()
        .default_fonts(
            RunFonts::new()
                .ascii(page.font_family)
                .hi_ansi(page.font_family)
                .cs(page.font_family),
        )
        .default_size(page.font_size_pt * 2)
        .page_margin(
            PageMargin::new()
                .top(margin)
                .bottom(margin)
                .left(margin)
                .right(margin),
        )
        .header(Header::new().add_table(to_docx_table(&document.header)));

    for block in &document.body {
        docx = match block {
            Block::Paragraph(p) => docx.add_paragraph(to_docx_paragraph(p)),
            Block::Table(t) => docx.add_table(to_docx_table(t)),
        };
    }
    docx
}

fn to_docx_alignment(alignment: Alignment) -> AlignmentType {
    match alignment {
        Alignment::Left => AlignmentType::Left,
        Alignment::Center => AlignmentType::Center,
        Alignment::Right => AlignmentType::Right,
    }
}

fn to_docx_run(run: &Run) -> docx_rs::Run {
    match run {
        Run::Text(t) => {
            let mut r = docx_rs::Run::new().add_text(t.text.as_str());
            if t.bold {
                r = r.bold();
            }
            if t.italic {
                r = r.italic();
            }
            if let Some(pt) = t.size_pt {
                r = r.size(pt * 2);
            }
            if let Some(color) = t.color {
                r = r.color(color);
            }
            r
        }
        Run::Image(img) => docx_rs::Run::new().add_image(
            Pic::new_with_dimensions(img.png.clone(), img.width_px, img.height_px)
                .size(img.width_emu, img.height_emu),
        ),
        Run::LineBreak => docx_rs::Run::new().add_break(BreakType::TextWrapping),
    }
}

fn to_docx_paragraph(paragraph: &Paragraph) -> docx_rs::Paragraph {
    paragraph.runs.iter().fold(
        docx_rs::Paragraph::new().align(to_docx_alignment(paragraph.alignment)),
        |p, run| p.add_run(to_docx_run(run)),
    )
}

fn to_docx_cell(cell: &Cell) -> TableCell {
    let mut c = cell
        .paragraphs
        .iter()
        .fold(TableCell::new(), |c, p| c.add_paragraph(to_docx_paragraph(p)));

    if let Some(width) = cell.width_twips {
        c = c.width(width, WidthType::Dxa);
    }
    if let Some(fill) = cell.shading {
        c = c.shading(Shading::new().fill(fill));
    }
    if cell.bordered {
        for position in [
            TableCellBorderPosition::Top,
            TableCellBorderPosition::Left,
            TableCellBorderPosition::Bottom,
            TableCellBorderPosition::Right,
        ] {
            c = c.set_border(
                TableCellBorder::new(position)
                    .border_type(BorderType::Single)
                    .size(CELL_BORDER_SIZE)
                    .color(CELL_BORDER_COLOR),
            );
        }
    }
    c
}

fn to_docx_table(table: &Table) -> docx_rs::Table {
    let rows: Vec<TableRow> = table
        .rows
        .iter()
        .map(|row| TableRow::new(row.iter().map(to_docx_cell).collect()))
        .collect();

    let t = if table.borderless {
        docx_rs::Table::without_borders(rows)
    } else {
        docx_rs::Table::new(rows)
    };
    t.set_grid(table.grid.clone())
}
