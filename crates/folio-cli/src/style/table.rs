//! Table formatting using comfy-table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use folio::LibraryView;

fn styled_table(columns: &[&str]) -> Table {
    let mut table = Table::new();

    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let header_cells: Vec<Cell> = columns
        .iter()
        .map(|col| {
            if super::no_color() {
                Cell::new(col)
            } else {
                Cell::new(col)
                    .add_attribute(Attribute::Bold)
                    .fg(Color::Cyan)
            }
        })
        .collect();
    table.set_header(header_cells);

    table
}

/// Books with their author resolved against the authors slice.
pub fn books_table(view: &LibraryView<'_>) -> Table {
    let mut table = styled_table(&["#", "Title", "Author"]);

    for (index, book) in view.books().iter().enumerate() {
        let author = match (&book.author, view.author_of(book)) {
            (Some(name), Some(_)) => Cell::new(name),
            (Some(name), None) if super::no_color() => Cell::new(format!("{name} (unknown)")),
            (Some(name), None) => Cell::new(format!("{name} (unknown)")).fg(Color::Yellow),
            (None, _) => Cell::new("-"),
        };
        table.add_row(vec![Cell::new(index + 1), Cell::new(&book.title), author]);
    }

    table
}

/// Authors with the number of books referring to them.
pub fn authors_table(view: &LibraryView<'_>) -> Table {
    let mut table = styled_table(&["#", "Name", "Books"]);

    for (index, author) in view.authors().iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&author.name),
            Cell::new(view.books_by(&author.name).len()),
        ]);
    }

    table
}
