//! Plain-text table rendering for terminal output

use crate::types::Book;

/// Render rows under the given headers
///
/// Each column is as wide as its widest cell (header included). The header
/// line is followed by a `-+-` separator, cells are left-justified and joined
/// with `" | "`. Rows shorter than the header are padded with empty cells and
/// cells past the last header are dropped.
pub fn tabulate<H, R, C>(headers: &[H], rows: impl IntoIterator<Item = R>) -> String
where
    H: AsRef<str>,
    R: IntoIterator<Item = C>,
    C: ToString,
{
    let columns = headers.len();
    let rows: Vec<Vec<String>> = rows
        .into_iter()
        .map(|row| {
            let mut cells: Vec<String> =
                row.into_iter().take(columns).map(|c| c.to_string()).collect();
            cells.resize(columns, String::new());
            cells
        })
        .collect();

    let mut widths: Vec<usize> = headers.iter().map(|h| h.as_ref().chars().count()).collect();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_line(headers.iter().map(|h| h.as_ref()), &widths));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in &rows {
        lines.push(format_line(row.iter().map(String::as_str), &widths));
    }
    lines.join("\n")
}

fn format_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect::<Vec<_>>()
        .join(" | ")
}

/// Render books as an `ISBN | Title | Author | Available` table
pub fn render_books(books: &[Book]) -> String {
    let rows = books.iter().map(|book| {
        let available = match book.borrower() {
            None => "yes".to_string(),
            Some(borrower) => format!("no ({})", borrower),
        };
        [
            book.isbn.clone(),
            book.title.clone(),
            book.author.clone(),
            available,
        ]
    });
    tabulate(&["ISBN", "Title", "Author", "Available"], rows)
}
