//! Registration, listing and discovery commands

use anyhow::{bail, Result};
use libapp_core::table::render_books;
use libapp_core::{Book, CatalogEntry, CatalogService};

/// Register a new book
pub fn add(service: &mut CatalogService, isbn: &str, title: &str, author: &str) -> Result<()> {
    if let Err(reason) = CatalogEntry::new(isbn, title, author).validate() {
        bail!(reason);
    }
    let book = service.register_book(isbn, title, author)?;
    println!("Added {} ({}) by {}", book.title, book.isbn, book.author);
    Ok(())
}

/// Print the catalog as a table
pub fn list(service: &CatalogService, available_only: bool) -> Result<()> {
    println!("{}", render_books(&service.list_books(available_only)));
    Ok(())
}

/// Search titles
pub fn search(service: &CatalogService, fragment: &str) -> Result<()> {
    print_matches(&service.search_by_title(fragment));
    Ok(())
}

/// Search authors
pub fn author(service: &CatalogService, fragment: &str) -> Result<()> {
    print_matches(&service.search_by_author(fragment));
    Ok(())
}

/// Print books per author
pub fn summary(service: &CatalogService) -> Result<()> {
    for entry in service.usage_summary() {
        println!("{}: {} book(s)", entry.author, entry.count);
    }
    Ok(())
}

fn print_matches(books: &[Book]) {
    if books.is_empty() {
        println!("No matches found.");
    } else {
        println!("{}", render_books(books));
    }
}
