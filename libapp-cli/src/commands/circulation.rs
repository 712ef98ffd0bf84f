//! Borrow and return commands

use anyhow::Result;
use libapp_core::CatalogService;

/// Borrow a book
pub fn borrow(service: &mut CatalogService, isbn: &str, borrower: &str) -> Result<()> {
    let book = service.borrow_book(isbn, borrower)?;
    println!("{} borrowed by {}", book.title, borrower);
    Ok(())
}

/// Return a borrowed book
pub fn return_book(service: &mut CatalogService, isbn: &str) -> Result<()> {
    let book = service.return_book(isbn)?;
    println!("{} returned", book.title);
    Ok(())
}
