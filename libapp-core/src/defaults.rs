//! Default catalog content seeded on first use

use crate::types::CatalogEntry;

const DEFAULT_CATALOG: [(&str, &str, &str); 5] = [
    ("9780143127741", "The Alchemist", "Paulo Coelho"),
    ("9780679783268", "Pride and Prejudice", "Jane Austen"),
    ("9780307474278", "The Girl with the Dragon Tattoo", "Stieg Larsson"),
    (
        "9780747532743",
        "Harry Potter and the Philosopher's Stone",
        "J.K. Rowling",
    ),
    ("9780061120084", "To Kill a Mockingbird", "Harper Lee"),
];

/// The seed entries, in seeding order
pub fn default_catalog() -> Vec<CatalogEntry> {
    DEFAULT_CATALOG
        .iter()
        .map(|(isbn, title, author)| CatalogEntry::new(*isbn, *title, *author))
        .collect()
}
