//! SQL DDL for initializing the catalog table.
//! SQLite-first design; the table is not meant to survive restarts.

/// Drops and recreates the `lib` table, then seeds the three starter rows.
/// Row 1 uses an empty-string holder; empty and NULL both mean "unheld".
pub const SQLITE_INIT: &str = r"
DROP TABLE IF EXISTS lib;

CREATE TABLE IF NOT EXISTS lib (
    id INTEGER PRIMARY KEY,
    name TEXT,
    holder TEXT
);

INSERT INTO lib (id, name, holder) VALUES
    (1, 'Dr. Seuss', ''),
    (2, 'Harry Potter', 'Alice'),
    (3, 'Dr. Seuss', 'Bob');
";
