/*!
simple_usage.rs

Demonstrates:
- building an `Index` over an in-memory `MemoryStore` from a list of
  `(word, frequency)` pairs
- building the same index over a SQLite-backed `PersistentStore`
- looking up suggestions with each `Verbosity` level

Run with:
    cargo run --example simple_usage
*/

use rusqlite::Connection;
use symspellrs::{Index, MemoryStore, PersistentStore, Suggestion, Verbosity};

fn print_suggestions(title: &str, suggestions: &[Suggestion]) {
    println!("-- {} ({} suggestions) --", title, suggestions.len());
    for s in suggestions {
        let term = s.term_str().unwrap_or("<non-utf8>");
        println!(
            "  term: {:<12} distance: {:>2} frequency: {}",
            term, s.distance, s.frequency
        );
    }
}

const ENTRIES: &[(&str, i64)] = &[
    ("hello", 1000),
    ("hell", 50),
    ("help", 100),
    ("world", 500),
    ("test", 200),
    ("tost", 40),
    ("apple", 20),
    ("apply", 10),
];

fn example_memory_store() {
    println!("=== In-memory store ===");
    let mut index = Index::new(MemoryStore::new()).unwrap();
    for (word, freq) in ENTRIES {
        index.insert(word.as_bytes(), *freq);
    }

    let top = index.lookup(b"helo", Verbosity::Top, -1);
    print_suggestions("Top suggestion for 'helo'", &top);

    let closest = index.lookup(b"helo", Verbosity::Closest, -1);
    print_suggestions("Closest suggestions for 'helo'", &closest);

    let all = index.lookup(b"appl", Verbosity::All, -1);
    print_suggestions("All suggestions for 'appl'", &all);
}

fn example_persistent_store() {
    println!("\n=== SQLite-backed store ===");
    let conn = Connection::open_in_memory().expect("open sqlite connection");
    let store = PersistentStore::new(conn).expect("create schema");
    let mut index = Index::new(store).unwrap();
    for (word, freq) in ENTRIES {
        index.insert(word.as_bytes(), *freq);
    }

    let closest = index.lookup(b"wrld", Verbosity::Closest, -1);
    print_suggestions("Closest suggestions for 'wrld'", &closest);
}

fn main() {
    println!("symspellrs example: MemoryStore and PersistentStore backends\n");

    example_memory_store();
    example_persistent_store();

    println!("\nDone.");
}
