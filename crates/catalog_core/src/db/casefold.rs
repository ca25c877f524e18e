//! Locale-independent case folding shared by Rust and SQL code paths.
//!
//! SQLite's built-in `lower()` and `LIKE` only fold ASCII letters, so names
//! such as `THUỐC` would never match `thuốc`. The `casefold(text)` SQL
//! function defined here applies the Unicode default lowercase mapping,
//! which does not depend on the process locale (no Turkish dotless-i rules).
//!
//! Folding is per character, never context-sensitive: final sigma `ς` folds
//! to `σ` wherever it appears, so a literal substring of a name always folds
//! to a substring of the folded name.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

/// SQL name of the registered folding function.
pub const CASEFOLD_SQL_FUNCTION: &str = "casefold";

/// Folds `value` for case-insensitive comparison.
pub fn casefold(value: &str) -> String {
    value
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c == 'ς' { 'σ' } else { c })
        .collect()
}

/// Registers `casefold(text)` on the given connection.
///
/// `NULL` input yields `NULL`.
pub fn register_casefold_function(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        CASEFOLD_SQL_FUNCTION,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value = ctx.get::<Option<String>>(0)?;
            Ok(value.map(|text| casefold(&text)))
        },
    )
}

#[cfg(test)]
mod tests {
    use super::{casefold, register_casefold_function};
    use rusqlite::Connection;

    #[test]
    fn casefold_ignores_locale_specific_rules() {
        assert_eq!(casefold("TITLE"), "title");
        assert_eq!(casefold("Vitamins"), "vitamins");
        assert_eq!(casefold("KHÁNG SINH"), "kháng sinh");
    }

    #[test]
    fn casefold_maps_sigma_the_same_everywhere() {
        assert_eq!(casefold("ΟΔΟΣ"), "οδοσ");
        assert_eq!(casefold("ΟΣΟ"), "οσο");
        assert_eq!(casefold("Σ"), "σ");
        assert_eq!(casefold("οδος"), "οδοσ");
    }

    #[test]
    fn casefold_keeps_turkish_letters_distinct() {
        assert_eq!(casefold("İ"), "i\u{307}");
        assert_eq!(casefold("ı"), "ı");
        assert_eq!(casefold("I"), "i");
    }

    #[test]
    fn sql_function_matches_rust_folding() {
        let conn = Connection::open_in_memory().unwrap();
        register_casefold_function(&conn).unwrap();

        let folded: String = conn
            .query_row("SELECT casefold(?1);", ["THUỐC Giảm Đau"], |row| row.get(0))
            .unwrap();
        assert_eq!(folded, casefold("THUỐC Giảm Đau"));

        let null_value: Option<String> = conn
            .query_row("SELECT casefold(NULL);", [], |row| row.get(0))
            .unwrap();
        assert_eq!(null_value, None);
    }
}
