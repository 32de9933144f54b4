//! Canonical book registry and alias normalization.
//!
//! The registry is the source of truth for book identity: 66 books, each with
//! a canonical code, display name, testament, traditional author, genre, and
//! canonical position. The alias table maps the many ways people write a
//! book name ("1 Cor", "1cor", "Ps") onto those codes.
//!
//! Both tables are immutable and built once on first use.

use crate::error::UnknownBookError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Which half of the canon a book belongs to.
///
/// Ordered `OT < NT` so that facet maps list the Old Testament first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Testament {
    #[serde(rename = "OT")]
    Old,
    #[serde(rename = "NT")]
    New,
}

impl Testament {
    /// Short code used in storage and output ("OT" / "NT").
    pub fn code(&self) -> &'static str {
        match self {
            Testament::Old => "OT",
            Testament::New => "NT",
        }
    }
}

impl fmt::Display for Testament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One entry of the canonical registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Book {
    pub code: &'static str,
    pub name: &'static str,
    pub testament: Testament,
    pub author: &'static str,
    pub genre: &'static str,
    /// Position in the canon, 1..=66
    pub order: u8,
}

const fn book(
    code: &'static str,
    name: &'static str,
    testament: Testament,
    author: &'static str,
    genre: &'static str,
    order: u8,
) -> Book {
    Book {
        code,
        name,
        testament,
        author,
        genre,
        order,
    }
}

use Testament::{New as NT, Old as OT};

/// The 66 books of the Protestant canon in canonical order.
pub static BOOKS: [Book; 66] = [
    book("GEN", "Genesis", OT, "Moses", "Law", 1),
    book("EXO", "Exodus", OT, "Moses", "Law", 2),
    book("LEV", "Leviticus", OT, "Moses", "Law", 3),
    book("NUM", "Numbers", OT, "Moses", "Law", 4),
    book("DEU", "Deuteronomy", OT, "Moses", "Law", 5),
    book("JOS", "Joshua", OT, "Joshua", "History", 6),
    book("JDG", "Judges", OT, "Samuel", "History", 7),
    book("RUT", "Ruth", OT, "Samuel", "History", 8),
    book("1SA", "1 Samuel", OT, "Samuel", "History", 9),
    book("2SA", "2 Samuel", OT, "Samuel", "History", 10),
    book("1KI", "1 Kings", OT, "Jeremiah", "History", 11),
    book("2KI", "2 Kings", OT, "Jeremiah", "History", 12),
    book("1CH", "1 Chronicles", OT, "Ezra", "History", 13),
    book("2CH", "2 Chronicles", OT, "Ezra", "History", 14),
    book("EZR", "Ezra", OT, "Ezra", "History", 15),
    book("NEH", "Nehemiah", OT, "Nehemiah", "History", 16),
    book("EST", "Esther", OT, "Mordecai", "History", 17),
    book("JOB", "Job", OT, "Moses", "Wisdom", 18),
    book("PSA", "Psalms", OT, "David", "Wisdom", 19),
    book("PRO", "Proverbs", OT, "Solomon", "Wisdom", 20),
    book("ECC", "Ecclesiastes", OT, "Solomon", "Wisdom", 21),
    book("SNG", "Song of Songs", OT, "Solomon", "Wisdom", 22),
    book("ISA", "Isaiah", OT, "Isaiah", "Prophecy", 23),
    book("JER", "Jeremiah", OT, "Jeremiah", "Prophecy", 24),
    book("LAM", "Lamentations", OT, "Jeremiah", "Prophecy", 25),
    book("EZK", "Ezekiel", OT, "Ezekiel", "Prophecy", 26),
    book("DAN", "Daniel", OT, "Daniel", "Prophecy", 27),
    book("HOS", "Hosea", OT, "Hosea", "Prophecy", 28),
    book("JOL", "Joel", OT, "Joel", "Prophecy", 29),
    book("AMO", "Amos", OT, "Amos", "Prophecy", 30),
    book("OBA", "Obadiah", OT, "Obadiah", "Prophecy", 31),
    book("JON", "Jonah", OT, "Jonah", "Prophecy", 32),
    book("MIC", "Micah", OT, "Micah", "Prophecy", 33),
    book("NAM", "Nahum", OT, "Nahum", "Prophecy", 34),
    book("HAB", "Habakkuk", OT, "Habakkuk", "Prophecy", 35),
    book("ZEP", "Zephaniah", OT, "Zephaniah", "Prophecy", 36),
    book("HAG", "Haggai", OT, "Haggai", "Prophecy", 37),
    book("ZEC", "Zechariah", OT, "Zechariah", "Prophecy", 38),
    book("MAL", "Malachi", OT, "Malachi", "Prophecy", 39),
    book("MAT", "Matthew", NT, "Matthew", "Gospel", 40),
    book("MRK", "Mark", NT, "Mark", "Gospel", 41),
    book("LUK", "Luke", NT, "Luke", "Gospel", 42),
    book("JHN", "John", NT, "John", "Gospel", 43),
    book("ACT", "Acts", NT, "Luke", "History", 44),
    book("ROM", "Romans", NT, "Paul", "Epistle", 45),
    book("1CO", "1 Corinthians", NT, "Paul", "Epistle", 46),
    book("2CO", "2 Corinthians", NT, "Paul", "Epistle", 47),
    book("GAL", "Galatians", NT, "Paul", "Epistle", 48),
    book("EPH", "Ephesians", NT, "Paul", "Epistle", 49),
    book("PHP", "Philippians", NT, "Paul", "Epistle", 50),
    book("COL", "Colossians", NT, "Paul", "Epistle", 51),
    book("1TH", "1 Thessalonians", NT, "Paul", "Epistle", 52),
    book("2TH", "2 Thessalonians", NT, "Paul", "Epistle", 53),
    book("1TI", "1 Timothy", NT, "Paul", "Epistle", 54),
    book("2TI", "2 Timothy", NT, "Paul", "Epistle", 55),
    book("TIT", "Titus", NT, "Paul", "Epistle", 56),
    book("PHM", "Philemon", NT, "Paul", "Epistle", 57),
    book("HEB", "Hebrews", NT, "Paul", "Epistle", 58),
    book("JAS", "James", NT, "James", "Epistle", 59),
    book("1PE", "1 Peter", NT, "Peter", "Epistle", 60),
    book("2PE", "2 Peter", NT, "Peter", "Epistle", 61),
    book("1JN", "1 John", NT, "John", "Epistle", 62),
    book("2JN", "2 John", NT, "John", "Epistle", 63),
    book("3JN", "3 John", NT, "John", "Epistle", 64),
    book("JUD", "Jude", NT, "Jude", "Epistle", 65),
    book("REV", "Revelation", NT, "John", "Prophecy", 66),
];

/// Explicit aliases, lowercase. Display names are added automatically.
#[rustfmt::skip]
const ALIASES: &[(&str, &str)] = &[
    // Law
    ("gen", "GEN"), ("ge", "GEN"), ("gn", "GEN"),
    ("exo", "EXO"), ("ex", "EXO"), ("exod", "EXO"),
    ("lev", "LEV"), ("le", "LEV"), ("lv", "LEV"),
    ("num", "NUM"), ("nu", "NUM"), ("nm", "NUM"), ("nb", "NUM"),
    ("deut", "DEU"), ("deu", "DEU"), ("dt", "DEU"), ("de", "DEU"),
    // History
    ("josh", "JOS"), ("jos", "JOS"), ("jsh", "JOS"),
    ("judg", "JDG"), ("jdg", "JDG"), ("jg", "JDG"), ("jgs", "JDG"),
    ("rut", "RUT"), ("ru", "RUT"), ("rth", "RUT"),
    ("1sam", "1SA"), ("1sa", "1SA"), ("1s", "1SA"), ("1 sam", "1SA"),
    ("2sam", "2SA"), ("2sa", "2SA"), ("2s", "2SA"), ("2 sam", "2SA"),
    ("1king", "1KI"), ("1ki", "1KI"), ("1k", "1KI"), ("1 king", "1KI"),
    ("2king", "2KI"), ("2ki", "2KI"), ("2k", "2KI"), ("2 king", "2KI"),
    ("1chron", "1CH"), ("1chr", "1CH"), ("1ch", "1CH"), ("1 chron", "1CH"),
    ("2chron", "2CH"), ("2chr", "2CH"), ("2ch", "2CH"), ("2 chron", "2CH"),
    ("ezr", "EZR"), ("ez", "EZR"),
    ("neh", "NEH"), ("ne", "NEH"),
    ("est", "EST"), ("es", "EST"),
    // Wisdom
    ("jb", "JOB"),
    ("psalm", "PSA"), ("psa", "PSA"), ("ps", "PSA"), ("pss", "PSA"),
    ("prov", "PRO"), ("pro", "PRO"), ("pr", "PRO"), ("prv", "PRO"),
    ("eccl", "ECC"), ("ecc", "ECC"), ("ec", "ECC"), ("qoh", "ECC"),
    ("songofsolomon", "SNG"), ("song of solomon", "SNG"), ("song", "SNG"),
    ("sng", "SNG"), ("so", "SNG"), ("sos", "SNG"), ("canticles", "SNG"),
    // Prophets
    ("isa", "ISA"), ("is", "ISA"),
    ("jer", "JER"), ("je", "JER"), ("jr", "JER"),
    ("lam", "LAM"), ("la", "LAM"),
    ("ezek", "EZK"), ("eze", "EZK"), ("ezk", "EZK"),
    ("dan", "DAN"), ("da", "DAN"), ("dn", "DAN"),
    ("hos", "HOS"), ("ho", "HOS"),
    ("jl", "JOL"),
    ("amo", "AMO"), ("am", "AMO"),
    ("obad", "OBA"), ("oba", "OBA"), ("ob", "OBA"),
    ("jon", "JON"), ("jnh", "JON"),
    ("mic", "MIC"), ("mi", "MIC"),
    ("nah", "NAM"), ("na", "NAM"),
    ("hab", "HAB"), ("hb", "HAB"),
    ("zeph", "ZEP"), ("zep", "ZEP"), ("zp", "ZEP"),
    ("hag", "HAG"), ("hg", "HAG"),
    ("zech", "ZEC"), ("zec", "ZEC"), ("zc", "ZEC"),
    ("mal", "MAL"), ("ml", "MAL"),
    // Gospels and Acts
    ("matt", "MAT"), ("mat", "MAT"), ("mt", "MAT"),
    ("mrk", "MRK"), ("mk", "MRK"), ("mar", "MRK"),
    ("luk", "LUK"), ("lk", "LUK"), ("lu", "LUK"),
    ("jhn", "JHN"), ("jn", "JHN"), ("joh", "JHN"),
    ("act", "ACT"), ("ac", "ACT"),
    // Epistles
    ("rom", "ROM"), ("ro", "ROM"), ("rm", "ROM"),
    ("1cor", "1CO"), ("1co", "1CO"), ("1c", "1CO"), ("1 cor", "1CO"),
    ("2cor", "2CO"), ("2co", "2CO"), ("2c", "2CO"), ("2 cor", "2CO"),
    ("gal", "GAL"), ("ga", "GAL"),
    ("eph", "EPH"), ("ep", "EPH"),
    ("phil", "PHP"), ("php", "PHP"), ("pp", "PHP"),
    ("col", "COL"), ("co", "COL"),
    ("1thess", "1TH"), ("1th", "1TH"), ("1t", "1TH"), ("1 thess", "1TH"),
    ("2thess", "2TH"), ("2th", "2TH"), ("2t", "2TH"), ("2 thess", "2TH"),
    ("1tim", "1TI"), ("1ti", "1TI"), ("1 tim", "1TI"),
    ("2tim", "2TI"), ("2ti", "2TI"), ("2 tim", "2TI"),
    ("tit", "TIT"), ("ti", "TIT"),
    ("phlm", "PHM"), ("phm", "PHM"), ("pm", "PHM"),
    ("heb", "HEB"), ("he", "HEB"),
    ("jas", "JAS"), ("jm", "JAS"), ("ja", "JAS"),
    ("1pet", "1PE"), ("1pe", "1PE"), ("1p", "1PE"), ("1 pet", "1PE"),
    ("2pet", "2PE"), ("2pe", "2PE"), ("2p", "2PE"), ("2 pet", "2PE"),
    ("1jn", "1JN"), ("1j", "1JN"),
    ("2jn", "2JN"), ("2j", "2JN"),
    ("3jn", "3JN"), ("3j", "3JN"),
    ("jud", "JUD"), ("jd", "JUD"),
    ("rev", "REV"), ("re", "REV"), ("rv", "REV"),
];

static BOOKS_BY_CODE: Lazy<HashMap<&'static str, &'static Book>> =
    Lazy::new(|| BOOKS.iter().map(|book| (book.code, book)).collect());

static ALIAS_MAP: Lazy<HashMap<String, &'static str>> = Lazy::new(|| {
    let mut map: HashMap<String, &'static str> = ALIASES
        .iter()
        .map(|(alias, code)| (alias.to_string(), *code))
        .collect();

    // Every display name resolves, with and without its internal spaces
    for book in BOOKS.iter() {
        let lower = book.name.to_lowercase();
        map.entry(strip_whitespace(&lower)).or_insert(book.code);
        map.entry(lower).or_insert(book.code);
    }

    map
});

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Resolves a free-form book name to its canonical code.
///
/// The name is lower-cased and looked up twice: first with all whitespace
/// removed ("1 corinthians" → "1corinthians"), then with whitespace kept
/// ("1 cor"). There is no fuzzy matching at this layer.
///
/// # Examples
///
/// ```
/// use concordance_core::reference::normalize_book_name;
///
/// assert_eq!(normalize_book_name("1 Cor").unwrap(), "1CO");
/// assert_eq!(normalize_book_name("jn").unwrap(), "JHN");
/// assert!(normalize_book_name("Hezekiah").is_err());
/// ```
pub fn normalize_book_name(raw: &str) -> Result<&'static str, UnknownBookError> {
    let lower = raw.trim().to_lowercase();

    if let Some(code) = ALIAS_MAP.get(&strip_whitespace(&lower)) {
        return Ok(*code);
    }

    if let Some(code) = ALIAS_MAP.get(&collapse_whitespace(&lower)) {
        return Ok(*code);
    }

    Err(UnknownBookError(raw.trim().to_string()))
}

/// Looks up a registry entry by canonical code (case-sensitive, e.g. "JHN").
pub fn book_by_code(code: &str) -> Option<&'static Book> {
    BOOKS_BY_CODE.get(code).copied()
}

/// Display name for a code, or the code itself if it is not in the registry.
pub fn display_name(code: &str) -> &str {
    book_by_code(code).map(|book| book.name).unwrap_or(code)
}

/// All registry entries in canonical order.
pub fn all_books() -> &'static [Book] {
    &BOOKS
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_registry_has_39_ot_and_27_nt() {
        let ot = BOOKS.iter().filter(|b| b.testament == Testament::Old).count();
        let nt = BOOKS.iter().filter(|b| b.testament == Testament::New).count();
        assert_eq!(ot, 39);
        assert_eq!(nt, 27);
    }

    #[test]
    fn test_canonical_order_is_bijection() {
        let orders: HashSet<u8> = BOOKS.iter().map(|b| b.order).collect();
        assert_eq!(orders.len(), 66);
        assert!(orders.iter().all(|o| (1..=66).contains(o)));
        for (i, book) in BOOKS.iter().enumerate() {
            assert_eq!(book.order as usize, i + 1, "{} out of order", book.code);
        }
    }

    #[test]
    fn test_codes_are_unique_and_short() {
        let codes: HashSet<&str> = BOOKS.iter().map(|b| b.code).collect();
        assert_eq!(codes.len(), 66);
        assert!(BOOKS.iter().all(|b| (3..=4).contains(&b.code.len())));
    }

    #[test]
    fn test_every_alias_targets_a_registry_code() {
        for (alias, code) in ALIASES {
            assert!(book_by_code(code).is_some(), "alias {alias} -> {code}");
        }
    }

    #[test]
    fn test_every_book_has_several_aliases() {
        for book in BOOKS.iter() {
            let count = ALIAS_MAP.values().filter(|c| **c == book.code).count();
            assert!(count >= 2, "{} has only {} aliases", book.code, count);
        }
    }

    #[test]
    fn test_normalize_common_forms() {
        assert_eq!(normalize_book_name("John").unwrap(), "JHN");
        assert_eq!(normalize_book_name("JOHN").unwrap(), "JHN");
        assert_eq!(normalize_book_name("  gen ").unwrap(), "GEN");
        assert_eq!(normalize_book_name("Psalm").unwrap(), "PSA");
        assert_eq!(normalize_book_name("Song of Solomon").unwrap(), "SNG");
        assert_eq!(normalize_book_name("Song of Songs").unwrap(), "SNG");
        assert_eq!(normalize_book_name("Rev").unwrap(), "REV");
    }

    #[test]
    fn test_normalize_numbered_books_with_and_without_space() {
        assert_eq!(normalize_book_name("1 Corinthians").unwrap(), "1CO");
        assert_eq!(normalize_book_name("1Corinthians").unwrap(), "1CO");
        assert_eq!(normalize_book_name("2 Tim").unwrap(), "2TI");
        assert_eq!(normalize_book_name("2tim").unwrap(), "2TI");
        assert_eq!(normalize_book_name("3 John").unwrap(), "3JN");
        assert_eq!(normalize_book_name("1  kings").unwrap(), "1KI");
    }

    #[test]
    fn test_normalize_unknown_book() {
        let err = normalize_book_name("Maccabees").unwrap_err();
        assert_eq!(err, UnknownBookError("Maccabees".to_string()));
        assert!(normalize_book_name("").is_err());
    }

    #[test]
    fn test_alias_idempotence_through_display_name() {
        for (alias, code) in ALIASES {
            let first = normalize_book_name(alias).unwrap();
            assert_eq!(first, *code);
            let again = normalize_book_name(display_name(first)).unwrap();
            assert_eq!(again, first, "alias {alias}");
        }
    }

    #[test]
    fn test_display_name_falls_back_to_code() {
        assert_eq!(display_name("JHN"), "John");
        assert_eq!(display_name("XYZ"), "XYZ");
    }

    #[test]
    fn test_testament_serde_codes() {
        assert_eq!(serde_json::to_string(&Testament::Old).unwrap(), "\"OT\"");
        let nt: Testament = serde_json::from_str("\"NT\"").unwrap();
        assert_eq!(nt, Testament::New);
        assert!(Testament::Old < Testament::New);
    }
}
