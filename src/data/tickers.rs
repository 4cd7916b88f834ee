//! Ticker suggestion database.
//!
//! A small built-in symbol/name list backs the search box. Dropping a
//! `tickers.csv` (columns `symbol,name`) into the working directory replaces
//! it with a fuller universe; an unreadable or malformed file silently falls
//! back to the built-in list.
//!
//! Lookups are synchronous and in-memory, so the classic autocomplete
//! staleness problem (older in-flight results arriving after newer ones)
//! cannot occur: the latest query is always the one answered.

use std::path::Path;

use crate::error::AppError;

/// Default suggestion universe (common large caps).
const DEFAULT_TICKERS: &[(&str, &str)] = &[
    ("AAPL", "Apple Inc"),
    ("MSFT", "Microsoft Corporation"),
    ("GOOGL", "Alphabet Inc Class A"),
    ("GOOG", "Alphabet Inc Class C"),
    ("AMZN", "Amazon.com Inc"),
    ("META", "Meta Platforms Inc"),
    ("TSLA", "Tesla Inc"),
    ("NFLX", "Netflix Inc"),
    ("NVDA", "NVIDIA Corporation"),
    ("IBM", "International Business Machines"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub symbol: String,
    pub name: String,
}

pub struct TickerDb {
    entries: Vec<(String, String)>,
}

impl TickerDb {
    /// Load `tickers.csv` from the working directory, else the built-in list.
    pub fn load_default() -> Self {
        Self::from_csv(Path::new("tickers.csv")).unwrap_or_else(|_| Self::builtin())
    }

    pub fn builtin() -> Self {
        Self {
            entries: DEFAULT_TICKERS
                .iter()
                .map(|(s, n)| (s.to_string(), n.to_string()))
                .collect(),
        }
    }

    /// Read a `symbol,name` CSV into a database.
    pub fn from_csv(path: &Path) -> Result<Self, AppError> {
        let mut reader = csv::Reader::from_path(path)
            .map_err(|e| AppError::usage(format!("Failed to read '{}': {e}", path.display())))?;

        let headers = reader
            .headers()
            .map_err(|e| AppError::usage(format!("Failed to read CSV headers: {e}")))?
            .clone();
        let symbol_idx = header_index(&headers, "symbol")
            .ok_or_else(|| AppError::usage("tickers.csv is missing a 'symbol' column."))?;
        let name_idx = header_index(&headers, "name")
            .ok_or_else(|| AppError::usage("tickers.csv is missing a 'name' column."))?;

        let mut entries = Vec::new();
        for record in reader.records() {
            let record =
                record.map_err(|e| AppError::usage(format!("Failed to read CSV row: {e}")))?;
            let symbol = record.get(symbol_idx).unwrap_or("").trim().to_uppercase();
            let name = record.get(name_idx).unwrap_or("").trim().to_string();
            if !symbol.is_empty() {
                entries.push((symbol, name));
            }
        }

        if entries.is_empty() {
            return Err(AppError::usage("tickers.csv contains no usable rows."));
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rank suggestions for a query.
    ///
    /// Order: symbol prefix matches, then name substring matches, then
    /// symbol substring matches. Deduplicated by symbol, capped at `max`.
    /// An empty query yields nothing.
    pub fn suggest(&self, query: &str, max: usize) -> Vec<Suggestion> {
        let q = query.trim().to_lowercase();
        if q.is_empty() || max == 0 {
            return Vec::new();
        }

        let mut out: Vec<Suggestion> = Vec::new();
        let mut push = |symbol: &str, name: &str, out: &mut Vec<Suggestion>| {
            if out.len() < max && !out.iter().any(|s| s.symbol == symbol) {
                out.push(Suggestion {
                    symbol: symbol.to_string(),
                    name: name.to_string(),
                });
            }
        };

        for (symbol, name) in &self.entries {
            if symbol.to_lowercase().starts_with(&q) {
                push(symbol, name, &mut out);
            }
        }
        for (symbol, name) in &self.entries {
            if name.to_lowercase().contains(&q) {
                push(symbol, name, &mut out);
            }
        }
        for (symbol, name) in &self.entries {
            if symbol.to_lowercase().contains(&q) {
                push(symbol, name, &mut out);
            }
        }

        out
    }
}

fn header_index(headers: &csv::StringRecord, wanted: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(wanted))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_suggests_nothing() {
        let db = TickerDb::builtin();
        assert!(db.suggest("", 8).is_empty());
        assert!(db.suggest("   ", 8).is_empty());
    }

    #[test]
    fn symbol_prefix_outranks_name_match() {
        let db = TickerDb::builtin();
        let got = db.suggest("m", 8);

        // MSFT and META are prefix matches; names containing "m" come later.
        assert!(got.len() >= 2);
        assert_eq!(got[0].symbol, "MSFT");
        assert_eq!(got[1].symbol, "META");
    }

    #[test]
    fn name_substring_matches_are_found() {
        let db = TickerDb::builtin();
        let got = db.suggest("alphabet", 8);

        let symbols: Vec<&str> = got.iter().map(|s| s.symbol.as_str()).collect();
        assert!(symbols.contains(&"GOOGL"));
        assert!(symbols.contains(&"GOOG"));
    }

    #[test]
    fn results_are_deduplicated_and_capped() {
        let db = TickerDb::builtin();

        let got = db.suggest("a", 3);
        assert!(got.len() <= 3);

        let all = db.suggest("a", 100);
        let mut symbols: Vec<&str> = all.iter().map(|s| s.symbol.as_str()).collect();
        symbols.sort();
        symbols.dedup();
        assert_eq!(symbols.len(), all.len(), "duplicate symbols in suggestions");
    }

    #[test]
    fn case_is_ignored() {
        let db = TickerDb::builtin();
        assert_eq!(db.suggest("aapl", 8), db.suggest("AAPL", 8));
    }
}
