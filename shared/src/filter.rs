//! Per-column text filters for the record tables, and the option search of
//! searchable selects.

use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// How cell text is compared with a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MatchMode {
    /// Case-insensitive substring match.
    #[default]
    IgnoreCase,
    /// Case- and accent-insensitive substring match (`JESUS` finds `JESÚS`).
    IgnoreCaseAndAccents,
}

impl MatchMode {
    /// Normalize text for comparison.
    pub fn fold(self, text: &str) -> String {
        match self {
            MatchMode::IgnoreCase => text.to_uppercase(),
            MatchMode::IgnoreCaseAndAccents => strip_accents(text).to_uppercase(),
        }
    }

    pub fn contains(self, haystack: &str, needle: &str) -> bool {
        self.fold(haystack).contains(&self.fold(needle))
    }
}

/// Decompose and drop combining marks: `"RIAÑO"` → `"RIANO"`.
pub fn strip_accents(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}

/// One text predicate per column.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableFilter {
    predicates: Vec<String>,
    mode: MatchMode,
}

impl TableFilter {
    pub fn new(columns: usize) -> Self {
        Self::with_mode(columns, MatchMode::IgnoreCase)
    }

    pub fn with_mode(columns: usize, mode: MatchMode) -> Self {
        Self {
            predicates: vec![String::new(); columns],
            mode,
        }
    }

    /// Set the predicate of a column; columns outside the table are ignored.
    pub fn set(&mut self, column: usize, value: &str) {
        if let Some(predicate) = self.predicates.get_mut(column) {
            *predicate = value.to_string();
        }
    }

    pub fn clear(&mut self) {
        self.predicates.iter_mut().for_each(String::clear);
    }

    pub fn predicates(&self) -> &[String] {
        &self.predicates
    }

    pub fn is_active(&self) -> bool {
        self.predicates.iter().any(|p| !p.trim().is_empty())
    }

    /// A row matches iff every non-empty predicate is a substring of its cell.
    pub fn matches<S: AsRef<str>>(&self, cells: &[S]) -> bool {
        self.predicates.iter().enumerate().all(|(column, predicate)| {
            let predicate = predicate.trim();
            if predicate.is_empty() {
                return true;
            }
            let cell = cells.get(column).map(|c| c.as_ref()).unwrap_or("");
            self.mode.contains(cell, predicate)
        })
    }

    /// Indices of the visible rows, in input order.
    pub fn visible_rows<R, S>(&self, rows: &[R]) -> Vec<usize>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        rows.iter()
            .enumerate()
            .filter(|(_, row)| {
                let cells: &[S] = (*row).as_ref();
                self.matches(cells)
            })
            .map(|(index, _)| index)
            .collect()
    }
}

/// Option list of a select narrowed by a search box.
///
/// The empty placeholder option always stays listed. The selected value is
/// reset to the placeholder when a search hides it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchableSelect {
    options: Vec<String>,
    query: String,
    value: String,
}

impl SearchableSelect {
    pub fn new(options: &[String]) -> Self {
        Self {
            options: options.to_vec(),
            query: String::new(),
            value: String::new(),
        }
    }

    /// Visible options, placeholder (`""`) first.
    pub fn visible_options(&self) -> Vec<&str> {
        let query = self.query.trim();
        std::iter::once("")
            .chain(
                self.options
                    .iter()
                    .map(String::as_str)
                    .filter(|o| !o.is_empty())
                    .filter(|o| query.is_empty() || MatchMode::IgnoreCaseAndAccents.contains(o, query)),
            )
            .collect()
    }

    /// Replace the option list. A different list clears the search, and the
    /// selected value survives only if the new list has it. Returns whether
    /// anything changed.
    pub fn set_options(&mut self, options: &[String]) -> bool {
        if self.options.as_slice() == options {
            return false;
        }
        self.options = options.to_vec();
        self.query.clear();
        if !self.visible_options().contains(&self.value.as_str()) {
            self.value.clear();
        }
        true
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        if !self.visible_options().contains(&self.value.as_str()) {
            self.value.clear();
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Select an option; values that are not visible select the placeholder.
    pub fn select(&mut self, value: &str) {
        self.value = if self.visible_options().contains(&value) {
            value.to_string()
        } else {
            String::new()
        };
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Vec<String>> {
        [
            ["14/03/2026 09:15:00", "NEQUI", "MERCADO", "JESÚS"],
            ["15/03/2026 10:00:00", "DAVIVIENDA", "CARROS", "TT"],
            ["16/03/2026 11:30:00", "NEQUI", "OCIO", "PENDIENTE"],
        ]
        .iter()
        .map(|row| row.iter().map(|c| c.to_string()).collect())
        .collect()
    }

    #[test]
    fn test_empty_predicates_show_every_row() {
        let filter = TableFilter::new(4);
        assert!(!filter.is_active());
        assert_eq!(filter.visible_rows(&rows()), vec![0, 1, 2]);

        let mut filter = TableFilter::new(4);
        filter.set(1, "   ");
        assert_eq!(filter.visible_rows(&rows()), vec![0, 1, 2]);
    }

    #[test]
    fn test_predicate_matching_nothing_hides_everything() {
        let mut filter = TableFilter::new(4);
        filter.set(2, "INVERSIONES");
        assert!(filter.visible_rows(&rows()).is_empty());
    }

    #[test]
    fn test_case_insensitive_substring() {
        let mut filter = TableFilter::new(4);
        filter.set(1, "neq");
        assert_eq!(filter.visible_rows(&rows()), vec![0, 2]);

        filter.set(2, "oc");
        assert_eq!(filter.visible_rows(&rows()), vec![2]);

        filter.clear();
        assert_eq!(filter.visible_rows(&rows()).len(), 3);
    }

    #[test]
    fn test_accents_only_ignored_in_accent_mode() {
        let mut plain = TableFilter::new(4);
        plain.set(3, "jesus");
        assert!(plain.visible_rows(&rows()).is_empty());

        let mut folded = TableFilter::with_mode(4, MatchMode::IgnoreCaseAndAccents);
        folded.set(3, "jesus");
        assert_eq!(folded.visible_rows(&rows()), vec![0]);
    }

    #[test]
    fn test_missing_cell_fails_non_empty_predicate() {
        let mut filter = TableFilter::new(6);
        filter.set(5, "X");
        assert!(!filter.matches(&["A", "B"]));
        filter.set(7, "ignored");
        assert_eq!(filter.predicates().len(), 6);
    }

    #[test]
    fn test_strip_accents() {
        assert_eq!(strip_accents("DANIELA RIAÑO"), "DANIELA RIANO");
        assert_eq!(strip_accents("ITAÚ-APTOS"), "ITAU-APTOS");
        assert_eq!(strip_accents("PAGO_NÓMINA"), "PAGO_NOMINA");
    }

    #[test]
    fn test_searchable_select_keeps_placeholder() {
        let options: Vec<String> = ["NICOLLE LEÓN", "DANIELA RIAÑO", "DIANA GOMEZ"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let mut select = SearchableSelect::new(&options);
        assert_eq!(select.visible_options().len(), 4);

        select.set_query("leon");
        assert_eq!(select.visible_options(), vec!["", "NICOLLE LEÓN"]);

        select.set_query("zzz");
        assert_eq!(select.visible_options(), vec![""]);
    }

    #[test]
    fn test_searchable_select_value_survives_only_if_listed() {
        let options: Vec<String> = ["DIANA GOMEZ", "DANIELA RIAÑO"].iter().map(|s| s.to_string()).collect();
        let mut select = SearchableSelect::new(&options);
        select.select("DIANA GOMEZ");

        select.set_query("gom");
        assert_eq!(select.value(), "DIANA GOMEZ");

        select.set_query("riano");
        assert_eq!(select.value(), "");

        select.select("DIANA GOMEZ");
        assert_eq!(select.value(), "");
        select.select("DANIELA RIAÑO");
        assert_eq!(select.value(), "DANIELA RIAÑO");
    }

    #[test]
    fn test_new_option_list_clears_search() {
        let software: Vec<String> = ["LOOM", "CANVA", "ZOOM"].iter().map(|s| s.to_string()).collect();
        let mercado: Vec<String> = ["JESÚS", "FELIPE", "MARLON"].iter().map(|s| s.to_string()).collect();
        let mut select = SearchableSelect::new(&software);
        select.set_query("loom");
        select.select("LOOM");

        assert!(!select.set_options(&software));
        assert_eq!(select.query(), "loom");

        assert!(select.set_options(&mercado));
        assert_eq!(select.query(), "");
        assert_eq!(select.value(), "");
        assert_eq!(select.visible_options(), vec!["", "JESÚS", "FELIPE", "MARLON"]);
    }
}
