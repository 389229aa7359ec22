//! Quote pairings and the per-stream stack of unresolved opening quotes.

use smallvec::SmallVec;

use crate::unicode;

/// One open/close pairing. Each side is a class: a string of alternative
/// code points (e.g. `“„‟` all close with `”`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotePair {
    pub open: String,
    pub close: String,
}

/// Static table of quote pairings for a language.
#[derive(Debug, Clone, Default)]
pub struct QuoteTable {
    pairs: Vec<QuotePair>,
}

impl QuoteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, open: impl Into<String>, close: impl Into<String>) {
        self.pairs.push(QuotePair {
            open: open.into(),
            close: close.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn pairs(&self) -> &[QuotePair] {
        &self.pairs
    }

    /// If `c` opens some pair, the class of code points that closes it.
    pub fn open_to_close(&self, c: char) -> Option<&str> {
        self.pairs
            .iter()
            .find(|p| p.open.contains(c))
            .map(|p| p.close.as_str())
    }

    /// If `c` closes some pair, the class of code points that opens it.
    pub fn close_to_open(&self, c: char) -> Option<&str> {
        self.pairs
            .iter()
            .find(|p| p.close.contains(c))
            .map(|p| p.open.as_str())
    }

    /// True if `c` is a quote character: carries the `Quotation_Mark`
    /// property (or is a spacing grave/acute accent) or appears in the
    /// table in either direction.
    pub fn is_quote(&self, c: char) -> bool {
        unicode::has_quotation_mark(c)
            || self.open_to_close(c).is_some()
            || self.close_to_open(c).is_some()
    }
}

/// An opening quote whose match has not yet been seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuoteEntry {
    /// The opening code point as it appeared in the input
    pub open: char,
    /// Buffer index of the opening token
    pub index: usize,
}

/// Stack of unresolved opening quotes, holding buffer indices so that a
/// flush can rebase them with a plain subtraction.
#[derive(Debug, Clone, Default)]
pub struct QuoteStack {
    entries: SmallVec<[QuoteEntry; 8]>,
}

impl QuoteStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, index: usize, open: char) {
        self.entries.push(QuoteEntry { open, index });
    }

    /// Scan top-down for the first entry whose opening code point lies in
    /// `open_class`; returns `(buffer_index, stack_slot)`.
    pub fn lookup(&self, open_class: &str) -> Option<(usize, usize)> {
        self.entries
            .iter()
            .enumerate()
            .rev()
            .find(|(_, e)| open_class.contains(e.open))
            .map(|(slot, e)| (e.index, slot))
    }

    pub fn erase_at(&mut self, slot: usize) {
        self.entries.remove(slot);
    }

    /// Drop entries whose index falls below `boundary` (their tokens were
    /// just erased) and rebase the rest.
    pub fn flush(&mut self, boundary: usize) {
        self.entries.retain(|e| e.index >= boundary);
        for e in &mut self.entries {
            e.index -= boundary;
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> QuoteTable {
        let mut t = QuoteTable::new();
        t.add("\"", "\"");
        t.add("‘", "’");
        t.add("“„‟", "”");
        t
    }

    #[test]
    fn test_table_lookups() {
        let t = table();
        assert_eq!(t.open_to_close('„'), Some("”"));
        assert_eq!(t.open_to_close('“'), Some("”"));
        assert_eq!(t.close_to_open('”'), Some("“„‟"));
        assert_eq!(t.close_to_open('’'), Some("‘"));
        assert_eq!(t.open_to_close('x'), None);
    }

    #[test]
    fn test_is_quote() {
        let t = table();
        assert!(t.is_quote('"'));
        assert!(t.is_quote('„'));
        assert!(t.is_quote('`'));
        assert!(!t.is_quote('a'));
    }

    #[test]
    fn test_stack_lookup_is_top_down() {
        let mut s = QuoteStack::new();
        s.push(2, '“');
        s.push(5, '„');
        // both lie in the open class of the same pair; the later one wins
        assert_eq!(s.lookup("“„‟"), Some((5, 1)));
        s.erase_at(1);
        assert_eq!(s.lookup("“„‟"), Some((2, 0)));
        assert_eq!(s.lookup("‘"), None);
    }

    #[test]
    fn test_stack_flush_rebases() {
        let mut s = QuoteStack::new();
        s.push(1, '"');
        s.push(4, '“');
        s.push(9, '‘');
        s.flush(4);
        assert_eq!(s.len(), 2);
        assert_eq!(s.lookup("“„‟"), Some((0, 0)));
        assert_eq!(s.lookup("‘"), Some((5, 1)));
    }

    #[test]
    fn test_stack_clear() {
        let mut s = QuoteStack::new();
        s.push(0, '"');
        s.clear();
        assert!(s.is_empty());
    }
}
