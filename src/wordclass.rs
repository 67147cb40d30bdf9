//! Word classification for word-wise deletion
//!
//! `DELETE_WORD_LEFT`/`DELETE_WORD_RIGHT` draw the word/non-word line at a
//! fixed, narrower set than general Unicode word-boundary rules: whitespace
//! and a short list of sentence/clause punctuation are "non-word", and
//! everything else — including most punctuation, symbols, and all
//! alphanumerics — is "word". This intentionally does not reuse a
//! three-way (whitespace/alphanumeric/symbol) classifier: word kill only
//! ever needs a binary split.

/// True if `c` is one of the characters the word-kill operations treat as a
/// separator: whitespace, comma, period, semicolon, bang, question mark.
#[must_use]
pub fn is_non_word(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '.' | ';' | '!' | '?')
}

/// True if `c` is part of a word for word-kill purposes.
#[must_use]
pub fn is_word_char(c: char) -> bool {
    !is_non_word(c)
}

#[cfg(test)]
#[path = "wordclass_tests.rs"]
mod tests;
