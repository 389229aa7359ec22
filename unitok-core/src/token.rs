//! Token data model: semantic class, text, and role mask.

use std::fmt;

use bitflags::bitflags;

bitflags! {
    /// Role mask attached to every token in the buffer.
    ///
    /// Roles are set, cleared, and transferred in place while a token sits
    /// in the buffer; extracted tokens are treated as frozen.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct TokenRole: u16 {
        /// No space between this token and the next one
        const NOSPACE = 1;
        /// First token of a sentence
        const BEGINOFSENTENCE = 1 << 1;
        /// Last token of a sentence
        const ENDOFSENTENCE = 1 << 2;
        /// First token of a new paragraph (implies BEGINOFSENTENCE)
        const NEWPARAGRAPH = 1 << 3;
        /// Opening quote of a confirmed pair
        const BEGINQUOTE = 1 << 4;
        /// Closing quote of a confirmed pair
        const ENDQUOTE = 1 << 5;
        /// Provisional sentence end, pending quote resolution.
        /// Never visible on completed sentences handed to callers.
        const TEMPENDOFSENTENCE = 1 << 6;
        /// Token was followed by a line break in the input
        const LINEBREAK = 1 << 7;
    }
}

impl fmt::Display for TokenRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "NONE");
        }
        let mut first = true;
        for (name, _) in self.iter_names() {
            if !first {
                write!(f, "|")?;
            }
            write!(f, "{name}")?;
            first = false;
        }
        Ok(())
    }
}

/// Semantic class of a token: one of the fixed classes below, or the id of
/// the rule that matched it (e.g. `ABBREVIATION-KNOWN`, `URL`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenClass(String);

impl TokenClass {
    pub const WORD: &'static str = "WORD";
    pub const NUMBER: &'static str = "NUMBER";
    pub const PUNCTUATION: &'static str = "PUNCTUATION";
    pub const CURRENCY: &'static str = "CURRENCY";
    pub const SYMBOL: &'static str = "SYMBOL";
    pub const EMOTICON: &'static str = "EMOTICON";
    pub const PICTOGRAM: &'static str = "PICTOGRAM";
    pub const SPACE: &'static str = "SPACE";
    pub const UNKNOWN: &'static str = "UNKNOWN";

    pub fn new(id: impl Into<String>) -> Self {
        TokenClass(id.into())
    }

    pub fn word() -> Self {
        TokenClass::new(Self::WORD)
    }

    pub fn number() -> Self {
        TokenClass::new(Self::NUMBER)
    }

    pub fn punctuation() -> Self {
        TokenClass::new(Self::PUNCTUATION)
    }

    pub fn currency() -> Self {
        TokenClass::new(Self::CURRENCY)
    }

    pub fn symbol() -> Self {
        TokenClass::new(Self::SYMBOL)
    }

    pub fn emoticon() -> Self {
        TokenClass::new(Self::EMOTICON)
    }

    pub fn pictogram() -> Self {
        TokenClass::new(Self::PICTOGRAM)
    }

    pub fn space() -> Self {
        TokenClass::new(Self::SPACE)
    }

    pub fn unknown() -> Self {
        TokenClass::new(Self::UNKNOWN)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for `PUNCTUATION` and rule-specific refinements of it
    /// (`PUNCTUATION-MULTI` and friends).
    pub fn is_punctuation(&self) -> bool {
        self.0.starts_with(Self::PUNCTUATION)
    }

    /// Classes removed from the output by the punctuation filter.
    pub fn is_filterable(&self) -> bool {
        self.is_punctuation()
            || self.0 == Self::CURRENCY
            || self.0 == Self::EMOTICON
            || self.0 == Self::PICTOGRAM
    }
}

impl fmt::Display for TokenClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TokenClass {
    fn from(id: &str) -> Self {
        TokenClass::new(id)
    }
}

impl PartialEq<str> for TokenClass {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for TokenClass {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// The unit produced by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Semantic class (rule id or fixed class)
    pub class: TokenClass,
    /// Unicode text of the token; a `{{TYPE}}` placeholder when the class
    /// is in the normalization set
    pub text: String,
    /// Role mask
    pub role: TokenRole,
    /// Language tag of the rule set that produced the token
    pub lang: Option<String>,
}

impl Token {
    pub fn new(class: TokenClass, text: impl Into<String>, role: TokenRole) -> Self {
        Token {
            class,
            text: text.into(),
            role,
            lang: None,
        }
    }

    /// First code point of the token text, if any.
    pub fn first_char(&self) -> Option<char> {
        self.text.chars().next()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} : {} : {}", self.class, self.role, self.text)
    }
}
