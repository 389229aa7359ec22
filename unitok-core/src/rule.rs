//! Named regex rules with the capture-group-aware `match_all` contract.

use regex::Regex;

use crate::error::{Error, Result};

/// A single tokenization rule. The id doubles as the class of every token
/// the rule emits.
#[derive(Debug, Clone)]
pub struct Rule {
    id: String,
    pattern: Regex,
}

/// Decomposition of an input string around the first rule match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleMatch {
    /// Text before the match (re-tokenized recursively)
    pub pre: String,
    /// The matched fragments, one token each
    pub matches: Vec<String>,
    /// Text after the match (re-tokenized recursively)
    pub post: String,
}

impl Rule {
    /// Compile a rule. An invalid pattern is fatal at configuration time.
    pub fn new(id: impl Into<String>, pattern: &str) -> Result<Self> {
        let id = id.into();
        let pattern = Regex::new(pattern).map_err(|source| Error::Rule {
            id: id.clone(),
            source: Box::new(source),
        })?;
        Ok(Rule { id, pattern })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Locate the first match of the pattern in `input`.
    ///
    /// - With no capture groups, the whole match is the single result.
    /// - With one group, the group is the result; an unmatched group falls
    ///   back to the whole match.
    /// - With two or more groups, every present group becomes a result;
    ///   text between consecutive groups is discarded. `pre` is the text
    ///   before the first present group, `post` the text after the last.
    pub fn match_all(&self, input: &str) -> Option<RuleMatch> {
        let caps = self.pattern.captures(input)?;
        let group_count = caps.len() - 1;

        if group_count == 1 {
            if let Some(g) = caps.get(1) {
                return Some(RuleMatch {
                    pre: input[..g.start()].to_string(),
                    matches: vec![g.as_str().to_string()],
                    post: input[g.end()..].to_string(),
                });
            }
            // group absent: behave like a group-less rule
        } else if group_count > 1 {
            let present: Vec<_> = (1..=group_count).filter_map(|i| caps.get(i)).collect();
            if let (Some(first), Some(last)) = (present.first(), present.last()) {
                return Some(RuleMatch {
                    pre: input[..first.start()].to_string(),
                    matches: present.iter().map(|g| g.as_str().to_string()).collect(),
                    post: input[last.end()..].to_string(),
                });
            }
        }

        let whole = caps.get(0)?;
        Some(RuleMatch {
            pre: input[..whole.start()].to_string(),
            matches: vec![whole.as_str().to_string()],
            post: input[whole.end()..].to_string(),
        })
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}=\"{}\"", self.id, self.pattern)
    }
}
