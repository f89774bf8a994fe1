//! Drools keyword tables
//!
//! Plain keywords are matched against a whole identifier. Consequence
//! blocks (`then ... end`) and `function` bodies hold Java code, so Java's
//! reserved words are keywords too; they are matched the same way, with no
//! knowledge of whether the scanner is inside such a block. Rule attributes
//! such as `no-loop` contain hyphens, so the scanner asks
//! [`hyphenated_keyword_len`] whether the text at an identifier start
//! spells one of them before falling back to a plain identifier.

/// Keywords matched as whole identifiers
const KEYWORDS: &[&str] = &[
    // structure
    "package", "import", "global", "function", "query", "declare", "rule", "end",
    "when", "then", "extends", "template", "type", "unit", "attributes", "enum",
    // conditional elements
    "and", "or", "not", "exists", "forall", "from", "collect", "accumulate",
    "eval", "over", "window", "entry", "acc", "groupby",
    // accumulate functions
    "init", "action", "reverse", "result",
    // constraint operators
    "in", "contains", "matches", "memberOf", "soundslike", "str", "excludes",
    "after", "before", "coincides", "during", "finishes", "includes", "meets",
    "metby", "overlaps", "overlappedby", "starts", "startedby", "instanceof",
    // consequence helpers
    "modify", "insert", "insertLogical", "retract", "update", "delete",
    "drools", "kcontext",
    // rule attributes without hyphens
    "salience", "enabled", "dialect", "duration", "timer", "calendars",
    // literals
    "true", "false", "null", "this",
];

/// Java reserved words seen in consequences and functions, less the ones
/// already in [`KEYWORDS`]
const JAVA_KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char",
    "class", "continue", "default", "do", "double", "else", "final", "finally",
    "float", "for", "if", "int", "interface", "long", "new", "private",
    "protected", "public", "return", "short", "static", "super", "switch",
    "synchronized", "throw", "throws", "transient", "try", "var", "void",
    "volatile", "while",
];

/// Keywords that contain hyphens (mostly rule attributes)
const HYPHENATED_KEYWORDS: &[&str] = &[
    "no-loop",
    "lock-on-active",
    "agenda-group",
    "activation-group",
    "ruleflow-group",
    "auto-focus",
    "date-effective",
    "date-expires",
    "entry-point",
];

/// Upper bound on how far past the end of a token the scanner may read
/// to decide that token.
///
/// The longest probe is a hyphenated keyword attempted at an identifier
/// start: the scanner reads the whole candidate plus one character to
/// check the word boundary. Everything else peeks at most two characters.
pub const MAX_LOOKAHEAD: usize = 24;

/// Check whether an identifier is a keyword
pub fn is_keyword(ident: &str) -> bool {
    KEYWORDS.contains(&ident) || is_java_keyword(ident)
}

/// Check whether an identifier is a Java reserved word
pub fn is_java_keyword(ident: &str) -> bool {
    JAVA_KEYWORDS.contains(&ident)
}

/// If `rest` starts with a hyphenated keyword that ends on a word boundary,
/// return its length in bytes.
pub fn hyphenated_keyword_len(rest: &str) -> Option<usize> {
    HYPHENATED_KEYWORDS
        .iter()
        .filter(|kw| rest.starts_with(*kw))
        .find(|kw| {
            rest[kw.len()..]
                .chars()
                .next()
                .map_or(true, |c| !is_ident_continue(c))
        })
        .map(|kw| kw.len())
}

/// Characters that may start an identifier
pub fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

/// Characters that may continue an identifier
pub fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_keyword() {
        assert!(is_keyword("rule"));
        assert!(is_keyword("when"));
        assert!(is_keyword("memberOf"));
        assert!(!is_keyword("Rule"));
        assert!(!is_keyword("person"));
        assert!(!is_keyword("no-loop"));
    }

    #[test]
    fn test_java_keywords() {
        for word in ["new", "if", "else", "return", "for", "while", "int", "boolean", "void"] {
            assert!(is_java_keyword(word), "{word}");
            assert!(is_keyword(word), "{word}");
        }
        assert!(!is_java_keyword("rule"));
        assert!(!is_java_keyword("String"));
        assert!(!is_keyword("If"));
    }

    #[test]
    fn test_java_table_has_no_duplicates() {
        for word in JAVA_KEYWORDS {
            assert!(!KEYWORDS.contains(word), "{word} is in both tables");
        }
    }

    #[test]
    fn test_hyphenated_keyword_len() {
        assert_eq!(hyphenated_keyword_len("no-loop true"), Some(7));
        assert_eq!(hyphenated_keyword_len("agenda-group \"x\""), Some(12));
        assert_eq!(hyphenated_keyword_len("no-loop"), Some(7));
        // not on a word boundary
        assert_eq!(hyphenated_keyword_len("no-loops"), None);
        assert_eq!(hyphenated_keyword_len("no - loop"), None);
        assert_eq!(hyphenated_keyword_len("no"), None);
    }

    #[test]
    fn test_lookahead_bound_covers_tables() {
        let longest = HYPHENATED_KEYWORDS.iter().map(|kw| kw.len()).max().unwrap_or(0);
        // candidate plus one boundary character, of up to four bytes
        assert!(longest + 4 <= MAX_LOOKAHEAD);
    }

    #[test]
    fn test_ident_chars() {
        assert!(is_ident_start('a'));
        assert!(is_ident_start('_'));
        assert!(is_ident_start('é'));
        assert!(!is_ident_start('1'));
        assert!(!is_ident_start('$'));
        assert!(is_ident_continue('1'));
        assert!(!is_ident_continue('-'));
    }
}
