// src/config/normalize.rs

//! Line normalisation: comment stripping and whitespace trimming.

/// Character that starts a trailing comment.
pub const COMMENT_CHAR: char = '#';

/// Strip a trailing comment and surrounding spaces/tabs from a raw line.
///
/// The comment starts at the first `#` that is not escaped as `\#`. Escaped
/// hashes before the comment are kept as a literal `#`.
///
/// ```
/// use simple_analysis::config::normalize::normalize;
///
/// assert_eq!(normalize("  out.dat   # output"), "out.dat");
/// assert_eq!(normalize("# only a comment"), "");
/// assert_eq!(normalize(r"h\#1 = px"), "h#1 = px");
/// ```
pub fn normalize(line: &str) -> String {
    let mut kept = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&COMMENT_CHAR) => {
                kept.push(COMMENT_CHAR);
                chars.next();
            }
            COMMENT_CHAR => break,
            other => kept.push(other),
        }
    }

    kept.trim_matches(is_blank).to_string()
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}
