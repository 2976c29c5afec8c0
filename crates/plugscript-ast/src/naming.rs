//! Naming and scanning helpers shared by the extractors and rewrite rules

/// Capitalize a DSL name into a Java class-name fragment
///
/// The first character is upper-cased and the rest lower-cased:
/// - hello -> Hello
/// - playerJoin -> Playerjoin
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Find the closing brace matching an already-consumed opening brace
///
/// Scanning starts at depth 0 just past the `{`. String literals (`"`, `'`,
/// backtick), `//` line comments and `/* */` block comments are skipped so
/// braces and quotes inside them do not count. Returns the byte index of the
/// matching `}`.
pub fn find_matching_brace(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            quote @ (b'"' | b'\'' | b'`') => {
                i = skip_string(bytes, i + 1, quote)?;
            }
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = skip_block_comment(bytes, i + 2)?;
            }
            b'{' => depth += 1,
            b'}' => {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Index of the closing quote of a literal whose body starts at `start`
fn skip_string(bytes: &[u8], start: usize, quote: u8) -> Option<usize> {
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b if b == quote => return Some(i),
            _ => i += 1,
        }
    }
    None
}

/// Index of the `/` closing a block comment whose body starts at `start`
fn skip_block_comment(bytes: &[u8], start: usize) -> Option<usize> {
    let mut i = start;
    while i + 1 < bytes.len() {
        if bytes[i] == b'*' && bytes[i + 1] == b'/' {
            return Some(i + 1);
        }
        i += 1;
    }
    None
}

/// Trim a block and indent every line by `indent`
pub fn reindent(block: &str, indent: &str) -> String {
    block
        .trim()
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", indent, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
