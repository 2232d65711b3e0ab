//! Reader for Java `.properties` files

use std::collections::HashMap;

/// Parse a `.properties` document.
///
/// Follows the `java.util.Properties` line format: `#`/`!` comments, a line
/// ending in an odd number of backslashes continues on the next line (its
/// leading whitespace dropped), the key ends at the first unescaped `=`,
/// `:` or whitespace, and `\t`, `\n`, `\r`, `\f`, `\uXXXX` and `\<c>`
/// escapes are decoded in keys and values. Later keys override earlier ones.
pub fn parse(content: &str) -> HashMap<String, String> {
    logical_lines(content)
        .iter()
        .map(|line| {
            let (key, value) = split_entry(line);
            (unescape(key), unescape(value))
        })
        .collect()
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\x0c'
}

fn logical_lines(content: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut pending: Option<String> = None;

    for raw in content.lines() {
        let trimmed = raw.trim_start_matches(is_blank);

        if pending.is_none()
            && (trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!'))
        {
            continue;
        }

        let trailing = trimmed.len() - trimmed.trim_end_matches('\\').len();
        let continues = trailing % 2 == 1;
        let body = if continues {
            &trimmed[..trimmed.len() - 1]
        } else {
            trimmed
        };

        let mut line = pending.take().unwrap_or_default();
        line.push_str(body);
        if continues {
            pending = Some(line);
        } else {
            lines.push(line);
        }
    }

    if let Some(line) = pending {
        lines.push(line);
    }

    lines
}

fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (idx, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = idx;
                break;
            }
            c if is_blank(c) => {
                key_end = idx;
                break;
            }
            _ => {}
        }
    }

    let rest = line[key_end..].trim_start_matches(is_blank);
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest);

    (&line[..key_end], rest.trim_start_matches(is_blank))
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }

        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                match u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32) {
                    Some(decoded) if hex.len() == 4 => out.push(decoded),
                    _ => {
                        out.push_str("\\u");
                        out.push_str(&hex);
                    }
                }
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    out
}
