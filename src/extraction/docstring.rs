//! Decoding of Python string literals used as docstrings.
//!
//! Tree-sitter hands back the raw literal text (`"""Doc."""`, `r'...'`,
//! implicitly concatenated pieces). This module turns that text into the
//! value Python itself would report as the docstring: prefix and quotes
//! removed, escapes resolved for non-raw literals, and indentation cleaned
//! the way `inspect.cleandoc` does it.

/// Decode a single string literal. Returns `None` for byte strings,
/// f-strings and text that is not a string literal at all.
pub fn decode_literal(literal: &str) -> Option<String> {
    let prefix_len = literal
        .find(|c: char| c == '"' || c == '\'')
        .filter(|&idx| idx <= 2)?;
    let prefix = literal[..prefix_len].to_ascii_lowercase();
    if prefix.contains('b') || prefix.contains('f') || prefix.chars().any(|c| !"ru".contains(c)) {
        return None;
    }
    let raw = prefix.contains('r');
    let rest = &literal[prefix_len..];

    let quote = if rest.starts_with("\"\"\"") {
        "\"\"\""
    } else if rest.starts_with("'''") {
        "'''"
    } else {
        &rest[..1]
    };
    if rest.len() < quote.len() * 2 || !rest.ends_with(quote) {
        return None;
    }
    let body = &rest[quote.len()..rest.len() - quote.len()];

    Some(if raw {
        body.to_string()
    } else {
        unescape(body)
    })
}

/// Decode an implicitly concatenated literal (`"a" "b"`). Every piece must
/// be a plain string for the whole to count as a docstring.
pub fn decode_concatenated<'a>(pieces: impl IntoIterator<Item = &'a str>) -> Option<String> {
    pieces
        .into_iter()
        .map(decode_literal)
        .collect::<Option<Vec<_>>>()
        .map(|parts| parts.concat())
}

fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            '\n' => {}
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0B}'),
            '0'..='7' => {
                let mut digits = String::from(next);
                while digits.len() < 3 {
                    match chars.peek() {
                        Some(d @ '0'..='7') => {
                            digits.push(*d);
                            chars.next();
                        }
                        _ => break,
                    }
                }
                push_code_point(&mut out, u32::from_str_radix(&digits, 8).ok(), next, &digits);
            }
            'x' => push_hex(&mut out, &mut chars, 2, next),
            'u' => push_hex(&mut out, &mut chars, 4, next),
            'U' => push_hex(&mut out, &mut chars, 8, next),
            other => {
                // Unknown escapes (including \N{...}) are kept verbatim.
                out.push('\\');
                out.push(other);
            }
        }
    }
    out
}

fn push_hex(
    out: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    width: usize,
    marker: char,
) {
    let mut digits = String::new();
    while digits.len() < width {
        match chars.peek() {
            Some(d) if d.is_ascii_hexdigit() => {
                digits.push(*d);
                chars.next();
            }
            _ => break,
        }
    }
    let value = if digits.len() == width {
        u32::from_str_radix(&digits, 16).ok()
    } else {
        None
    };
    push_code_point(out, value, marker, &digits);
}

fn push_code_point(out: &mut String, value: Option<u32>, marker: char, digits: &str) {
    match value.and_then(char::from_u32) {
        Some(ch) => out.push(ch),
        None => {
            out.push('\\');
            if marker.is_ascii_digit() {
                out.push_str(digits);
            } else {
                out.push(marker);
                out.push_str(digits);
            }
        }
    }
}

/// Expand tabs to 8-column stops.
fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0usize;
    for c in line.chars() {
        match c {
            '\t' => {
                let pad = 8 - column % 8;
                out.extend(std::iter::repeat_n(' ', pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

/// Clean up docstring indentation: strip the first line, remove the common
/// indentation of the remaining lines, drop leading/trailing blank lines.
pub fn clean_doc(doc: &str) -> String {
    let expanded = expand_tabs(doc);
    let mut lines: Vec<String> = expanded.split('\n').map(str::to_string).collect();

    // Margin in characters; indentation may be multi-byte whitespace.
    let margin = lines
        .iter()
        .skip(1)
        .filter(|line| !line.trim_start().is_empty())
        .map(|line| line.chars().take_while(|c| c.is_whitespace()).count())
        .min();

    if let Some(first) = lines.first_mut() {
        *first = first.trim_start().to_string();
    }
    if let Some(margin) = margin {
        for line in lines.iter_mut().skip(1) {
            *line = line.chars().skip(margin).collect();
        }
    }

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    let leading = lines.iter().take_while(|l| l.is_empty()).count();
    lines.drain(..leading);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_triple_quoted() {
        assert_eq!(
            decode_literal("\"\"\"Compute losses.\"\"\""),
            Some("Compute losses.".to_string())
        );
        assert_eq!(decode_literal("'''x'''"), Some("x".to_string()));
    }

    #[test]
    fn test_decode_single_quoted_with_escapes() {
        assert_eq!(
            decode_literal(r#""tab\there\nnew \"q\" \x41\u00e9""#),
            Some("tab\there\nnew \"q\" A\u{e9}".to_string())
        );
        assert_eq!(decode_literal(r"'\101\0'"), Some("A\0".to_string()));
    }

    #[test]
    fn test_raw_literal_keeps_backslashes() {
        assert_eq!(
            decode_literal(r#"r"""C:\new\table""""#),
            Some(r"C:\new\table".to_string())
        );
    }

    #[test]
    fn test_line_continuation_is_removed() {
        assert_eq!(
            decode_literal("\"\"\"one \\\ntwo\"\"\""),
            Some("one two".to_string())
        );
    }

    #[test]
    fn test_bytes_and_fstrings_are_not_docstrings() {
        assert_eq!(decode_literal("b'bytes here'"), None);
        assert_eq!(decode_literal("f\"value {x}\""), None);
        assert_eq!(decode_literal("Rb'x'"), None);
        assert_eq!(decode_literal("not_a_string"), None);
    }

    #[test]
    fn test_unicode_prefix_is_accepted() {
        assert_eq!(decode_literal("u'hello'"), Some("hello".to_string()));
    }

    #[test]
    fn test_concatenated_pieces() {
        assert_eq!(
            decode_concatenated(["'Splits the '", "\"input file.\""]),
            Some("Splits the input file.".to_string())
        );
        assert_eq!(decode_concatenated(["'a'", "f'{b}'"]), None);
    }

    #[test]
    fn test_clean_doc_removes_common_indent() {
        let raw = "Summary line.\n\n        Details indented.\n          Nested.\n    ";
        assert_eq!(clean_doc(raw), "Summary line.\n\nDetails indented.\n  Nested.");
    }

    #[test]
    fn test_clean_doc_drops_leading_blank_lines() {
        let raw = "\n    Starts on second line.\n    More.\n";
        assert_eq!(clean_doc(raw), "Starts on second line.\nMore.");
    }

    #[test]
    fn test_clean_doc_expands_tabs() {
        let raw = "First.\n\tTabbed.\n\t    Deeper.";
        assert_eq!(clean_doc(raw), "First.\nTabbed.\n    Deeper.");
    }

    #[test]
    fn test_clean_doc_margin_counts_characters() {
        let raw = "Summary.\n  two spaces\n\u{3000}ideographic";
        assert_eq!(clean_doc(raw), "Summary.\n two spaces\nideographic");

        let zh = "\u{6c47}\u{603b}\u{635f}\u{5931}\n\u{3000}\u{3000}\u{6309}\u{7ec4}\u{5408}\n\u{3000}\u{3000}\u{5e76}\u{8f93}\u{51fa}";
        assert_eq!(
            clean_doc(zh),
            "\u{6c47}\u{603b}\u{635f}\u{5931}\n\u{6309}\u{7ec4}\u{5408}\n\u{5e76}\u{8f93}\u{51fa}"
        );
    }
}
