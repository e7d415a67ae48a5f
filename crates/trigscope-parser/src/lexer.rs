//! Line lexer for map source text.
//!
//! Map files are line oriented. [`tokenize`] splits the source on `\n`,
//! `\r\n` or `\r` and classifies every physical line. Classification follows
//! a fixed priority: comment, then key/value entry, then section header,
//! then blank. Anything else is malformed and ignored by later phases.
//! Only a truly empty line is blank; a line of spaces or tabs is malformed.
//! A leading byte-order mark is skipped, spans still count it.
//!
//! A header-looking line that contains `=` is therefore an entry, which is
//! how map editors read it too.

use winnow::{
    Parser as _,
    ascii::space0,
    combinator::{delimited, separated_pair},
    error::{ContextError, ErrMode},
    token::{take_till, take_while},
};

use crate::span::Span;

type Input<'src> = &'src str;
type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

/// What a physical line holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'src> {
    /// `[name]`, name trimmed.
    Header(&'src str),
    /// `key=value`, both trimmed; the key is never empty.
    Entry { key: &'src str, value: &'src str },
    /// `; ...`
    Comment,
    /// Empty, without even whitespace.
    Blank,
    /// Anything else.
    Malformed,
}

/// A classified physical line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLine<'src> {
    /// 1-based line number.
    pub number: usize,
    /// Byte span of the line, excluding its terminator.
    pub span: Span,
    /// Raw line text, excluding its terminator.
    pub text: &'src str,
    pub kind: LineKind<'src>,
}

/// Match the remainder of the line.
fn rest_of_line<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    take_while(0.., |_: char| true).parse_next(input)
}

/// Parse a comment line: `; anything`
fn comment(input: &mut Input<'_>) -> IResult<()> {
    (space0, ';', rest_of_line).void().parse_next(input)
}

/// Parse an entry line: `key = value`
fn entry<'src>(input: &mut Input<'src>) -> IResult<(&'src str, &'src str)> {
    separated_pair(take_till(1.., '='), '=', rest_of_line)
        .map(|(key, value): (&'src str, &'src str)| (key.trim(), value.trim()))
        .parse_next(input)
}

/// Parse a header line: `[name]` with optional surrounding whitespace
fn header<'src>(input: &mut Input<'src>) -> IResult<&'src str> {
    delimited((space0, '['), take_till(0.., ']'), (']', space0))
        .map(str::trim)
        .parse_next(input)
}

/// Classify a single line without its terminator.
pub fn classify(line: &str) -> LineKind<'_> {
    let mut input = line;
    if comment(&mut input).is_ok() {
        return LineKind::Comment;
    }

    let mut input = line;
    if let Ok((key, value)) = entry(&mut input) {
        if !key.is_empty() {
            return LineKind::Entry { key, value };
        }
    }

    let mut input = line;
    if let Ok(name) = header(&mut input) {
        if input.is_empty() {
            return LineKind::Header(name);
        }
    }

    if line.is_empty() {
        LineKind::Blank
    } else {
        LineKind::Malformed
    }
}

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Split `source` into classified physical lines.
pub fn tokenize(source: &str) -> Vec<SourceLine<'_>> {
    let bytes = source.as_bytes();
    let mut lines = Vec::new();
    let mut start = if source.starts_with(BYTE_ORDER_MARK) {
        BYTE_ORDER_MARK.len_utf8()
    } else {
        0
    };
    let mut pos = start;

    while pos < bytes.len() {
        match bytes[pos] {
            b'\n' => {
                push_line(&mut lines, source, start..pos);
                pos += 1;
                start = pos;
            }
            b'\r' => {
                push_line(&mut lines, source, start..pos);
                pos += if bytes.get(pos + 1) == Some(&b'\n') { 2 } else { 1 };
                start = pos;
            }
            _ => pos += 1,
        }
    }
    if start < bytes.len() {
        push_line(&mut lines, source, start..bytes.len());
    }

    lines
}

fn push_line<'src>(
    lines: &mut Vec<SourceLine<'src>>,
    source: &'src str,
    range: std::ops::Range<usize>,
) {
    let text = &source[range.clone()];
    lines.push(SourceLine {
        number: lines.len() + 1,
        span: Span::new(range),
        text,
        kind: classify(text),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_header() {
        assert_eq!(classify("[Triggers]"), LineKind::Header("Triggers"));
        assert_eq!(classify("  [ Tags ]  "), LineKind::Header("Tags"));
        assert_eq!(classify("[]"), LineKind::Header(""));
    }

    #[test]
    fn test_classify_entry() {
        assert_eq!(
            classify("01000000 = Soviet,<none>,Intro,0,1,1,1"),
            LineKind::Entry {
                key: "01000000",
                value: "Soviet,<none>,Intro,0,1,1,1"
            }
        );
        assert_eq!(
            classify("Name=a=b"),
            LineKind::Entry {
                key: "Name",
                value: "a=b"
            }
        );
        assert_eq!(
            classify("Key="),
            LineKind::Entry {
                key: "Key",
                value: ""
            }
        );
    }

    #[test]
    fn test_entry_wins_over_header() {
        assert_eq!(
            classify("[a=b]"),
            LineKind::Entry {
                key: "[a",
                value: "b]"
            }
        );
    }

    #[test]
    fn test_classify_comment_blank_malformed() {
        assert_eq!(classify("; Key=Value"), LineKind::Comment);
        assert_eq!(classify("   ;note"), LineKind::Comment);
        assert_eq!(classify(""), LineKind::Blank);
        assert_eq!(classify("   \t"), LineKind::Malformed);
        assert_eq!(classify("no equals sign"), LineKind::Malformed);
        assert_eq!(classify("=value"), LineKind::Malformed);
        assert_eq!(classify("   =value"), LineKind::Malformed);
        assert_eq!(classify("[unterminated"), LineKind::Malformed);
        assert_eq!(classify("[a] trailing"), LineKind::Malformed);
    }

    #[test]
    fn test_tokenize_line_endings() {
        let source = "[A]\r\nx=1\ry=2\n\nz=3";
        let lines = tokenize(source);
        let kinds: Vec<_> = lines.iter().map(|line| line.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LineKind::Header("A"),
                LineKind::Entry { key: "x", value: "1" },
                LineKind::Entry { key: "y", value: "2" },
                LineKind::Blank,
                LineKind::Entry { key: "z", value: "3" },
            ]
        );
        assert_eq!(lines[4].number, 5);
        assert_eq!(lines[1].span.slice(source), "x=1");
        assert_eq!(lines[4].span.slice(source), "z=3");
    }

    #[test]
    fn test_tokenize_skips_byte_order_mark() {
        let source = "\u{feff}[Triggers]\nT=Soviet\n";
        let lines = tokenize(source);
        assert_eq!(lines[0].kind, LineKind::Header("Triggers"));
        assert_eq!(lines[0].span.start(), 3);
        assert_eq!(lines[0].span.slice(source), "[Triggers]");
        assert_eq!(lines[0].number, 1);

        let only_mark = tokenize("\u{feff}");
        assert!(only_mark.is_empty());
    }

    #[test]
    fn test_whitespace_line_is_not_blank() {
        let kinds: Vec<_> = tokenize("[A]\nx=1\n  \t\ny=2")
            .iter()
            .map(|line| line.kind)
            .collect();
        assert_eq!(kinds[2], LineKind::Malformed);
    }

    #[test]
    fn test_tokenize_trailing_newline() {
        let lines = tokenize("[A]\n");
        assert_eq!(lines.len(), 1);
        assert!(tokenize("").is_empty());
    }
}
