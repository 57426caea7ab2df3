//! The pattern compiler: glob syntax to a sequence of compiled segments.
//!
//! Compilation is total. Unbalanced brackets and parens are read to the end
//! of the input and inserted as-is; whatever they then match (possibly
//! nothing) is the defined behavior, not an error.

use crate::segment::{LiteralSegment, Segment};

/// Compile a pattern string into its segment sequence.
pub(crate) fn compile(pattern: &str) -> Vec<Segment> {
    if !has_meta(pattern) {
        // Literal fast path: no meta characters anywhere, so every
        // `/`-delimited group is an exact string comparison.
        return pattern
            .split('/')
            .map(|part| Segment::Literal(LiteralSegment::exact(part, part.starts_with('.'))))
            .collect();
    }
    parse_segments(pattern)
}

fn has_meta(pattern: &str) -> bool {
    pattern.bytes().any(|byte| {
        matches!(
            byte,
            b'\\' | b'[' | b']' | b'?' | b'*' | b'@' | b'!' | b'+' | b'(' | b')'
        )
    })
}

/// Accumulates the regex source of the segment currently being scanned.
struct SegmentBuilder {
    source: String,
    saw_first_unit: bool,
    explicit_leading_dot: bool,
}

impl SegmentBuilder {
    fn new() -> SegmentBuilder {
        SegmentBuilder {
            source: String::new(),
            saw_first_unit: false,
            explicit_leading_dot: false,
        }
    }

    /// Record one compiled unit. Only the very first unit of a segment can
    /// mark the explicit leading dot; wildcards and classes that merely admit
    /// `.` pass `false` and thereby pin the flag down.
    fn unit(&mut self, is_literal_dot: bool) {
        if !self.saw_first_unit {
            self.saw_first_unit = true;
            self.explicit_leading_dot = is_literal_dot;
        }
    }

    /// Emit the accumulated segment, if any, and reset.
    fn flush_into(&mut self, segments: &mut Vec<Segment>) {
        if self.source.is_empty() {
            return;
        }
        segments.push(Segment::Literal(LiteralSegment::anchored(
            &self.source,
            self.explicit_leading_dot,
        )));
        self.source.clear();
        self.saw_first_unit = false;
        self.explicit_leading_dot = false;
    }
}

fn parse_segments(pattern: &str) -> Vec<Segment> {
    let bytes = pattern.as_bytes();
    let len = bytes.len();
    let mut segments = Vec::new();
    let mut segment = SegmentBuilder::new();
    let mut index = 0;

    while index < len {
        match bytes[index] {
            b'\\' => match pattern[index + 1..].chars().next() {
                Some(escaped) => {
                    segment.unit(escaped == '.');
                    push_escaped_char(&mut segment.source, escaped);
                    index += 1 + escaped.len_utf8();
                }
                None => {
                    // A trailing lone backslash is a literal backslash.
                    segment.unit(false);
                    segment.source.push_str(r"\\");
                    index = len;
                }
            },
            b'/' => {
                segment.flush_into(&mut segments);
                index += 1;
            }
            b'[' => {
                let end = read_balanced_range(bytes, index, len, b'[', b']');
                // `[.]` is an explicit literal dot; any wider class is not.
                segment.unit(bytes.get(index + 1) == Some(&b'.') && bytes.get(index + 2) == Some(&b']'));
                segment.source.push_str(&pattern[index..end]);
                index = end;
            }
            b'@' | b'!' | b'?' | b'+' | b'*' if bytes.get(index + 1) == Some(&b'(') => {
                let (source, next) = parse_extglob(pattern, index, len);
                segment.unit(false);
                segment.source.push_str(&source);
                index = next;
            }
            b'*' => {
                let mut run_end = index + 1;
                while run_end < len && bytes[run_end] == b'*' {
                    run_end += 1;
                }
                if run_end - index >= 2 {
                    // 2+ stars collapse into a globstar spanning whole
                    // segments; it owns its own slash boundaries.
                    segment.flush_into(&mut segments);
                    segments.push(Segment::GlobStar);
                } else {
                    segment.unit(false);
                    segment.source.push_str("[^/]*");
                }
                index = run_end;
            }
            b'?' => {
                segment.unit(false);
                segment.source.push_str("[^/]");
                index += 1;
            }
            _ => {
                let start = index;
                index = scan_plain_run(bytes, index, len);
                segment.unit(bytes[start] == b'.');
                push_escaped(&mut segment.source, &pattern[start..index]);
            }
        }
    }

    segment.flush_into(&mut segments);
    segments
}

/// Advance past a run of plain text. `@`, `!` and `+` only end a run when
/// they open an extglob group; on their own they are ordinary characters, as
/// are `(`, `)` and `]`.
fn scan_plain_run(bytes: &[u8], mut index: usize, end: usize) -> usize {
    while index < end {
        match bytes[index] {
            b'\\' | b'/' | b'[' | b'*' | b'?' => break,
            b'@' | b'!' | b'+' if index + 1 < end && bytes[index + 1] == b'(' => break,
            _ => index += 1,
        }
    }
    index
}

/// Read a balanced `open`..`close` range starting on the opener at `start`,
/// honoring backslash escapes. A bracket class inside a paren group is
/// skipped whole, so `)` and `(` can appear as class members. Returns the
/// index just past the closing character, or `end` when the range never
/// closes.
fn read_balanced_range(bytes: &[u8], start: usize, end: usize, open: u8, close: u8) -> usize {
    let mut depth = 0usize;
    let mut index = start;
    while index < end {
        let byte = bytes[index];
        index += 1;
        if byte == b'\\' {
            if index < end {
                index += 1;
            }
        } else if byte == b'[' && open != b'[' {
            index = read_balanced_range(bytes, index - 1, end, b'[', b']');
        } else if byte == open {
            depth += 1;
        } else if byte == close {
            depth -= 1;
            if depth == 0 {
                break;
            }
        }
    }
    index
}

/// Compile an extglob group `op(alt|alt|...)` whose operator sits at
/// `op_index`. Returns the regex source and the index just past the group.
fn parse_extglob(pattern: &str, op_index: usize, end: usize) -> (String, usize) {
    let bytes = pattern.as_bytes();
    let paren_end = read_balanced_range(bytes, op_index + 1, end, b'(', b')');

    let inner_start = op_index + 2;
    let mut inner_end = paren_end.saturating_sub(1).max(inner_start);
    while inner_end > inner_start && !pattern.is_char_boundary(inner_end) {
        inner_end -= 1;
    }

    let alternates = split_alternates(bytes, inner_start, inner_end)
        .into_iter()
        .map(|(start, stop)| compile_subpattern(pattern, start, stop))
        .collect::<Vec<_>>()
        .join("|");

    let source = match bytes[op_index] {
        // Negation: the rest of the segment at this point must not start
        // with any alternative, and the group consumes one or more
        // characters of the segment.
        b'!' => format!("(?:(?!{alternates})[^/]+)"),
        b'?' => format!("(?:{alternates})?"),
        b'+' => format!("(?:{alternates})+"),
        b'*' => format!("(?:{alternates})*"),
        _ => format!("(?:{alternates})"),
    };
    (source, paren_end)
}

/// Split `start..end` on `|` characters at nesting depth zero. Bars inside
/// bracket classes or nested paren groups do not separate alternatives.
fn split_alternates(bytes: &[u8], start: usize, end: usize) -> Vec<(usize, usize)> {
    let mut pieces = Vec::new();
    let mut paren_depth = 0usize;
    let mut bracket_depth = 0usize;
    let mut piece_start = start;
    let mut index = start;

    while index < end {
        match bytes[index] {
            b'\\' => index += 1,
            b'[' => bracket_depth += 1,
            b']' if bracket_depth > 0 => bracket_depth -= 1,
            b'(' if bracket_depth == 0 => paren_depth += 1,
            b')' if bracket_depth == 0 => paren_depth = paren_depth.saturating_sub(1),
            b'|' if paren_depth == 0 && bracket_depth == 0 => {
                pieces.push((piece_start, index));
                piece_start = index + 1;
            }
            _ => {}
        }
        index += 1;
    }

    pieces.push((piece_start, end));
    pieces
}

/// Compile a subpattern confined to a single segment (an extglob
/// alternative) into regex source. Same character rules as the top-level
/// scanner, minus segment boundaries and globstars.
fn compile_subpattern(pattern: &str, start: usize, end: usize) -> String {
    let bytes = pattern.as_bytes();
    let mut source = String::new();
    let mut index = start;

    while index < end {
        match bytes[index] {
            b'\\' => match pattern[index + 1..end].chars().next() {
                Some(escaped) => {
                    push_escaped_char(&mut source, escaped);
                    index += 1 + escaped.len_utf8();
                }
                None => {
                    source.push_str(r"\\");
                    index = end;
                }
            },
            b'[' => {
                let stop = read_balanced_range(bytes, index, end, b'[', b']');
                source.push_str(&pattern[index..stop]);
                index = stop;
            }
            b'@' | b'!' | b'?' | b'+' | b'*' if index + 1 < end && bytes[index + 1] == b'(' => {
                let (nested, next) = parse_extglob(pattern, index, end);
                source.push_str(&nested);
                index = next;
            }
            b'?' => {
                source.push_str("[^/]");
                index += 1;
            }
            b'*' => {
                source.push_str("[^/]*");
                index += 1;
            }
            b'/' => {
                // Alternatives never span a segment boundary, so a literal
                // `/` inside a group can only fail to match; parts never
                // contain one.
                source.push('/');
                index += 1;
            }
            _ => {
                let run_start = index;
                index = scan_plain_run(bytes, index, end);
                push_escaped(&mut source, &pattern[run_start..index]);
            }
        }
    }

    source
}

fn push_escaped(out: &mut String, text: &str) {
    for character in text.chars() {
        push_escaped_char(out, character);
    }
}

/// Append `character` to regex source, escaped if it is meaningful there.
fn push_escaped_char(out: &mut String, character: char) {
    if matches!(
        character,
        '.' | '+' | '*' | '?' | '^' | '$' | '{' | '}' | '(' | ')' | '|' | '[' | ']' | '\\'
    ) {
        out.push('\\');
    }
    out.push(character);
}
