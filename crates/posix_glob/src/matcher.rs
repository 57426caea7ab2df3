//! Path evaluation against a compiled segment sequence.

use crate::segment::{LiteralSegment, Segment};

/// Match a `/`-delimited path against compiled segments.
pub(crate) fn match_path(segments: &[Segment], path: &str, include_dot: bool) -> bool {
    let parts: Vec<&str> = path.split('/').collect();

    // Without a globstar the alignment is fixed, so a positional comparison
    // suffices. Any globstar drops us into the memoized search instead.
    let mut literals = Vec::with_capacity(segments.len());
    for segment in segments {
        match segment {
            Segment::Literal(literal) => literals.push(literal),
            Segment::GlobStar => {
                let mut memo = MemoTable::new(segments.len(), parts.len());
                return match_from(segments, &parts, include_dot, 0, 0, &mut memo);
            }
        }
    }

    if literals.len() != parts.len() {
        return false;
    }
    literals
        .iter()
        .zip(&parts)
        .all(|(&literal, &part)| matches_part(literal, part, include_dot))
}

fn matches_part(literal: &LiteralSegment, part: &str, include_dot: bool) -> bool {
    !is_dotfile(part, include_dot, literal.explicit_leading_dot) && literal.is_match(part)
}

/// The POSIX leading-dot rule: a part starting with `.` is only matched by a
/// segment whose first unit is an explicit literal dot.
fn is_dotfile(part: &str, include_dot: bool, explicit_leading_dot: bool) -> bool {
    !include_dot && !explicit_leading_dot && part.starts_with('.')
}

/// Memoization over `(segment index, part index)`. A dense two-dimensional
/// table sized `(segments + 1) x (parts + 1)`; both bounds are known up
/// front, so no key packing or hashing is involved.
struct MemoTable {
    cells: Vec<Option<bool>>,
    stride: usize,
}

impl MemoTable {
    fn new(segment_count: usize, part_count: usize) -> MemoTable {
        MemoTable {
            cells: vec![None; (segment_count + 1) * (part_count + 1)],
            stride: part_count + 1,
        }
    }

    fn get(&self, segment_index: usize, part_index: usize) -> Option<bool> {
        self.cells[segment_index * self.stride + part_index]
    }

    fn set(&mut self, segment_index: usize, part_index: usize, value: bool) -> bool {
        self.cells[segment_index * self.stride + part_index] = Some(value);
        value
    }
}

/// Decide whether `parts[part_index..]` can satisfy
/// `segments[segment_index..]`. Memoization bounds the search to
/// `segments x parts` states even with several globstars.
fn match_from(
    segments: &[Segment],
    parts: &[&str],
    include_dot: bool,
    segment_index: usize,
    part_index: usize,
    memo: &mut MemoTable,
) -> bool {
    if let Some(cached) = memo.get(segment_index, part_index) {
        return cached;
    }

    if segment_index == segments.len() {
        return memo.set(segment_index, part_index, part_index == parts.len());
    }

    let result = match &segments[segment_index] {
        Segment::Literal(literal) => {
            part_index < parts.len()
                && matches_part(literal, parts[part_index], include_dot)
                && match_from(
                    segments,
                    parts,
                    include_dot,
                    segment_index + 1,
                    part_index + 1,
                    memo,
                )
        }
        Segment::GlobStar => {
            // Zero-segment span first, then spans of increasing length. A
            // span may not end on a dotfile part; such split points are
            // skipped and longer spans are still tried.
            match_from(segments, parts, include_dot, segment_index + 1, part_index, memo)
                || (part_index..parts.len()).any(|span_end| {
                    !is_dotfile(parts[span_end], include_dot, false)
                        && match_from(
                            segments,
                            parts,
                            include_dot,
                            segment_index + 1,
                            span_end + 1,
                            memo,
                        )
                })
        }
    };
    memo.set(segment_index, part_index, result)
}
