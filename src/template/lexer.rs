//! Segment lexer
//!
//! Splits a document into markup, statement code (`{ ... }`) and expression
//! code (`@{ ... }`). Braces nested inside code are tracked so that
//! `{ if (x) { y = 1 } }` is one statement segment. A `}` that closes nothing
//! is ordinary text. The lexer never fails; malformed code is left for the
//! engine to report.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SegmentKind {
    Markup,
    Statement,
    Expression,
}

/// A run of document text of one kind, delimiters stripped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub kind: SegmentKind,
    pub text: String,
}

impl Segment {
    pub fn new(kind: SegmentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

struct Lexer {
    segments: Vec<Segment>,
    kind: SegmentKind,
    depth: usize,
    buf: String,
}

impl Lexer {
    /// Close the current segment and switch to `next`. Empty markup carries
    /// nothing and is dropped; empty code segments are kept.
    fn flush(&mut self, next: SegmentKind) {
        let text = std::mem::take(&mut self.buf);
        if self.kind != SegmentKind::Markup || !text.is_empty() {
            self.segments.push(Segment::new(self.kind, text));
        }
        self.kind = next;
    }
}

/// Split document text into segments, in document order
pub fn lex(document: &str) -> Vec<Segment> {
    let mut lx = Lexer {
        segments: Vec::new(),
        kind: SegmentKind::Markup,
        depth: 0,
        buf: String::new(),
    };
    let mut chars = document.chars().peekable();

    while let Some(ch) = chars.next() {
        match (lx.kind, ch) {
            (SegmentKind::Markup, '@') if chars.peek() == Some(&'{') => {
                chars.next();
                lx.flush(SegmentKind::Expression);
                lx.depth = 1;
            }
            (SegmentKind::Markup, '{') => {
                lx.flush(SegmentKind::Statement);
                lx.depth = 1;
            }
            (SegmentKind::Markup, _) => lx.buf.push(ch),

            (_, '{') => {
                lx.depth += 1;
                lx.buf.push(ch);
            }
            (_, '}') => {
                lx.depth = lx.depth.saturating_sub(1);
                if lx.depth == 0 {
                    lx.flush(SegmentKind::Markup);
                } else {
                    lx.buf.push(ch);
                }
            }
            (_, _) => lx.buf.push(ch),
        }
    }

    // Unterminated code keeps its kind
    if !lx.buf.is_empty() {
        let kind = lx.kind;
        lx.flush(kind);
    }

    lx.segments
}
