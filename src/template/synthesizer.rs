//! Code synthesizer
//!
//! Joins the code segments of a document into one compilable unit and
//! records where each expression's value belongs in the markup.

use std::fmt;

use super::lexer::{Segment, SegmentKind};

/// Name of the unit's entry point
pub const ENTRY_POINT: &str = "render";
/// Parameter holding the request mapping
pub const REQUEST_PARAM: &str = "request";
/// Parameter holding the output slot array
pub const OUTPUT_PARAM: &str = "__output__";

/// Markup with the positions of expression values
///
/// Placeholders are byte offsets into `text`, so markup that happens to look
/// like a placeholder is never mistaken for one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Skeleton {
    text: String,
    insertions: Vec<Insertion>,
}

/// Slot `slot` is inserted at byte `offset` of the skeleton text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    pub offset: usize,
    pub slot: usize,
}

impl Skeleton {
    /// Literal markup, placeholders excluded
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Insertions in document order
    pub fn insertions(&self) -> &[Insertion] {
        &self.insertions
    }

    fn push_markup(&mut self, markup: &str) {
        self.text.push_str(markup);
    }

    fn push_placeholder(&mut self, slot: usize) {
        self.insertions.push(Insertion {
            offset: self.text.len(),
            slot,
        });
    }
}

/// Token form: `{n}` for placeholders, literal braces doubled
impl fmt::Display for Skeleton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut insertions = self.insertions.iter().peekable();
        for (offset, ch) in self.text.char_indices() {
            while let Some(ins) = insertions.next_if(|ins| ins.offset == offset) {
                write!(f, "{{{}}}", ins.slot)?;
            }
            match ch {
                '{' => f.write_str("{{")?,
                '}' => f.write_str("}}")?,
                _ => write!(f, "{}", ch)?,
            }
        }
        for ins in insertions {
            write!(f, "{{{}}}", ins.slot)?;
        }
        Ok(())
    }
}

/// Everything the later stages need from one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
    /// Complete unit source, ready for the engine
    pub unit_source: String,
    pub skeleton: Skeleton,
    /// Number of expression segments, equal to the number of insertions
    pub expression_count: usize,
}

/// The line that stores expression `slot`'s string value
pub fn expression_line(slot: usize, expr: &str) -> String {
    format!("{}[{}] = String(({}));", OUTPUT_PARAM, slot, expr)
}

/// Wrap code text in the unit skeleton
pub fn wrap_unit(code: &str) -> String {
    format!(
        "function {}({}, {}) {{\n{}\n}}",
        ENTRY_POINT, REQUEST_PARAM, OUTPUT_PARAM, code
    )
}

pub fn synthesize(segments: &[Segment]) -> Synthesis {
    let mut skeleton = Skeleton::default();
    let mut code = String::new();
    let mut expression_count = 0;

    for segment in segments {
        match segment.kind {
            SegmentKind::Markup => skeleton.push_markup(&segment.text),
            SegmentKind::Statement => code.push_str(&segment.text),
            SegmentKind::Expression => {
                skeleton.push_placeholder(expression_count);
                // Terminate the preceding statement text and give the
                // expression its own line
                code.push_str(";\n");
                code.push_str(&expression_line(expression_count, &segment.text));
                code.push('\n');
                expression_count += 1;
            }
        }
    }

    Synthesis {
        unit_source: wrap_unit(&code),
        skeleton,
        expression_count,
    }
}
