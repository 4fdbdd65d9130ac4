//! Output composer: puts expression values back into the markup

use thiserror::Error;

use super::synthesizer::Skeleton;
use crate::engine::OutputSlots;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositionError {
    #[error("placeholder {slot} has no output slot ({available} available)")]
    MissingSlot { slot: usize, available: usize },
}

/// Replace every placeholder with its slot value in one pass. Unfilled slots
/// render as empty text.
pub fn compose(skeleton: &Skeleton, slots: &OutputSlots) -> Result<String, CompositionError> {
    let text = skeleton.text();
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;

    for ins in skeleton.insertions() {
        if ins.slot >= slots.len() {
            return Err(CompositionError::MissingSlot {
                slot: ins.slot,
                available: slots.len(),
            });
        }
        out.push_str(&text[cursor..ins.offset]);
        out.push_str(slots.get(ins.slot).unwrap_or_default());
        cursor = ins.offset;
    }
    out.push_str(&text[cursor..]);

    Ok(out)
}
