//! Next-speaker selection for battle mode.

use crate::conversation::transcript::Transcript;
use crate::conversation::turn::{Author, Speaker};
use crate::orchestration::participants::{ParticipantAssignment, Slot};

/// Decide which slot speaks after the newest turn.
///
/// - user → A
/// - A → B
/// - B → A
/// - untagged provider turn → B if its provider is the one assigned to A,
///   otherwise A. When both slots share a provider kind this picks B even
///   after B spoke; the ambiguity is kept as-is.
///
/// Returns `None` for an empty transcript. Pure: the same transcript and
/// assignment always yield the same slot.
pub fn next_speaker(transcript: &Transcript, participants: &ParticipantAssignment) -> Option<Slot> {
    let last = transcript.last()?;

    let next = match (last.speaker(), last.author()) {
        (Some(Speaker::User), _) | (_, Author::User) => Slot::A,
        (Some(Speaker::Slot(slot)), _) => slot.other(),
        (None, Author::Provider(kind)) => {
            if kind == participants.a {
                Slot::B
            } else {
                Slot::A
            }
        }
    };
    Some(next)
}
