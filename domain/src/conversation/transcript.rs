//! Transcript: the ordered, append-only sequence of turns

use super::turn::Turn;
use serde::{Deserialize, Serialize};

/// Ordered conversation history replayed to providers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a turn, returning its index
    pub fn push(&mut self, turn: Turn) -> usize {
        self.turns.push(turn);
        self.turns.len() - 1
    }

    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Split into prior context and the newest turn
    pub fn split_last(&self) -> Option<(&Turn, &[Turn])> {
        self.turns.split_last()
    }

    pub(crate) fn clear(&mut self) {
        self.turns.clear();
    }
}

impl FromIterator<Turn> for Transcript {
    fn from_iter<I: IntoIterator<Item = Turn>>(iter: I) -> Self {
        Self {
            turns: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;

    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::provider::ProviderKind;
    use crate::orchestration::participants::Slot;

    #[test]
    fn test_push_preserves_order() {
        let mut transcript = Transcript::new();
        assert_eq!(transcript.push(Turn::user("first").unwrap()), 0);
        assert_eq!(
            transcript.push(Turn::from_slot(Slot::A, ProviderKind::Gpt, "second")),
            1
        );
        let texts: Vec<_> = transcript.iter().map(|t| t.text()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_split_last() {
        let transcript: Transcript = vec![
            Turn::user("topic").unwrap(),
            Turn::from_slot(Slot::A, ProviderKind::Gpt, "claim"),
        ]
        .into_iter()
        .collect();

        let (newest, context) = transcript.split_last().unwrap();
        assert_eq!(newest.text(), "claim");
        assert_eq!(context.len(), 1);
        assert!(Transcript::new().split_last().is_none());
    }
}
