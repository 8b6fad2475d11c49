//! Pending judgments waiting for their swing to finish.
use std::collections::HashMap;

use crate::host::Handle;

/// What a deferred judgment needs once the swing finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JudgmentContext {
    /// The cut note, for scoring.
    pub note_cut_info: Handle,
    /// The score effect showing the note's judgment.
    pub effect: Handle,
}

/// Maps swing rating counters to the judgment context of the note they rate.
///
/// Entries are never removed individually. A counter handle recorded again overwrites its old
/// entry, and the whole store is cleared when a new level scene loads.
#[derive(Debug, Default)]
pub struct ContextStore {
    contexts: HashMap<Handle, JudgmentContext>,
}

impl ContextStore {
    /// Creates an empty `ContextStore`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the context for `counter`, replacing any previous one.
    pub fn record(&mut self, counter: Handle, note_cut_info: Handle, effect: Handle) {
        trace!("recording context for counter {counter}");
        self.contexts.insert(
            counter,
            JudgmentContext {
                note_cut_info,
                effect,
            },
        );
    }

    /// Returns the context recorded for `counter`.
    pub fn resolve(&self, counter: Handle) -> Option<JudgmentContext> {
        let context = self.contexts.get(&counter).copied();
        if context.is_none() {
            debug!("no context recorded for counter {counter}");
        }
        context
    }

    /// Forgets every context.
    pub fn clear(&mut self) {
        self.contexts.clear();
    }

    /// Returns the number of counters with a context.
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Returns `true` if no context is recorded.
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn handle(raw: usize) -> Handle {
        Handle::new(raw).unwrap()
    }

    #[test]
    fn resolve_without_record() {
        let store = ContextStore::new();
        assert_eq!(store.resolve(handle(1)), None);
    }

    #[test]
    fn record_overwrites() {
        let mut store = ContextStore::new();

        store.record(handle(1), handle(2), handle(3));
        assert_eq!(
            store.resolve(handle(1)),
            Some(JudgmentContext {
                note_cut_info: handle(2),
                effect: handle(3)
            })
        );

        store.record(handle(1), handle(4), handle(5));
        assert_eq!(
            store.resolve(handle(1)),
            Some(JudgmentContext {
                note_cut_info: handle(4),
                effect: handle(5)
            })
        );
        assert_eq!(store.len(), 1);

        store.clear();
        assert!(store.is_empty());
    }

    proptest! {
        #[test]
        fn last_record_wins(records in prop::collection::vec((1..8usize, 1..1000usize, 1..1000usize), 1..50)) {
            let mut store = ContextStore::new();
            for &(counter, note_cut_info, effect) in &records {
                store.record(handle(counter), handle(note_cut_info), handle(effect));
            }

            for counter in 1..8 {
                let expected = records
                    .iter()
                    .rev()
                    .find(|&&(c, _, _)| c == counter)
                    .map(|&(_, note_cut_info, effect)| JudgmentContext {
                        note_cut_info: handle(note_cut_info),
                        effect: handle(effect),
                    });
                prop_assert_eq!(store.resolve(handle(counter)), expected);
            }
        }
    }
}
