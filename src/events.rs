use rand::seq::IndexedRandom;

use crate::model::task::EntryId;

/// Messages shown when a task is completed, picked uniformly at random.
pub const MOTIVATIONS: [&str; 4] = [
    "🔥 Keep going, you're crushing it!",
    "🚀 Great job! One step closer!",
    "💪 You got this!",
    "⭐ Amazing! Keep it up!",
];

/// Notification emitted by the store after a mutation.
///
/// The store owns the state; presentation layers subscribe and redraw on
/// `Changed` instead of reaching into the store's internals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// State mutated and persisted; redraw.
    Changed,
    /// A task transitioned to done (fires once per task, never on re-check).
    TaskCompleted {
        id: EntryId,
        motivation: &'static str,
    },
    /// Every task on today's list is now done.
    AllComplete,
}

/// Pick a motivational message.
pub fn pick_motivation() -> &'static str {
    MOTIVATIONS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(MOTIVATIONS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_motivation_from_fixed_set() {
        for _ in 0..32 {
            assert!(MOTIVATIONS.contains(&pick_motivation()));
        }
    }
}
