//! Property-based tests for transcript windowing
//!
//! These verify the windowing laws for arbitrary transcripts:
//! - the window length is always `min(k, len)`
//! - the window is a suffix of the transcript, in order
//! - snapshots lose nothing across appends

use super::history::{ConversationHistory, Turn};
use proptest::prelude::*;

fn arb_turn() -> impl Strategy<Value = Turn> {
    (any::<bool>(), "[a-zA-Z0-9 .!?]{0,80}").prop_map(|(from_user, content)| {
        if from_user {
            Turn::user(content)
        } else {
            Turn::assistant(content)
        }
    })
}

proptest! {
    #[test]
    fn window_length_is_min_of_k_and_len(
        turns in proptest::collection::vec(arb_turn(), 0..40),
        k in 0usize..12,
    ) {
        let mut history = ConversationHistory::new();
        for turn in &turns {
            history.append(turn.clone());
        }

        prop_assert_eq!(history.window(k).len(), k.min(turns.len()));
    }

    #[test]
    fn window_is_a_suffix_of_the_transcript(
        turns in proptest::collection::vec(arb_turn(), 0..40),
        k in 0usize..12,
    ) {
        let mut history = ConversationHistory::new();
        for turn in &turns {
            history.append(turn.clone());
        }

        let window = history.window(k);
        let snapshot = history.snapshot();
        let start = snapshot.len() - window.len();
        prop_assert_eq!(window, &snapshot[start..]);
    }

    #[test]
    fn snapshot_keeps_every_append_in_order(
        turns in proptest::collection::vec(arb_turn(), 0..40),
    ) {
        let mut history = ConversationHistory::new();
        for turn in &turns {
            history.append(turn.clone());
        }

        prop_assert_eq!(history.snapshot(), turns.as_slice());
    }
}
