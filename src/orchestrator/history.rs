use crate::models::{ConversationTurn, DisplayRole, DisplayTurn};

/// Whether a history holds anything beyond the session's hidden prefix.
pub fn has_conversation(history: &[ConversationTurn], hidden_context_turns: usize) -> bool {
    history.len() > hidden_context_turns
}

/// Turns to show the user after resuming: the hidden prefix is skipped, text
/// fragments are joined, and turns with no text are dropped.
pub fn to_display_history(
    history: &[ConversationTurn],
    hidden_context_turns: usize,
) -> Vec<DisplayTurn> {
    history
        .iter()
        .skip(hidden_context_turns)
        .filter_map(|turn| {
            let text = turn.joined_text();
            (!text.is_empty()).then(|| DisplayTurn {
                role: DisplayRole::from_role(&turn.role),
                text,
            })
        })
        .collect()
}
