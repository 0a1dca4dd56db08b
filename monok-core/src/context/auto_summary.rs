//! Auto-summary trigger policy

use crate::message::Message;

use super::config::ContextConfig;

/// Whether the caller should request a session summary now.
///
/// True when the number of user messages is a positive multiple of
/// `summary_threshold`. Stateless: callers track which counts they already
/// acted on.
pub fn should_trigger_summary(messages: &[Message], config: &ContextConfig) -> bool {
    if config.summary_threshold == 0 {
        return false;
    }
    let user_messages = messages.iter().filter(|m| m.is_user()).count();
    user_messages > 0 && user_messages % config.summary_threshold == 0
}

/// Instruction injected into the conversation when a summary is due
pub fn auto_summary_prompt(exchange_count: usize) -> String {
    format!(
        "[System instruction: You've had {} exchanges in this conversation. Please briefly use your memory tools to:
1. Save any important new information to your memory files
2. Tag this conversation with relevant topics using tag_memory
3. Update user_insights if you've learned anything new about the user's preferences or patterns
4. Append a brief summary to conversation_summaries.md

Do this silently in the background, then continue responding naturally to the user.]",
        exchange_count
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alternating(count: usize) -> Vec<Message> {
        (0..count)
            .map(|i| {
                if i % 2 == 0 {
                    Message::user(format!("msg {}", i))
                } else {
                    Message::assistant(format!("msg {}", i))
                }
            })
            .collect()
    }

    #[test]
    fn test_triggers_at_threshold() {
        assert!(should_trigger_summary(&alternating(24), &ContextConfig::default()));
    }

    #[test]
    fn test_no_trigger_below_threshold() {
        assert!(!should_trigger_summary(&alternating(20), &ContextConfig::default()));
    }

    #[test]
    fn test_no_trigger_when_empty() {
        assert!(!should_trigger_summary(&[], &ContextConfig::default()));
    }

    #[test]
    fn test_triggers_at_multiples() {
        assert!(should_trigger_summary(&alternating(48), &ContextConfig::default()));
        assert!(!should_trigger_summary(&alternating(50), &ContextConfig::default()));
    }

    #[test]
    fn test_custom_threshold() {
        let config = ContextConfig::new().with_summary_threshold(5);
        assert!(should_trigger_summary(&alternating(10), &config));
    }

    #[test]
    fn test_only_user_messages_count() {
        let mut messages = alternating(24);
        messages.push(Message::system("extra"));
        messages.push(Message::assistant("extra"));
        assert!(should_trigger_summary(&messages, &ContextConfig::default()));
    }

    #[test]
    fn test_zero_threshold_never_triggers() {
        let config = ContextConfig::new().with_summary_threshold(0);
        assert!(!should_trigger_summary(&alternating(24), &config));
    }

    #[test]
    fn test_prompt_mentions_count_and_tools() {
        let prompt = auto_summary_prompt(12);
        assert!(prompt.contains("12 exchanges"));
        assert!(prompt.contains("memory tools"));
        assert!(prompt.contains("tag_memory"));
        assert!(prompt.contains("conversation_summaries.md"));
    }
}
