//! Context pruning properties over a range of windows and budgets

use monok_core::prelude::*;

/// A mixed window: periodic system messages, varied content, alternating turns
fn window(len: usize, system_every: usize) -> Vec<Message> {
    let mut turn = 0;
    (0..len)
        .map(|i| {
            if system_every > 0 && i % system_every == 0 {
                return Message::system(format!("system rule {}", i));
            }
            turn += 1;
            let text = match i % 7 {
                0 => format!("I prefer option {} for the api?", i),
                1 => format!("remind me to fix bug {}", i),
                2 => "```\nlet x = 1;\n```".to_string(),
                3 => format!("plain note {}", i),
                4 => format!("see report{}.md later", i),
                5 => "ok".repeat(i),
                _ => format!("worried about 2024-01-{:02}", i % 28 + 1),
            };
            if turn % 2 == 1 {
                Message::user(text)
            } else {
                Message::assistant(text)
            }
        })
        .collect()
}

fn configs() -> Vec<ContextConfig> {
    vec![
        ContextConfig::default(),
        ContextConfig::new()
            .with_max_messages_before_prune(10)
            .with_messages_to_keep(6)
            .with_recent_messages_to_always_keep(3),
        ContextConfig::new()
            .with_max_messages_before_prune(8)
            .with_messages_to_keep(8)
            .with_recent_messages_to_always_keep(1),
        ContextConfig::new()
            .with_max_messages_before_prune(5)
            .with_messages_to_keep(2)
            .with_recent_messages_to_always_keep(4),
    ]
}

#[test]
fn test_short_windows_unchanged() {
    for config in configs() {
        for len in 0..=config.max_messages_before_prune {
            let messages = window(len, 9);
            let result = prune_messages(&messages, &config);
            assert!(!result.pruned);
            assert_eq!(result.messages.as_ref(), messages.as_slice());
        }
    }
}

#[test]
fn test_pruned_window_properties() {
    for config in configs() {
        for len in config.max_messages_before_prune + 1..config.max_messages_before_prune + 40 {
            for system_every in [0, 5, 11] {
                let messages = window(len, system_every);
                let result = prune_messages(&messages, &config);
                assert!(result.pruned);

                // system messages survive in order, at the front
                let system_in: Vec<&Message> = messages.iter().filter(|m| m.is_system()).collect();
                let system_out: Vec<&Message> =
                    result.messages.iter().filter(|m| m.is_system()).collect();
                assert_eq!(system_in, system_out);
                assert!(result.messages[..system_out.len()].iter().all(|m| m.is_system()));

                // ends on a user turn
                assert_eq!(result.messages.last().unwrap().role, MessageRole::User);

                // recent tail is a verbatim suffix (before any continuation prompt)
                let conversation: Vec<&Message> =
                    messages.iter().filter(|m| !m.is_system()).collect();
                let recent = &conversation
                    [conversation.len().saturating_sub(config.recent_messages_to_always_keep)..];
                let mut body: Vec<&Message> = result.messages.iter().collect();
                if body.last().map(|m| m.content.as_text())
                    == Some(Some(monok_core::context::CONTINUATION_PROMPT))
                {
                    body.pop();
                }
                assert_eq!(&body[body.len() - recent.len()..], recent);

                // pruned count plus kept older equals the older pool
                let older = conversation.len() - recent.len();
                let kept_older = older.min(config.older_budget());
                assert_eq!(result.pruned_count, Some(older - kept_older));
            }
        }
    }
}

#[test]
fn test_forty_message_scenario() {
    let messages: Vec<Message> = (0..40)
        .map(|i| {
            if i % 2 == 0 {
                Message::assistant(format!("reply {}", i))
            } else {
                Message::user(format!("question {}", i))
            }
        })
        .collect();

    let result = prune_messages(&messages, &ContextConfig::default());

    assert!(result.pruned);
    assert_eq!(result.pruned_count, Some(25));
    assert_eq!(result.messages.len(), 16);
}

#[test]
fn test_prune_result_serializes() {
    let messages = window(40, 0);
    let result = prune_messages(&messages, &ContextConfig::default());
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["pruned"], true);
    assert_eq!(json["pruned_count"], 25);
    assert!(json["messages"].is_array());

    let short = window(3, 0);
    let json = serde_json::to_value(prune_messages(&short, &ContextConfig::default())).unwrap();
    assert!(json.get("pruned_count").is_none());
}

#[test]
fn test_topic_scenario() {
    let topics = extract_topics("We talked about coding a new feature");
    assert!(topics.contains(&"programming"));
    assert!(topics.contains(&"features"));
}
