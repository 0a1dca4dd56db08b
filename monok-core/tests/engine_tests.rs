//! End-to-end engine tests over JSON files

use tempfile::TempDir;

use monok_core::prelude::*;

fn open_engine() -> (MemoryEngine, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config = MonokConfig::default().with_base_path(temp_dir.path());
    let engine = MemoryEngine::open(config).expect("Failed to open engine");
    (engine, temp_dir)
}

#[tokio::test]
async fn test_session_flow() {
    let (engine, _temp_dir) = open_engine();

    let saved = engine
        .save_session_summary(
            "ada",
            "Discussed the new memory system implementation for the chat app",
            24,
            "we add context recall to the backend api",
        )
        .await
        .unwrap();
    let summary = saved.summary().unwrap();
    assert_eq!(summary.topics, vec!["backend", "features", "memory-system"]);

    let skipped = engine
        .save_session_summary(
            "ada",
            "Discussed the new memory system implementation for the chat application",
            26,
            "",
        )
        .await
        .unwrap();
    assert!(skipped.is_skipped());

    let recent = engine.recent_session_summaries("ada", 5).await.unwrap();
    assert_eq!(recent.len(), 1);
}

#[tokio::test]
async fn test_insights_persist_across_engines() {
    let temp_dir = TempDir::new().unwrap();
    let config = MonokConfig::default().with_base_path(temp_dir.path());

    let first = MemoryEngine::open(config.clone()).unwrap();
    first
        .record_insight("ada", InsightCategory::Preferences, "Prefers dark mode", None)
        .await
        .unwrap();
    first
        .record_insight(
            "ada",
            InsightCategory::Goals,
            "Wants to publish the crate",
            Some(InsightConfidence::WellEstablished),
        )
        .await
        .unwrap();

    assert!(temp_dir.path().join("ada/files/user_insights.json").exists());

    let second = MemoryEngine::open(config).unwrap();
    let outcome = second
        .record_insight("ada", InsightCategory::Preferences, "prefers dark mode everywhere", None)
        .await
        .unwrap();
    assert!(outcome.reinforced);

    assert_eq!(
        second.user_insights_context("ada").await.unwrap().unwrap(),
        "**preferences**: Prefers dark mode\n**goals**: Wants to publish the crate"
    );
}

#[tokio::test]
async fn test_learnings_written_to_self_improvement_file() {
    let (engine, temp_dir) = open_engine();

    engine
        .record_learning(
            "ada",
            NewLearning::new(LearningCategory::Adaptation, "Lead with the code sample")
                .with_context("user skipped prose twice"),
        )
        .await
        .unwrap();
    let outcome = engine
        .record_learning(
            "ada",
            NewLearning::new(LearningCategory::Adaptation, "lead with the code sample"),
        )
        .await
        .unwrap();
    assert!(outcome.reinforced);
    assert_eq!(outcome.total, 1);

    let path = temp_dir
        .path()
        .join("ada/files/self_improvement/learnings.json");
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    let entry = &json["adaptation"][0];
    assert_eq!(entry["confidence"], "emerging");
    assert_eq!(entry["observation_count"], 2);
    assert_eq!(entry["context"], "user skipped prose twice");
}

#[tokio::test]
async fn test_window_management() {
    let (engine, _temp_dir) = open_engine();

    let history: Vec<Message> = (0..24)
        .map(|i| {
            if i % 2 == 0 {
                Message::user(format!("question {}", i))
            } else {
                Message::assistant(format!("answer {}", i))
            }
        })
        .collect();

    assert!(engine.should_trigger_summary(&history));
    assert!(engine.auto_summary_prompt().contains("12 exchanges"));
    assert!(!engine.prune_messages(&history).pruned);
}

#[tokio::test]
async fn test_notes_written_to_files_dir() {
    let (engine, temp_dir) = open_engine();

    let entry = engine
        .tag_memory("ada", &["Rust", "crates"], "Picked figment for config", Importance::High)
        .await
        .unwrap();
    let found = engine.search_by_tag("ada", "rust").await.unwrap();
    assert_eq!(found.exact_matches.len(), 1);
    assert_eq!(found.exact_matches[0].id, entry.id);

    let item = engine
        .track_pending_item("ada", "Publish the crate", None, Priority::default())
        .await
        .unwrap();
    engine
        .resolve_pending_item("ada", item.id, Some("released 0.1"))
        .await
        .unwrap();
    assert_eq!(engine.pending_items("ada").await.unwrap().unresolved().count(), 0);

    let files = temp_dir.path().join("ada/files");
    let tags: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(files.join("memory_tags.json")).unwrap())
            .unwrap();
    assert_eq!(tags["tags"]["Rust"], serde_json::json!([entry.id]));
    assert_eq!(tags["entries"][0]["importance"], "high");

    let pending: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(files.join("pending_items.json")).unwrap())
            .unwrap();
    assert_eq!(pending["items"][0]["resolved"], true);
    assert_eq!(pending["items"][0]["resolution"], "released 0.1");
}
