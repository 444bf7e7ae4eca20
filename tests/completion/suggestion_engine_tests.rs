//! 补全引擎集成测试

use std::collections::HashSet;
use tempfile::TempDir;
use termsuggest_lib::completion::{
    Suggestion, SuggestionEngine, SuggestionLimits, SuggestionSource, BUILTIN_COMMANDS,
    MAX_SUGGESTIONS, RECENCY_BONUS_MAX,
};
use termsuggest_lib::config::TerminalConfig;

fn config_with(allowed: &[&str]) -> TerminalConfig {
    TerminalConfig {
        history_size: 100,
        history_file: String::new(),
        allowed_commands: allowed.iter().map(|c| c.to_string()).collect(),
        ..TerminalConfig::default()
    }
}

fn commands(suggestions: &[Suggestion]) -> Vec<&str> {
    suggestions.iter().map(|s| s.command.as_str()).collect()
}

fn position(suggestions: &[Suggestion], command: &str) -> Option<usize> {
    suggestions.iter().position(|s| s.command == command)
}

#[test]
fn test_empty_prefix_returns_nothing() {
    let engine = SuggestionEngine::new(&config_with(&["ls"]));
    engine.record("ls");

    assert!(engine.suggest("").is_empty());
    assert!(engine.suggest("   ").is_empty());
    assert!(engine.suggest_history("").is_empty());
}

#[test]
fn test_result_size_is_bounded() {
    let allowed: Vec<String> = (0..40).map(|i| format!("echo {i}")).collect();
    let allowed: Vec<&str> = allowed.iter().map(String::as_str).collect();
    let engine = SuggestionEngine::new(&config_with(&allowed));

    for i in 0..30 {
        engine.record(&format!("echo history {i}"));
    }

    let suggestions = engine.suggest("e");
    assert!(!suggestions.is_empty());
    assert!(suggestions.len() <= MAX_SUGGESTIONS);
}

#[test]
fn test_contiguous_match_ranks_first() {
    let engine = SuggestionEngine::new(&config_with(&["go build", "go install", "go test"]));

    let suggestions = engine.suggest("go b");
    let build = position(&suggestions, "go build").expect("go build should match");

    for other in ["go install", "go test"] {
        if let Some(index) = position(&suggestions, other) {
            assert!(build < index, "go build should rank before {other}");
        }
    }
    assert_eq!(suggestions[0].command, "go build");
}

#[test]
fn test_more_recent_command_wins_tie() {
    let config = TerminalConfig {
        history_size: 3,
        ..config_with(&[])
    };
    let engine = SuggestionEngine::new(&config);

    engine.record("ls");
    engine.record("go test");
    engine.record("go build");

    let suggestions = engine.suggest("go");
    let build = position(&suggestions, "go build").unwrap();
    let test = position(&suggestions, "go test").unwrap();

    assert!(build < test);
    assert!(suggestions[build].score > suggestions[test].score);
}

#[test]
fn test_recent_command_beats_scattered_match() {
    let engine = SuggestionEngine::new(&config_with(&[]));
    engine.record("git status");

    // setprompt/setpassword 只能零散匹配 "st"
    let suggestions = engine.suggest("st");

    assert_eq!(suggestions[0].command, "git status");
    assert_eq!(suggestions[0].source, SuggestionSource::Recent);
    for other in ["setprompt", "setpassword"] {
        if let Some(index) = position(&suggestions, other) {
            assert!(suggestions[index].score < suggestions[0].score);
        }
    }
}

#[test]
fn test_equal_scores_keep_merge_order() {
    // 所有候选的模糊分都等于最近命令的满额加分
    let engine = SuggestionEngine::new(&config_with(&[]))
        .with_scorer(|_query: &str, _candidate: &str| Some(RECENCY_BONUS_MAX));
    engine.record("alpha one");

    let suggestions = engine.suggest("a");

    assert_eq!(suggestions.len(), MAX_SUGGESTIONS);
    assert!(suggestions.iter().all(|s| s.score == RECENCY_BONUS_MAX));

    // 最近使用阶段在前，模糊阶段保持词汇表顺序
    assert_eq!(suggestions[0].command, "alpha one");
    assert_eq!(suggestions[0].source, SuggestionSource::Recent);
    let fuzzy: Vec<&str> = commands(&suggestions[1..]);
    assert_eq!(fuzzy, BUILTIN_COMMANDS[..MAX_SUGGESTIONS - 1].to_vec());
}

#[test]
fn test_no_duplicates_across_passes() {
    let engine = SuggestionEngine::new(&config_with(&["git status", "git stash"]));
    engine.record("git status");
    engine.record("git stash");
    engine.record("git status");

    let suggestions = engine.suggest("git st");
    let unique: HashSet<&str> = commands(&suggestions).into_iter().collect();

    assert_eq!(unique.len(), suggestions.len());
    assert!(unique.contains("git status"));
    assert!(unique.contains("git stash"));
}

#[test]
fn test_recent_matches_are_tagged() {
    let engine = SuggestionEngine::new(&config_with(&[]));
    engine.record("docker ps");

    let suggestions = engine.suggest("docker");
    let docker = suggestions
        .iter()
        .find(|s| s.command == "docker ps")
        .unwrap();

    assert_eq!(docker.source, SuggestionSource::Recent);
}

#[test]
fn test_scores_are_sorted_descending() {
    let engine = SuggestionEngine::new(&config_with(&["sleep 10", "setprompt $"]));
    engine.record("say hello");
    engine.record("sleep 1");

    let suggestions = engine.suggest("s");
    let scores: Vec<i64> = suggestions.iter().map(|s| s.score).collect();
    let mut sorted = scores.clone();
    sorted.sort_by(|a, b| b.cmp(a));

    assert_eq!(scores, sorted);
}

#[test]
fn test_no_match_returns_empty() {
    let engine = SuggestionEngine::new(&config_with(&[]));
    engine.record("ls");

    assert!(engine.suggest("zzqx").is_empty());
}

#[test]
fn test_custom_scorer() {
    let engine = SuggestionEngine::new(&config_with(&["alpha", "beta"])).with_scorer(
        |query: &str, candidate: &str| candidate.starts_with(query).then_some(1),
    );

    let suggestions = engine.suggest("be");
    assert_eq!(commands(&suggestions), vec!["beta"]);
    assert_eq!(engine.stats().scorer, "unknown");
}

#[test]
fn test_limits_are_respected() {
    let engine = SuggestionEngine::new(&config_with(&[])).with_limits(SuggestionLimits {
        recent: 1,
        fuzzy: 0,
        ..SuggestionLimits::default()
    });
    engine.record("cat a");
    engine.record("cat b");

    let suggestions = engine.suggest("cat");
    assert_eq!(commands(&suggestions), vec!["cat b"]);
}

#[test]
fn test_suggest_history_newest_first_and_capped() {
    let engine = SuggestionEngine::new(&config_with(&[]));
    for i in 0..15 {
        engine.record(&format!("make target{i:02}"));
    }
    engine.record("make target03");

    let results = engine.suggest_history("make target");

    assert_eq!(results.len(), 10);
    let unique: HashSet<&String> = results.iter().collect();
    assert_eq!(unique.len(), results.len());
    assert_eq!(results[0], "make target03");
}

#[test]
fn test_suggest_history_ignores_vocabulary() {
    let engine = SuggestionEngine::new(&config_with(&["help me"]));
    engine.record("hello world");

    let results = engine.suggest_history("hel");
    assert_eq!(results, vec!["hello world"]);
}

#[tokio::test]
async fn test_history_persists_between_engines() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("pty_history");
    let config = TerminalConfig {
        history_file: path.to_string_lossy().into_owned(),
        ..config_with(&[])
    };

    let engine = SuggestionEngine::with_persisted_history(&config).await;
    engine.record("cargo build");
    engine.record("cargo test");
    engine.save_history().await.unwrap();

    let restored = SuggestionEngine::with_persisted_history(&config).await;
    assert_eq!(restored.history(), vec!["cargo build", "cargo test"]);

    // 回放的历史不进入最近使用缓存，但参与模糊匹配
    assert!(restored.recent_commands().is_empty());
    let suggestions = restored.suggest("cargo t");
    assert_eq!(suggestions[0].command, "cargo test");
    assert_eq!(suggestions[0].source, SuggestionSource::Fuzzy);
}

#[tokio::test]
async fn test_save_failure_keeps_memory_state() {
    let temp_dir = TempDir::new().unwrap();
    let config = TerminalConfig {
        // 目录本身不能作为文件写入
        history_file: temp_dir.path().to_string_lossy().into_owned(),
        ..config_with(&[])
    };

    let engine = SuggestionEngine::new(&config);
    engine.record("pwd");

    assert!(engine.save_history().await.is_err());
    assert_eq!(engine.history(), vec!["pwd"]);
}

#[test]
fn test_reconfigured_keeps_state() {
    let engine = SuggestionEngine::new(&config_with(&[]));
    engine.record("ls");
    engine.record("pwd");

    let reloaded = engine.reconfigured(&config_with(&["kubectl get pods"]));

    assert_eq!(reloaded.history(), vec!["ls", "pwd"]);
    assert_eq!(reloaded.recent_commands(), vec!["pwd", "ls"]);
    assert!(reloaded.vocabulary().contains("kubectl get pods"));
    assert!(!engine.vocabulary().contains("kubectl get pods"));
}

#[test]
fn test_concurrent_record_and_suggest() {
    let engine = std::sync::Arc::new(SuggestionEngine::new(&config_with(&[])));

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let engine = std::sync::Arc::clone(&engine);
            std::thread::spawn(move || {
                for i in 0..50 {
                    engine.record(&format!("job {worker} {i}"));
                    assert!(engine.suggest("job").len() <= MAX_SUGGESTIONS);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(engine.history().len(), 100);
}
