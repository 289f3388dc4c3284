//! Integration tests for state persistence: recovery and the file format.

use chrono::Utc;
use tennis_ladder::{HistoryEntry, LadderRule, LadderState, Pairing, Player, Storage};

fn temp_path(tag: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!(
        "tennis_ladder_storage_{}_{}.json",
        tag,
        std::process::id()
    ));
    let _ = std::fs::remove_file(&path);
    path
}

fn sample_state() -> LadderState {
    LadderState {
        players: vec![Player::new("Alice", Some(100)), Player::new("Bob", None)],
        pairings: vec![Pairing(1, 2)],
        round: 3,
        history: vec![HistoryEntry {
            timestamp: Utc::now(),
            round: 3,
            winner_rank_pre: 2,
            loser_rank_pre: 1,
            winner: "Bob".to_string(),
            loser: "Alice".to_string(),
            score: "6-4".to_string(),
            reporter_id: Some(100),
            rule: LadderRule::SwapOnly,
        }],
    }
}

#[test]
fn missing_file_loads_empty_state() {
    let storage = Storage::new(temp_path("missing"));
    assert_eq!(storage.load(), LadderState::default());
}

#[test]
fn corrupt_file_loads_empty_state() {
    let path = temp_path("corrupt");
    std::fs::write(&path, "{ this is not json").unwrap();
    let storage = Storage::new(&path);
    assert_eq!(storage.load(), LadderState::default());
}

#[test]
fn wrong_shape_loads_empty_state() {
    let path = temp_path("wrong_shape");
    std::fs::write(&path, r#"{"players": "oops"}"#).unwrap();
    let storage = Storage::new(&path);
    assert_eq!(storage.load(), LadderState::default());
}

#[test]
fn save_then_load_round_trips() {
    let storage = Storage::new(temp_path("roundtrip"));
    let state = sample_state();
    storage.save(&state).unwrap();
    assert_eq!(storage.load(), state);
}

#[test]
fn save_leaves_no_temp_file_behind() {
    let path = temp_path("atomic");
    let storage = Storage::new(&path);
    storage.save(&sample_state()).unwrap();
    assert!(path.exists());
    let mut tmp = path.clone();
    tmp.as_mut_os_string().push(".tmp");
    assert!(!tmp.exists());
}

#[test]
fn save_overwrites_previous_state() {
    let storage = Storage::new(temp_path("overwrite"));
    storage.save(&sample_state()).unwrap();
    let mut newer = sample_state();
    newer.round = 4;
    newer.players.push(Player::new("Carol", None));
    storage.save(&newer).unwrap();
    assert_eq!(storage.load(), newer);
}

#[test]
fn state_file_document_format() {
    let storage = Storage::new(temp_path("format"));
    storage.save(&sample_state()).unwrap();
    let raw = std::fs::read_to_string(storage.path()).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(doc["players"][0]["name"], "Alice");
    assert_eq!(doc["players"][0]["user_id"], 100);
    assert_eq!(doc["players"][1]["user_id"], serde_json::Value::Null);
    // Pairings serialize as two-element arrays; 0 in the second slot = bye.
    assert_eq!(doc["pairings"][0], serde_json::json!([1, 2]));
    assert_eq!(doc["round"], 3);

    let entry = &doc["history"][0];
    assert!(entry["timestamp"].is_string());
    assert_eq!(entry["winner_rank_pre"], 2);
    assert_eq!(entry["loser_rank_pre"], 1);
    assert_eq!(entry["winner"], "Bob");
    assert_eq!(entry["loser"], "Alice");
    assert_eq!(entry["score"], "6-4");
    assert_eq!(entry["reporter_id"], 100);
    assert_eq!(entry["rule"], "SWAP_ONLY");
}
