//! Search instrumentation and game recording.
//!
//! Adapted from the teacher's `metrics/output.rs` and `metrics/game_recorder.rs`
//! (JSON-serialized per-move records via `serde_json`, timestamped with
//! `chrono`, written under a `game_recordings/` directory), retargeted from
//! alpha-beta's node/cutoff/transposition-table counters onto Gumbel-MCTS's
//! own statistics.

use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::time::Instant;

use crate::color::Color;

/// Per-call search statistics for one `GumbelMcts::get_best_move` invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchMetrics {
    pub search_time_ms: u128,
    pub simulations_run: u32,
    pub nodes_in_tree: usize,
    pub nodes_per_second: u64,
}

impl SearchMetrics {
    pub fn new(elapsed: std::time::Duration, simulations_run: u32, nodes_in_tree: usize) -> Self {
        let search_time_ms = elapsed.as_millis();
        let nodes_per_second = if search_time_ms > 0 {
            (nodes_in_tree as u128 * 1000 / search_time_ms) as u64
        } else {
            0
        };
        SearchMetrics { search_time_ms, simulations_run, nodes_in_tree, nodes_per_second }
    }
}

/// Top-level structure containing all game data.
#[derive(Debug, Serialize, Deserialize)]
pub struct GameRecording {
    pub metadata: GameMetadata,
    pub moves: Vec<MoveRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GameMetadata {
    pub date: String,
    pub start_time: String,
    pub end_time: Option<String>,
    pub duration_seconds: Option<u64>,
    pub opponent_color: String,
    pub simulation_budget: u32,
    pub result: GameResult,
    pub final_position_fen: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub enum GameResult {
    EvaluatorWin,
    OpponentWin,
    Draw,
    InProgress,
}

/// Per-move record, with search statistics attached when the move came
/// from `GumbelMcts` rather than an external opponent.
#[derive(Debug, Serialize, Deserialize)]
pub struct MoveRecord {
    pub move_number: u16,
    pub color: String,
    pub move_notation: String,
    pub search_metrics: Option<SearchMetrics>,
}

impl GameRecording {
    pub fn new(metadata: GameMetadata) -> Self {
        GameRecording { metadata, moves: Vec::new() }
    }

    pub fn add_move(&mut self, move_record: MoveRecord) {
        self.moves.push(move_record);
    }

    pub fn finalize(&mut self, end_time: String, duration_seconds: u64, result: GameResult) {
        self.metadata.end_time = Some(end_time);
        self.metadata.duration_seconds = Some(duration_seconds);
        self.metadata.result = result;
    }
}

impl GameMetadata {
    pub fn new(opponent_color: Color, simulation_budget: u32, start_time: String, date: String) -> Self {
        GameMetadata {
            date,
            start_time,
            end_time: None,
            duration_seconds: None,
            opponent_color: color_name(opponent_color),
            simulation_budget,
            result: GameResult::InProgress,
            final_position_fen: None,
        }
    }
}

impl MoveRecord {
    pub fn new(move_number: u16, color: Color, move_notation: String, search_metrics: Option<SearchMetrics>) -> Self {
        MoveRecord { move_number, color: color_name(color), move_notation, search_metrics }
    }
}

fn color_name(color: Color) -> String {
    match color {
        Color::White => "White".to_string(),
        Color::Black => "Black".to_string(),
    }
}

/// Accumulates a game's moves and search stats, writing a timestamped JSON
/// file under `game_recordings/` when the game ends.
pub struct GameRecorder {
    recording: GameRecording,
    start_instant: Instant,
    output_dir: String,
}

impl GameRecorder {
    pub fn new(opponent_color: Color, simulation_budget: u32) -> Self {
        let now = Local::now();
        let date = now.format("%Y-%m-%d").to_string();
        let start_time = now.format("%H:%M:%S").to_string();
        let metadata = GameMetadata::new(opponent_color, simulation_budget, start_time, date);
        GameRecorder {
            recording: GameRecording::new(metadata),
            start_instant: Instant::now(),
            output_dir: "game_recordings".to_string(),
        }
    }

    pub fn record_move(
        &mut self,
        move_number: u16,
        color: Color,
        move_notation: String,
        search_metrics: Option<SearchMetrics>,
    ) {
        self.recording.add_move(MoveRecord::new(move_number, color, move_notation, search_metrics));
    }

    pub fn finalize_and_save(&mut self, result: GameResult) -> Result<String, String> {
        let now = Local::now();
        let end_time = now.format("%H:%M:%S").to_string();
        let duration = self.start_instant.elapsed();
        self.recording.finalize(end_time, duration.as_secs(), result);

        fs::create_dir_all(&self.output_dir)
            .map_err(|e| format!("failed to create output directory: {e}"))?;

        let filename = format!("{}/game_{}.json", self.output_dir, now.format("%Y-%m-%d_%H-%M-%S"));
        let json = serde_json::to_string_pretty(&self.recording)
            .map_err(|e| format!("failed to serialize game recording: {e}"))?;

        let mut file =
            fs::File::create(&filename).map_err(|e| format!("failed to create {filename}: {e}"))?;
        file.write_all(json.as_bytes()).map_err(|e| format!("failed to write {filename}: {e}"))?;

        Ok(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_metrics_computes_nodes_per_second() {
        let metrics = SearchMetrics::new(std::time::Duration::from_millis(500), 200, 1000);
        assert_eq!(metrics.search_time_ms, 500);
        assert_eq!(metrics.nodes_per_second, 2000);
    }

    #[test]
    fn search_metrics_handles_zero_elapsed_time() {
        let metrics = SearchMetrics::new(std::time::Duration::from_millis(0), 10, 50);
        assert_eq!(metrics.nodes_per_second, 0);
    }

    #[test]
    fn game_recording_round_trips_through_json() {
        let metadata = GameMetadata::new(Color::White, 200, "12:00:00".to_string(), "2026-01-01".to_string());
        let mut recording = GameRecording::new(metadata);
        recording.add_move(MoveRecord::new(1, Color::White, "e2e4".to_string(), None));
        let json = serde_json::to_string(&recording).unwrap();
        let parsed: GameRecording = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.moves.len(), 1);
        assert_eq!(parsed.moves[0].move_notation, "e2e4");
    }
}
