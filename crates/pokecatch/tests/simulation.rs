//! End-to-end runs of the simulation driver.

use std::time::Duration;

use pokecatch::prelude::*;

// =========================================================================
// Helpers
// =========================================================================

async fn run_with(builder: SimulationBuilder) -> RunReport {
    builder.build().unwrap().run().await.unwrap()
}

fn seeded(max_players: usize) -> SimulationBuilder {
    Simulation::builder()
        .max_players(max_players)
        .leader_name("Ash")
        .seed(42)
}

fn ms(t: Option<SimTime>) -> Option<u64> {
    t.map(SimTime::as_millis)
}

// =========================================================================
// Roster scenarios
// =========================================================================

#[tokio::test]
async fn test_run_five_players_fill_on_first_four_ticks() {
    let report = run_with(seeded(5)).await;
    let room = &report.room;

    assert_eq!(
        room.players,
        vec!["Ash", "Player 1", "Player 2", "Player 3", "Player 4"]
    );
    assert_eq!(report.joins_accepted, 4);
    assert_eq!(report.joins_rejected, 0);
    assert_eq!(room.max_players, 5);
    assert_eq!(room.leader, "Ash");
    assert_eq!(room.join_deadline.as_millis(), 5_000);
}

#[tokio::test]
async fn test_run_single_player_room_is_leader_only() {
    let report = run_with(seeded(1)).await;

    assert_eq!(report.room.players, vec!["Ash"]);
    assert_eq!(report.joins_accepted, 0);
    assert_eq!(report.joins_rejected, 0);
    assert_eq!(report.room.results.len(), 1);
    assert_eq!(report.room.results[0].player_name, "Ash");
}

#[tokio::test]
async fn test_run_default_capacity_is_three() {
    let report = run_with(Simulation::builder().seed(1)).await;
    assert_eq!(report.room.players, vec!["Leader", "Player 1", "Player 2"]);
    assert_eq!(report.room.max_players, 3);
}

#[tokio::test]
async fn test_run_join_window_caps_large_room() {
    // Ticks at 1-4s join; the 5s tick finds joins already closed.
    let report = run_with(seeded(10)).await;
    assert_eq!(report.room.players.len(), 5);
    assert_eq!(report.joins_accepted, 4);
    assert_eq!(report.joins_rejected, 0);
}

#[tokio::test]
async fn test_run_slower_spawn_interval_admits_fewer() {
    let report = run_with(seeded(10).spawn_interval(Duration::from_secs(2))).await;
    assert_eq!(report.room.players, vec!["Ash", "Player 1", "Player 2"]);
}

#[tokio::test]
async fn test_run_counts_rejected_duplicate_name() {
    let report = run_with(seeded(3).leader_name("Player 1")).await;

    assert_eq!(report.joins_rejected, 1);
    assert_eq!(report.joins_accepted, 2);
    assert_eq!(report.room.players, vec!["Player 1", "Player 2", "Player 3"]);
}

// =========================================================================
// Mission and timeline
// =========================================================================

#[tokio::test]
async fn test_run_timeline() {
    let report = run_with(seeded(3)).await;
    let room = &report.room;

    assert_eq!(room.created_at.as_millis(), 0);
    assert_eq!(ms(room.mission_started_at), Some(5_000));
    assert_eq!(ms(room.mission_ended_at), Some(15_000));
    assert_eq!(ms(room.ended_at), Some(15_000));
    assert_eq!(report.finished_at.as_millis(), 15_000);
}

#[tokio::test]
async fn test_run_resolves_one_result_per_player() {
    let report = run_with(seeded(4)).await;
    let room = &report.room;

    let resolved: Vec<&str> = room.results.iter().map(|r| r.player_name.as_str()).collect();
    let roster: Vec<&str> = room.players.iter().map(String::as_str).collect();
    assert_eq!(resolved, roster);
    assert!(room.caught_count() <= room.players.len());
    assert!(pokecatch_room::WILD_POKEMON.contains(&room.pokemon.as_str()));
    assert_eq!(room.location, "Viridian Forest");
}

#[tokio::test]
async fn test_run_certain_catch_everyone_succeeds() {
    let config = SimulationConfig {
        room: RoomConfig {
            catch_odds: CatchOdds::ALWAYS,
            ..RoomConfig::with_max_players(4)
        },
        seed: Some(5),
        ..Default::default()
    };
    let report = run_with(Simulation::builder().config(config)).await;
    assert_eq!(report.room.caught_count(), 4);
    assert_eq!(report.room.catchers().len(), 4);
}

#[tokio::test]
async fn test_run_single_pokemon_pool() {
    let config = SimulationConfig {
        pokemon_pool: vec!["Mew".into()],
        location: "Faraway Island".into(),
        ..Default::default()
    };
    let report = run_with(Simulation::builder().config(config)).await;
    assert_eq!(report.room.pokemon, "Mew");
    assert_eq!(report.room.location, "Faraway Island");
}

// =========================================================================
// Determinism and pacing
// =========================================================================

#[tokio::test]
async fn test_run_same_seed_same_report() {
    let a = run_with(seeded(5)).await;
    let b = run_with(seeded(5)).await;
    assert_eq!(a, b);
    assert_eq!(a.seed, Some(42));
}

#[tokio::test]
async fn test_run_unseeded_report_has_no_seed() {
    let report = run_with(Simulation::builder()).await;
    assert_eq!(report.seed, None);
    assert_eq!(report.room.players.len(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_run_realtime_takes_full_duration() {
    let start = tokio::time::Instant::now();
    let report = run_with(seeded(3).pacing(Pacing::RealTime)).await;

    assert!(start.elapsed() >= Duration::from_secs(15));
    assert_eq!(report, run_with(seeded(3)).await);
}

#[tokio::test]
async fn test_run_virtual_does_not_wait() {
    let start = std::time::Instant::now();
    run_with(seeded(5)).await;
    assert!(start.elapsed() < Duration::from_secs(5));
}

// =========================================================================
// Errors and output
// =========================================================================

#[tokio::test]
async fn test_run_blank_leader_is_validation_error() {
    let err = seeded(3)
        .leader_name("")
        .build()
        .unwrap()
        .run()
        .await
        .unwrap_err();
    assert!(err.is_validation());
}

#[test]
fn test_build_zero_capacity_is_validation_error() {
    let err = seeded(0).build().unwrap_err();
    assert!(err.is_validation());
}

#[tokio::test]
async fn test_report_json_shape() {
    let report = run_with(seeded(2)).await;
    let bytes = JsonCodec::pretty().encode(&report).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(value["seed"], 42);
    assert_eq!(value["joins_accepted"], 1);
    assert_eq!(value["finished_at"], 15_000);
    assert_eq!(value["room"]["players"][1], "Player 1");

    let decoded: RunReport = JsonCodec::default().decode(&bytes).unwrap();
    assert_eq!(decoded, report);
}
