//! End-to-end session tests on the built-in scenarios.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tactics_content::builtin_scenario;
use tactics_core::{
    Battle, BattleCommand, BattleConfig, BattleEvent, BattlePhase, EnemyStep, FixedRollRng,
    GameError, Side,
};
use tactics_runtime::{
    CollectingSink, Event, NoPacing, Pacer, PassivePlayer, RuntimeError, Session, SessionConfig,
    Topic,
};

fn skirmish(roll: u32) -> Battle {
    let scenario = builtin_scenario("skirmish").unwrap();
    Battle::builder(scenario)
        .rng(FixedRollRng(roll))
        .build()
        .unwrap()
}

#[derive(Clone, Default)]
struct CountingPacer {
    steps: Arc<AtomicUsize>,
}

#[async_trait]
impl Pacer for CountingPacer {
    async fn pace(&self, _step: &EnemyStep) {
        self.steps.fetch_add(1, Ordering::SeqCst);
    }
}

#[tokio::test]
async fn auto_played_skirmish_reaches_an_outcome() {
    let sink = CollectingSink::new();
    let session = Session::builder(skirmish(1))
        .pacer(NoPacing)
        .sink(sink.clone())
        .build();
    let mut outcomes = session.subscribe(Topic::Outcome);

    let report = session.run_to_completion().await.unwrap();
    assert_eq!(report.scenario, "skirmish");
    assert!(report.turns >= 1);

    assert_eq!(sink.reports().await, vec![report.clone()]);
    match outcomes.recv().await.unwrap() {
        Event::Outcome(published) => assert_eq!(published, report),
        other => panic!("unexpected event {other:?}"),
    }

    let observation = session.handle().observe().await.unwrap();
    assert!(observation.phase().is_terminal());
    assert_eq!(
        report.survivors.len(),
        observation
            .snapshot
            .units
            .iter()
            .filter(|unit| unit.side == Side::Player && unit.is_alive())
            .count()
    );

    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn identical_seeds_replay_identically() {
    let config = BattleConfig::with_roll_seed(42);
    let mut reports = Vec::new();
    for _ in 0..2 {
        let scenario = builtin_scenario("skirmish").unwrap();
        let battle = Battle::builder(scenario).config(config.clone()).build().unwrap();
        let session = Session::builder(battle).build();
        reports.push(session.run_to_completion().await.unwrap());
        session.shutdown().await.unwrap();
    }
    assert_eq!(reports[0], reports[1]);
}

#[tokio::test]
async fn passive_player_hits_the_turn_limit() {
    let pacer = CountingPacer::default();
    let session = Session::builder(skirmish(1))
        .config(SessionConfig {
            max_turns: 1,
            ..SessionConfig::default()
        })
        .player(PassivePlayer)
        .pacer(pacer.clone())
        .build();

    let error = session.run_to_completion().await.unwrap_err();
    assert!(matches!(error, RuntimeError::TurnLimit { limit: 1 }));
    assert_eq!(error.error_code(), "RUNTIME_TURN_LIMIT");
    // One enemy acted once before turn two began.
    assert_eq!(pacer.steps.load(Ordering::SeqCst), 1);

    let observation = session.handle().observe().await.unwrap();
    assert_eq!(observation.phase(), BattlePhase::PlayerTurn);
    assert_eq!(observation.snapshot.turn, 2);
}

#[tokio::test]
async fn handle_streams_events_and_snapshots() {
    let session = Session::builder(skirmish(1)).build();
    let handle = session.handle();
    let mut events = handle.subscribe(Topic::Battle);
    let mut snapshots = handle.subscribe(Topic::Snapshot);

    let snapshot = handle.start().await.unwrap();
    assert_eq!(snapshot.phase, BattlePhase::PlayerTurn);
    assert!(matches!(
        events.recv().await.unwrap(),
        Event::Battle(BattleEvent::PhaseChanged {
            phase: BattlePhase::PlayerTurn,
            turn: 1
        })
    ));
    assert!(matches!(snapshots.recv().await.unwrap(), Event::Snapshot(s) if s == snapshot));

    let selected = handle.select(tactics_core::UnitId(1)).await.unwrap();
    assert_eq!(selected.selected, Some(tactics_core::UnitId(1)));
    assert!(!selected.reachable.is_empty());
    assert!(matches!(
        events.recv().await.unwrap(),
        Event::Battle(BattleEvent::UnitSelected { .. })
    ));

    drop(handle);
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn rejected_commands_surface_battle_errors() {
    let session = Session::builder(skirmish(1)).build();
    let handle = session.handle();

    let error = handle.apply(BattleCommand::ConfirmAttack).await.unwrap_err();
    assert!(matches!(error, RuntimeError::Battle(_)));
    assert_eq!(error.error_code(), "BATTLE_WRONG_PHASE");

    // The battle is untouched and still accepts a start.
    assert_eq!(handle.observe().await.unwrap().phase(), BattlePhase::Idle);
    handle.start().await.unwrap();

    drop(handle);
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn enemy_phase_is_paced_per_unit() {
    let scenario = builtin_scenario("crossing").unwrap();
    let battle = Battle::builder(scenario).build().unwrap();
    let pacer = CountingPacer::default();
    let session = Session::builder(battle).pacer(pacer.clone()).build();
    let handle = session.handle();

    handle.start().await.unwrap();
    handle.end_turn().await.unwrap();
    let steps = session.run_enemy_phase().await.unwrap();

    assert_eq!(steps.len(), 3);
    assert_eq!(pacer.steps.load(Ordering::SeqCst), 3);
    let observation = handle.observe().await.unwrap();
    assert_eq!(observation.phase(), BattlePhase::PlayerTurn);
    assert_eq!(observation.snapshot.turn, 2);

    drop(handle);
    session.shutdown().await.unwrap();
}
