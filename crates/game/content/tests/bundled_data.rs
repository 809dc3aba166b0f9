//! Loads the data shipped in `data/` and runs it through a battle.

use std::fs;

use tactics_content::{ContentFactory, builtin_scenario};
use tactics_core::{Battle, BattleConfig, BattlePhase, Position, ReachMode, Side, TerrainKind};

#[test]
fn bundled_scenarios_are_listed_and_valid() {
    let factory = ContentFactory::bundled();
    let names = factory.list_scenarios().unwrap();
    assert_eq!(names, vec!["river_ford".to_string(), "skirmish".to_string()]);

    for name in &names {
        let scenario = factory.load_scenario(name).unwrap();
        assert_eq!(&scenario.name, name);
        assert_eq!(scenario.validate(), Ok(()));
    }
}

#[test]
fn bundled_skirmish_matches_builtin() {
    let factory = ContentFactory::bundled();
    let from_file = factory.load_scenario("skirmish").unwrap();
    assert_eq!(Some(from_file), builtin_scenario("skirmish"));
}

#[test]
fn bundled_config_is_the_default() {
    let config = ContentFactory::bundled().load_config().unwrap();
    assert_eq!(config, BattleConfig::default());
}

#[test]
fn river_ford_starts_a_battle() {
    let scenario = ContentFactory::bundled().load_scenario("river_ford").unwrap();
    let mut battle = Battle::builder(scenario).build().unwrap();
    battle.start().unwrap();

    assert_eq!(battle.phase(), BattlePhase::PlayerTurn);
    assert_eq!(battle.terrain().kind(Position::new(5, 0)), TerrainKind::River);
    assert_eq!(battle.terrain().kind(Position::new(5, 5)), TerrainKind::Plain);
    assert_eq!(battle.roster().living_on(Side::Enemy).count(), 2);
}

#[test]
fn user_data_directory_overrides() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("scenarios")).unwrap();
    fs::write(
        dir.path().join("config.toml"),
        "reach_mode = \"cheapest\"\nauto_end_turn = false\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("scenarios").join("pocket.ron"),
        r#"(
            name: "pocket",
            dimensions: (3, 4),
            units: [
                (id: 1, name: "Lina", side: Player, position: (0, 0)),
                (id: 2, name: "Grub", side: Enemy, position: (2, 3)),
            ],
        )"#,
    )
    .unwrap();
    fs::write(dir.path().join("scenarios").join("notes.txt"), "ignored").unwrap();

    let factory = ContentFactory::new(dir.path());
    let config = factory.load_config().unwrap();
    assert_eq!(config.reach_mode, ReachMode::Cheapest);
    assert!(!config.auto_end_turn);

    assert_eq!(factory.list_scenarios().unwrap(), vec!["pocket".to_string()]);
    let pocket = factory.resolve_scenario("pocket").unwrap();
    assert_eq!(pocket.units.len(), 2);
    assert_eq!(pocket.dimensions.cols, 4);
}

#[test]
fn broken_scenario_reports_its_path() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("scenarios")).unwrap();
    fs::write(
        dir.path().join("scenarios").join("broken.ron"),
        r#"(name: "broken", units: [(id: 1, name: "A", side: Player, position: (20, 0))])"#,
    )
    .unwrap();

    let error = ContentFactory::new(dir.path())
        .load_scenario("broken")
        .unwrap_err()
        .to_string();
    assert!(error.contains("broken.ron"), "{error}");
}
