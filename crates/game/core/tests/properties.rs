//! Property tests for the combat formulas, the movement planner and the
//! battle-wide invariants.

use std::collections::HashSet;

use proptest::prelude::*;
use strum::IntoEnumIterator;
use tactics_core::combat::{calculate_damage, calculate_hit_rate, is_backstab};
use tactics_core::movement::{CheapestReach, FifoReach};
use tactics_core::*;

fn terrain_kind() -> impl Strategy<Value = TerrainKind> {
    prop::sample::select(TerrainKind::iter().collect::<Vec<_>>())
}

fn facing() -> impl Strategy<Value = Facing> {
    prop::sample::select(Facing::ALL.to_vec())
}

fn position() -> impl Strategy<Value = Position> {
    (0..15i32, 0..15i32).prop_map(|(row, col)| Position::new(row, col))
}

fn cells(units: &[ReachableCell]) -> HashSet<Position> {
    units.iter().map(|cell| cell.position).collect()
}

/// Distinct cells derived from `seed`, first `count` of a shuffled grid.
fn spread(seed: u64, count: usize) -> Vec<Position> {
    let mut taken = HashSet::new();
    let mut picked = Vec::new();
    let mut nonce = 0u64;
    while picked.len() < count {
        let index = PcgRng.below(compute_seed(seed, nonce, 0, 0), 225) as i32;
        nonce += 1;
        let position = Position::new(index / 15, index % 15);
        if taken.insert(position) {
            picked.push(position);
        }
    }
    picked
}

proptest! {
    #[test]
    fn damage_is_never_below_one(
        attack in -50i32..200,
        defense in -50i32..200,
        kind in terrain_kind(),
        is_counter in any::<bool>(),
        backstab in any::<bool>(),
    ) {
        let attacker = Unit::new(UnitId(1), "A", Side::Player, Position::new(5, 5)).with_attack(attack);
        let defender = Unit::new(UnitId(2), "D", Side::Enemy, Position::new(5, 6)).with_defense(defense);
        let terrain = TerrainMap::uniform(GridDimensions::STANDARD, kind);
        prop_assert!(calculate_damage(&attacker, &defender, &terrain, is_counter, backstab) >= 1);
    }

    #[test]
    fn hit_rate_stays_in_bounds(
        attacker_skill in -100i32..200,
        defender_skill in -100i32..200,
        evasion in -100i32..200,
        kind in terrain_kind(),
        backstab in any::<bool>(),
    ) {
        let attacker = Unit::new(UnitId(1), "A", Side::Player, Position::new(5, 5)).with_skill(attacker_skill);
        let defender = Unit::new(UnitId(2), "D", Side::Enemy, Position::new(5, 6))
            .with_skill(defender_skill)
            .with_evasion(evasion);
        let terrain = TerrainMap::uniform(GridDimensions::STANDARD, kind);
        let rate = calculate_hit_rate(&attacker, &defender, &terrain, backstab);
        prop_assert!((10..=100).contains(&rate));
    }

    #[test]
    fn backstab_flips_with_facing(attacker in position(), defender in position(), facing in facing()) {
        prop_assume!(attacker != defender);
        let forward = is_backstab(attacker, defender, facing);
        let flipped = is_backstab(attacker, defender, facing.opposite());
        if forward {
            prop_assert!(!flipped);
        }
        // Exactly one facing exposes the back to any given attacker.
        let exposed = Facing::ALL
            .iter()
            .filter(|&&candidate| is_backstab(attacker, defender, candidate))
            .count();
        prop_assert_eq!(exposed, 1);
    }

    #[test]
    fn fifo_reach_is_monotone_on_uniform_terrain(
        origin in position(),
        kind in terrain_kind(),
        blockers in prop::collection::vec(position(), 0..12),
        movement in 0u32..8,
    ) {
        let terrain = TerrainMap::uniform(GridDimensions::STANDARD, kind);
        let mut units = vec![Unit::new(UnitId(0), "Mover", Side::Player, origin)];
        for (index, blocker) in blockers.into_iter().enumerate() {
            if blocker != origin {
                units.push(Unit::new(UnitId(index as u32 + 1), "Wall", Side::Enemy, blocker));
            }
        }
        let roster = Roster::new(units);
        let slow = roster.get(UnitId(0)).unwrap().clone().with_movement(movement);
        let fast = slow.clone().with_movement(movement + 1);

        let small = cells(&FifoReach.reachable(&slow, &terrain, &roster));
        let large = cells(&FifoReach.reachable(&fast, &terrain, &roster));
        prop_assert!(small.is_subset(&large));
    }

    #[test]
    fn cheapest_reach_is_monotone_on_any_terrain(
        origin in position(),
        terrain_seed in any::<u64>(),
        movement in 0u32..8,
        flying in any::<bool>(),
    ) {
        let terrain = TerrainMap::generate(GridDimensions::STANDARD, terrain_seed, &PcgRng);
        let capabilities = if flying { UnitCapabilities::FLYING } else { UnitCapabilities::empty() };
        let slow = Unit::new(UnitId(0), "Mover", Side::Player, origin)
            .with_movement(movement)
            .with_capabilities(capabilities);
        let fast = slow.clone().with_movement(movement + 2);
        let roster = Roster::new(vec![slow.clone()]);

        let small = cells(&CheapestReach.reachable(&slow, &terrain, &roster));
        let large = cells(&CheapestReach.reachable(&fast, &terrain, &roster));
        prop_assert!(small.is_subset(&large));

        // Cheapest reach never reports less than the FIFO variant.
        let fifo = cells(&FifoReach.reachable(&slow, &terrain, &roster));
        prop_assert!(fifo.is_subset(&small));
    }

    #[test]
    fn found_paths_are_valid(
        start in position(),
        end in position(),
        terrain_seed in any::<u64>(),
        blockers in prop::collection::vec(position(), 0..30),
    ) {
        let terrain = TerrainMap::generate(GridDimensions::STANDARD, terrain_seed, &PcgRng);
        let mover = Unit::new(UnitId(0), "Mover", Side::Player, start);
        let mut units = vec![mover.clone()];
        for (index, blocker) in blockers.into_iter().enumerate() {
            if blocker != start {
                units.push(Unit::new(UnitId(index as u32 + 1), "Wall", Side::Enemy, blocker));
            }
        }
        let roster = Roster::new(units);

        if let Some(path) = find_path(start, end, &terrain, &roster, &mover) {
            prop_assert_eq!(path.first().copied(), Some(start));
            prop_assert_eq!(path.last().copied(), Some(end));
            prop_assert!(path.iter().all(|cell| terrain.dimensions().contains(*cell)));
            prop_assert!(path.windows(2).all(|pair| pair[0].manhattan(pair[1]) == 1));
            let unique: HashSet<_> = path.iter().collect();
            prop_assert_eq!(unique.len(), path.len());
        }
    }
}

/// Plays the player side with the chase policy so battles actually progress.
fn play_player_turn(battle: &mut Battle) {
    let ready: Vec<UnitId> = battle
        .roster()
        .living_on(Side::Player)
        .filter(|unit| !unit.has_acted)
        .map(|unit| unit.id)
        .collect();

    for id in ready {
        if battle.phase() != BattlePhase::PlayerTurn {
            return;
        }
        if !battle.unit(id).is_some_and(Unit::is_alive) {
            continue;
        }
        let view = AiView::new(id, battle.roster(), battle.terrain(), battle.config().reach_mode);
        let decision = ChaseAi.decide(&view).unwrap();
        let here = battle.unit(id).unwrap().position;

        battle.select_unit(id).unwrap();
        let (destination, target) = match decision {
            AiDecision::Attack { target } => (here, Some(target)),
            AiDecision::Move { destination, target } => (destination, Some(target)),
            AiDecision::Wait => (here, None),
        };
        battle.move_selected(destination).unwrap();
        let targets = battle.show_attack_range().unwrap();
        match target.filter(|target| targets.contains(target)).or(targets.first().copied()) {
            Some(target) => {
                battle.choose_target(target).unwrap();
                battle.confirm_attack().unwrap();
            }
            None => battle.wait_selected().unwrap(),
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn turn_and_occupancy_invariants_hold(
        placement_seed in any::<u64>(),
        terrain_seed in any::<u64>(),
        roll_seed in any::<u64>(),
        players in 1usize..4,
        enemies in 1usize..4,
    ) {
        let positions = spread(placement_seed, players + enemies);
        let mut scenario = Scenario::new("random", GridDimensions::STANDARD)
            .with_terrain(TerrainSpec::Generated { seed: terrain_seed });
        for (index, position) in positions.into_iter().enumerate() {
            let side = if index < players { Side::Player } else { Side::Enemy };
            scenario.units.push(
                Unit::new(UnitId(index as u32 + 1), "Unit", side, position)
                    .with_hp(30)
                    .with_attack(18)
                    .with_defense(6),
            );
        }

        let mut battle = Battle::builder(scenario)
            .config(BattleConfig::with_roll_seed(roll_seed))
            .build()
            .unwrap();
        battle.start().unwrap();

        for _ in 0..40 {
            prop_assert_eq!(battle.phase(), BattlePhase::PlayerTurn);
            prop_assert!(battle.roster().living_on(Side::Player).all(|unit| !unit.has_acted));

            play_player_turn(&mut battle);
            prop_assert!(battle.roster().occupancy_is_consistent());
            if battle.is_over() {
                break;
            }
            if battle.phase() == BattlePhase::PlayerTurn {
                battle.end_turn().unwrap();
            }

            prop_assert_eq!(battle.phase(), BattlePhase::EnemyTurn);
            prop_assert!(battle.roster().living_on(Side::Player).all(|unit| unit.has_acted));

            while battle.phase() == BattlePhase::EnemyTurn {
                battle.advance_enemy().unwrap();
                prop_assert!(battle.roster().occupancy_is_consistent());
            }
            if battle.is_over() {
                break;
            }
        }

        if let Some(report) = battle.report() {
            let living = battle.roster().living_on(Side::Player).count();
            prop_assert_eq!(report.survivors.len(), living);
        }
    }
}
