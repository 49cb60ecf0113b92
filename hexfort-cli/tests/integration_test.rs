//! Integration tests for the HEXFORT rules engine
//!
//! Tests the full stack through the public API: layouts, boards, paths,
//! combat and victory.

use hexfort_core::{
    distance, hexagon, parse_layout, Board, ClickOutcome, Direction, GameConfig, Hex, Interaction,
    Side, Terrain, TileRecord, UnitKind, MAX_COORDINATE,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ============================================================================
// TEST FIXTURES
// ============================================================================

/// Radius-3 plain board, Orange fort at the bottom, Blue fort at the top,
/// an orange flag in Orange's fort and a blue flag in Blue's fort.
const DUEL_LAYOUT: &str = "\
# duel
0,3,Oo
0,-3,Bb
";

fn duel_records() -> Vec<TileRecord> {
    let mut records = hexagon(3, Terrain::Plain);
    records.extend(parse_layout(DUEL_LAYOUT));
    records
}

fn seeded_board(records: Vec<TileRecord>, config: &GameConfig, seed: u64) -> Board {
    Board::with_rng(records, config, ChaCha8Rng::seed_from_u64(seed))
}

// ============================================================================
// GEOMETRY
// ============================================================================

#[test]
fn test_distance_properties() {
    let a = Hex::new(2, -1);
    let b = Hex::new(-1, 3);
    assert_eq!(distance(a, a), 0);
    assert_eq!(distance(a, b), distance(b, a));
    assert_eq!(distance(Hex::new(0, 0), Hex::new(2, -1)), 2);
    assert_eq!(distance(Hex::new(0, 0), Hex::new(0, 3)), 3);
    for neighbor in a.neighbors() {
        assert_eq!(distance(a, neighbor), 1);
    }
}

// ============================================================================
// LAYOUT TO BOARD
// ============================================================================

#[test]
fn test_layout_builds_board() {
    let board = seeded_board(duel_records(), &GameConfig::default(), 0);

    // Layout records override the generated plain tiles
    assert_eq!(board.grid().len(), 37);
    let orange_fort = board.tile(Hex::new(0, 3)).unwrap();
    assert_eq!(orange_fort.terrain(), Terrain::Fort(Side::Orange));
    assert_eq!(orange_fort.owner(), Some(Side::Orange));
    assert_eq!(orange_fort.flags().len(), 1);
    assert_eq!(orange_fort.flags()[0].owner(), Side::Orange);

    let blue_fort = board.tile(Hex::new(0, -3)).unwrap();
    assert_eq!(blue_fort.owner(), Some(Side::Blue));
    assert_eq!(board.tile(Hex::new(0, 0)).unwrap().owner(), None);
}

#[test]
fn test_extreme_coordinates_are_skipped() {
    let records = parse_layout("2147483647,0,T\n-2147483648,5,M\n0,0,T\n1,0,G\n");
    let board = seeded_board(records, &GameConfig::default(), 0);
    assert_eq!(board.grid().len(), 2);
    assert_eq!(
        board.tile(Hex::new(0, 0)).unwrap().neighbor(Direction::SE),
        Some(Hex::new(1, 0))
    );

    // Records built by hand past the limit are dropped as well
    let far = TileRecord::new(Hex::new(MAX_COORDINATE + 1, 0), Terrain::Plain);
    let board = seeded_board(vec![far], &GameConfig::default(), 0);
    assert!(board.grid().is_empty());
}

// ============================================================================
// SPAWNING
// ============================================================================

#[test]
fn test_spawn_costs_gold() {
    let mut board = seeded_board(duel_records(), &GameConfig::default(), 0);
    assert_eq!(board.gold(Side::Orange), 10);

    assert!(board.begin_spawn(UnitKind::Marines));
    assert_eq!(
        board.click(Hex::new(0, 3)),
        ClickOutcome::Spawned {
            hex: Hex::new(0, 3),
            kind: UnitKind::Marines
        }
    );
    assert_eq!(board.gold(Side::Orange), 9);
    assert_eq!(board.gold(Side::Blue), 10);

    // Marines on their own fort never pick up their own flag
    let tile = board.tile(Hex::new(0, 3)).unwrap();
    assert!(tile.unit().unwrap().flag().is_none());
    assert_eq!(tile.flags().len(), 1);
    assert_eq!(board.winner(), None);
}

#[test]
fn test_spawn_refused() {
    let mut board = seeded_board(duel_records(), &GameConfig::default().with_starting_gold(2), 0);

    // Cannot afford
    assert!(!board.begin_spawn(UnitKind::Tank));
    assert_eq!(board.interaction(), Interaction::Idle);

    // Not our fort, then occupied
    assert!(board.begin_spawn(UnitKind::Marines));
    assert_eq!(board.click(Hex::new(0, -3)), ClickOutcome::Ignored);
    assert!(matches!(board.click(Hex::new(0, 3)), ClickOutcome::Spawned { .. }));
    assert!(board.begin_spawn(UnitKind::Marines));
    assert_eq!(board.click(Hex::new(0, 3)), ClickOutcome::Ignored);
    assert_eq!(board.gold(Side::Orange), 1);
}

// ============================================================================
// PATHS
// ============================================================================

#[test]
fn test_moveable_set_matches_range() {
    let mut board = seeded_board(hexagon(4, Terrain::Plain), &GameConfig::default(), 0);
    let origin = Hex::new(0, 0);
    board.deploy(origin, UnitKind::Tank, Side::Orange);
    board.click(origin);

    let expected: Vec<Hex> = board
        .grid()
        .iter()
        .map(|tile| tile.hex())
        .filter(|&hex| (1..=3).contains(&distance(origin, hex)))
        .collect();

    assert_eq!(board.move_paths().len(), expected.len());
    for hex in expected {
        let path = &board.move_paths()[&hex];
        // Every destination is reached by a shortest path
        assert_eq!(path.len() as u32, distance(origin, hex));
        assert_eq!(path.origin(), origin);
        assert_eq!(path.destination(), hex);
    }
    assert!(board.attack_paths().is_empty());
}

#[test]
fn test_mountains_and_units_shape_paths() {
    let mut records = hexagon(3, Terrain::Plain);
    records.push(TileRecord::new(Hex::new(0, -1), Terrain::Mountain));
    let mut board = seeded_board(records, &GameConfig::default(), 0);
    board.deploy(Hex::new(0, 0), UnitKind::Marines, Side::Orange);
    board.deploy(Hex::new(1, -1), UnitKind::Antitank, Side::Blue);
    board.click(Hex::new(0, 0));

    assert!(!board.move_paths().contains_key(&Hex::new(0, -1)));
    assert!(!board.move_paths().contains_key(&Hex::new(1, -1)));
    // Straight north is walled off; the detour is too long
    assert!(!board.move_paths().contains_key(&Hex::new(0, -2)));
    assert_eq!(board.attack_paths()[&Hex::new(1, -1)].len(), 1);
}

// ============================================================================
// COMBAT
// ============================================================================

#[test]
fn test_exact_combat() {
    let config = GameConfig::default().with_combat_margin(0.0);
    let mut board = seeded_board(duel_records(), &config, 0);
    board.deploy(Hex::new(0, 0), UnitKind::Marines, Side::Orange);
    board.deploy(Hex::new(0, -1), UnitKind::Tank, Side::Blue);

    board.click(Hex::new(0, 0));
    let outcome = board.click(Hex::new(0, -1));
    let ClickOutcome::Attacked { report, .. } = outcome else {
        panic!("expected attack, got {:?}", outcome);
    };
    assert_eq!(report.attacker_damage, 40);
    assert_eq!(report.defender_damage, 25);
    assert_eq!(board.unit(Hex::new(0, 0)).unwrap().health(), 60);
    assert_eq!(board.unit(Hex::new(0, -1)).unwrap().health(), 125);
    assert_eq!(board.unit(Hex::new(0, 0)).unwrap().moves_remaining(), 0);
}

#[test]
fn test_seeded_combat_is_deterministic() {
    let play = |seed: u64| {
        let mut board = seeded_board(duel_records(), &GameConfig::default(), seed);
        board.deploy(Hex::new(0, 0), UnitKind::Marines, Side::Orange);
        board.deploy(Hex::new(0, -1), UnitKind::Tank, Side::Blue);
        board.click(Hex::new(0, 0));
        let outcome = board.click(Hex::new(0, -1));
        (outcome, board.snapshot())
    };

    let (first, first_view) = play(17);
    let (second, second_view) = play(17);
    assert_eq!(first, second);
    assert_eq!(first_view, second_view);

    let ClickOutcome::Attacked { report, .. } = first else {
        panic!("expected attack, got {:?}", first);
    };
    // Bias 0.5 with margin 0.1
    assert!((32..=48).contains(&report.attacker_damage));
    assert!((20..=30).contains(&report.defender_damage));
}

// ============================================================================
// TURNS AND VICTORY
// ============================================================================

#[test]
fn test_end_turn_alternates() {
    let mut board = seeded_board(duel_records(), &GameConfig::default(), 0);
    let mut sides = Vec::new();
    for _ in 0..4 {
        sides.push(board.current_player());
        assert!(board.end_turn());
    }
    assert_eq!(sides, vec![Side::Orange, Side::Blue, Side::Orange, Side::Blue]);
    assert_eq!(board.turn(), 5);
}

#[test]
fn test_blue_captures_orange_flag() {
    let mut records = duel_records();
    records.push(TileRecord::new(Hex::new(0, -1), Terrain::Plain).with_flag(Side::Orange));
    let mut board = seeded_board(records, &GameConfig::default(), 0);
    board.end_turn();
    assert_eq!(board.current_player(), Side::Blue);

    // Deploying onto the loose flag picks it up
    board.deploy(Hex::new(0, -1), UnitKind::Marines, Side::Blue);
    assert_eq!(board.unit(Hex::new(0, -1)).unwrap().flag().map(|f| f.owner()), Some(Side::Orange));
    assert!(board.tile(Hex::new(0, -1)).unwrap().flags().is_empty());

    board.click(Hex::new(0, -1));
    assert_eq!(
        board.click(Hex::new(0, -3)),
        ClickOutcome::Moved {
            from: Hex::new(0, -1),
            to: Hex::new(0, -3)
        }
    );
    assert_eq!(board.winner(), Some(Side::Blue));
    assert!(!board.end_turn());
    assert_eq!(board.snapshot().winner, Some(Side::Blue));
}
