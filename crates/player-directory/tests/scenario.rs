//! End-to-end scenarios over the player directory.

use player_directory::specs::{ActiveWithin, EmailIs, InSegment, Leaderboard, MinimumLevel};
use player_directory::{DirectoryConfig, DirectoryError, Player, PlayerRepository, Status};
use proptest::prelude::*;
use specula::{evaluate, MemorySource, QuerySource, Spec, SpecError, Specification, Timestamp};

// =============================================================================
// Fixtures
// =============================================================================

fn now() -> Timestamp {
    Timestamp::from_secs(1_700_000_000)
}

fn three_players() -> Vec<Player> {
    vec![
        Player::new(1, "one@example.com", "VIP", now().minus_days(5)),
        Player::new(2, "two@example.com", "VIP", now().minus_days(40)),
        Player::new(3, "three@example.com", "Regular", now().minus_days(2)),
    ]
}

fn mixed_players() -> Vec<Player> {
    let segments = ["VIP", "Regular", "Trial"];
    (1..=30u64)
        .map(|id| {
            Player::new(
                id,
                format!("p{id}@example.com"),
                segments[(id % 3) as usize],
                now().minus_days((id * 2) as i64),
            )
            .with_level((id % 11) as u32)
        })
        .collect()
}

fn ids(players: &[&Player]) -> Vec<u64> {
    players.iter().map(|p| p.id).collect()
}

// =============================================================================
// Concrete scenarios
// =============================================================================

#[test]
fn vip_and_recently_active() {
    let players = three_players();
    let spec = InSegment::new("VIP")
        .unwrap()
        .and(ActiveWithin::as_of(30, now()).unwrap());

    assert!(spec.is_satisfied_by(&players[0]));
    assert!(!spec.is_satisfied_by(&players[1]), "inactive");
    assert!(!spec.is_satisfied_by(&players[2]), "wrong segment");
}

#[test]
fn composite_equals_intersection_of_independent_filters() {
    let players = mixed_players();
    let active = ActiveWithin::as_of(30, now()).unwrap();
    let vip = InSegment::new("VIP").unwrap();

    let active_ids = ids(&evaluate(MemorySource::new(&players), &active).fetch().unwrap());
    let vip_ids = ids(&evaluate(MemorySource::new(&players), &vip).fetch().unwrap());
    let expected: Vec<u64> = active_ids
        .iter()
        .copied()
        .filter(|id| vip_ids.contains(id))
        .collect();

    let both = active.and(vip);
    let combined = ids(&evaluate(MemorySource::new(&players), &both).fetch().unwrap());

    assert!(!expected.is_empty());
    assert_eq!(combined, expected);
}

#[test]
fn fifteen_players_in_two_pages() {
    let players: Vec<Player> = mixed_players().into_iter().take(15).collect();
    let repo = PlayerRepository::with_players(players, DirectoryConfig::default());
    let spec = Spec::<Player>::all().order_by(Player::ID);

    let mut all = ids(&repo.list(&spec, Some(1), Some(10)).unwrap());
    let second = ids(&repo.list(&spec, Some(2), Some(10)).unwrap());
    assert_eq!(all.len(), 10);
    assert_eq!(second.len(), 5);

    all.extend(second);
    assert_eq!(all, (1..=15).collect::<Vec<_>>());
}

#[test]
fn page_past_the_end_is_empty() {
    let repo = PlayerRepository::with_players(three_players(), DirectoryConfig::default());
    let page = repo.list(&Spec::all(), Some(5), Some(10)).unwrap();
    assert!(page.is_empty());
}

#[test]
fn zero_page_values_are_rejected() {
    let repo = PlayerRepository::with_players(three_players(), DirectoryConfig::default());
    let err = repo.list(&Spec::all(), Some(0), Some(10)).unwrap_err();
    assert!(matches!(
        err,
        DirectoryError::Spec(SpecError::InvalidPage { number: 0, size: 10 })
    ));
}

#[test]
fn leaderboard_orders_and_excludes_suspended() {
    let mut players = mixed_players();
    players[2] = players[2].clone().with_status(Status::Suspended);
    let suspended_id = players[2].id;
    let repo = PlayerRepository::with_players(players, DirectoryConfig::default());

    let board = Leaderboard::new("VIP").unwrap();
    let found = repo.find_all(&board).unwrap();

    assert!(found.iter().all(|p| p.segment == "VIP"));
    assert!(found.iter().all(|p| p.id != suspended_id));
    for pair in found.windows(2) {
        assert!(pair[0].level >= pair[1].level);
        if pair[0].level == pair[1].level {
            assert!(pair[0].id < pair[1].id);
        }
    }
}

#[test]
fn email_lookup_through_repository() {
    let repo = PlayerRepository::with_players(three_players(), DirectoryConfig::default());
    let found = repo.first(&EmailIs::new("TWO@example.com").unwrap()).unwrap();
    assert_eq!(found.map(|p| p.id), Some(2));
}

#[test]
fn negation_of_a_named_spec() {
    let repo = PlayerRepository::with_players(mixed_players(), DirectoryConfig::default());
    let low = MinimumLevel::new(5).unwrap().not();
    let found = repo.find_all(&low).unwrap();
    assert!(!found.is_empty());
    assert!(found.iter().all(|p| p.level < 5));
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    /// Counting agrees with fetching for any segment/level combination.
    #[test]
    fn count_matches_find_all(
        segment in prop_oneof![Just("VIP"), Just("Regular"), Just("Trial")],
        level in 0u32..12,
    ) {
        let repo = PlayerRepository::with_players(mixed_players(), DirectoryConfig::default());
        let spec = InSegment::new(segment).unwrap().and(MinimumLevel::new(level).unwrap());
        prop_assert_eq!(repo.count(&spec).unwrap(), repo.find_all(&spec).unwrap().len());
    }

    /// Negating twice selects the same players.
    #[test]
    fn double_negation_selects_the_same_players(days in 0i64..80) {
        let repo = PlayerRepository::with_players(mixed_players(), DirectoryConfig::default());
        let active = ActiveWithin::as_of(days, now()).unwrap();
        let expected = ids(&repo.find_all(&active).unwrap());
        let twice = active.not().not();
        prop_assert_eq!(ids(&repo.find_all(&twice).unwrap()), expected);
    }
}
