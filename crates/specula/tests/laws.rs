//! Property-based tests for specification composition and evaluation.
//!
//! These tests verify the algebraic laws the combinators promise and the
//! ordering/pagination guarantees of the evaluator over arbitrary data.

use proptest::prelude::*;
use specula::{
    evaluate, evaluate_paginated, Entity, MemorySource, Number, QuerySource, Spec, Specification,
    Value,
};

// =============================================================================
// Test Data Structures
// =============================================================================

#[derive(Debug, Clone)]
struct Player {
    id: usize,
    segment: String,
    level: i64,
    banned: bool,
    verified: Option<bool>,
}

impl Entity for Player {
    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::Number(Number::from(self.id)),
            "segment" => Value::from(self.segment.as_str()),
            "level" => Value::Number(Number::from(self.level)),
            "banned" => Value::Bool(self.banned),
            "verified" => self.verified.map_or(Value::None, Value::Bool),
            _ => Value::None,
        }
    }
}

// =============================================================================
// Strategies
// =============================================================================

fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("VIP".to_string()),
        Just("casual".to_string()),
        Just("whale".to_string()),
        Just(String::new()),
    ]
}

fn player_strategy() -> impl Strategy<Value = Player> {
    (
        segment_strategy(),
        -50i64..150,
        any::<bool>(),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(segment, level, banned, verified)| Player {
            id: 0,
            segment,
            level,
            banned,
            verified,
        })
}

fn players_strategy(max: usize) -> impl Strategy<Value = Vec<Player>> {
    prop::collection::vec(player_strategy(), 0..max).prop_map(|mut players| {
        for (i, p) in players.iter_mut().enumerate() {
            p.id = i;
        }
        players
    })
}

/// A few independently built specifications, each with its own parameter.
///
/// Some read the optional `verified` flag or a field no player has, so
/// bodies can evaluate to a missing value as well as to a boolean.
fn spec_strategy() -> impl Strategy<Value = Spec<Player>> {
    prop_oneof![
        segment_strategy().prop_map(|s| Spec::build(move |it| it.field("segment").eq(s))),
        (-50i64..150).prop_map(|n| Spec::build(move |it| it.field("level").gte(n))),
        (-50i64..150).prop_map(|n| Spec::build(move |it| it.field("level").lt(n))),
        any::<bool>().prop_map(|b| Spec::build(move |it| it.field("banned").eq(b))),
        any::<bool>().prop_map(|b| Spec::build(move |it| it.field("verified").eq(b))),
        Just(Spec::build(|it| it.field("verified"))),
        Just(Spec::build(|it| it.field("banned"))),
        Just(Spec::build(|it| it.field("nickname").ne("anon"))),
        Just(Spec::all()),
    ]
}

fn ids(players: &[&Player]) -> Vec<usize> {
    players.iter().map(|p| p.id).collect()
}

// =============================================================================
// Composition Laws
// =============================================================================

proptest! {
    /// Negation selects exactly the entities its operand rejects.
    #[test]
    fn negation_is_complement(spec in spec_strategy(), player in player_strategy()) {
        let negated = spec.clone().not();
        prop_assert_eq!(negated.is_satisfied_by(&player), !spec.is_satisfied_by(&player));
    }

    /// Negation splits any collection into two disjoint halves.
    #[test]
    fn negation_partitions_the_source(
        players in players_strategy(40),
        spec in spec_strategy(),
    ) {
        let kept = ids(&evaluate(MemorySource::new(&players), &spec).fetch().unwrap());
        let negated = spec.not();
        let rest = ids(&evaluate(MemorySource::new(&players), &negated).fetch().unwrap());

        let mut all: Vec<usize> = kept.iter().chain(&rest).copied().collect();
        all.sort();
        prop_assert_eq!(all, (0..players.len()).collect::<Vec<_>>());
    }

    /// Double negation is the identity.
    #[test]
    fn double_negation(spec in spec_strategy(), player in player_strategy()) {
        let twice = spec.clone().not().not();
        prop_assert_eq!(twice.is_satisfied_by(&player), spec.is_satisfied_by(&player));
    }

    /// And agrees with evaluating each operand separately.
    #[test]
    fn and_matches_both_operands(
        left in spec_strategy(),
        right in spec_strategy(),
        player in player_strategy(),
    ) {
        let expected = left.is_satisfied_by(&player) && right.is_satisfied_by(&player);
        let combined = left.and(right);
        prop_assert_eq!(combined.try_satisfied_by(&player).ok(), Some(expected));
    }

    /// Or agrees with evaluating each operand separately.
    #[test]
    fn or_matches_either_operand(
        left in spec_strategy(),
        right in spec_strategy(),
        player in player_strategy(),
    ) {
        let expected = left.is_satisfied_by(&player) || right.is_satisfied_by(&player);
        let combined = left.or(right);
        prop_assert_eq!(combined.try_satisfied_by(&player).ok(), Some(expected));
    }

    /// Operand order does not change the outcome of and/or.
    #[test]
    fn and_or_commute(
        a in spec_strategy(),
        b in spec_strategy(),
        player in player_strategy(),
    ) {
        prop_assert_eq!(
            a.clone().and(b.clone()).is_satisfied_by(&player),
            b.clone().and(a.clone()).is_satisfied_by(&player)
        );
        prop_assert_eq!(
            a.clone().or(b.clone()).is_satisfied_by(&player),
            b.or(a).is_satisfied_by(&player)
        );
    }

    /// A composed predicate has exactly one parameter, whatever the nesting.
    #[test]
    fn composition_leaves_one_parameter(
        a in spec_strategy(),
        b in spec_strategy(),
        c in spec_strategy(),
    ) {
        let composed = a.and(b.not()).or(c);
        let predicate = composed.to_predicate();
        let free = predicate.free_params();
        prop_assert!(free.iter().all(|id| *id == predicate.param()));
    }
}

// =============================================================================
// Evaluation Laws
// =============================================================================

proptest! {
    /// Filtering never grows the result and keeps source order.
    #[test]
    fn filter_is_an_ordered_subset(
        players in players_strategy(40),
        spec in spec_strategy(),
    ) {
        let fetched = evaluate(MemorySource::new(&players), &spec).fetch().unwrap();
        prop_assert!(fetched.len() <= players.len());

        let fetched_ids = ids(&fetched);
        let mut sorted = fetched_ids.clone();
        sorted.sort();
        prop_assert_eq!(&fetched_ids, &sorted);

        for p in &fetched {
            prop_assert!(spec.is_satisfied_by(p));
        }
    }

    /// Ordering sorts by the key and keeps ties in source order.
    #[test]
    fn ordering_is_stable(players in players_strategy(40)) {
        let spec = Spec::<Player>::all().order_by("level");
        let fetched = evaluate(MemorySource::new(&players), &spec).fetch().unwrap();

        for pair in fetched.windows(2) {
            prop_assert!(pair[0].level <= pair[1].level);
            if pair[0].level == pair[1].level {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }

    /// Consecutive pages partition the ordered result.
    #[test]
    fn pages_partition_the_result(
        players in players_strategy(60),
        size in 1usize..12,
    ) {
        let spec = Spec::<Player>::all().order_by_descending("level").then_by("id");
        let everything = ids(&evaluate(MemorySource::new(&players), &spec).fetch().unwrap());

        let mut paged = Vec::new();
        let mut number = 1;
        loop {
            let page = evaluate_paginated(MemorySource::new(&players), &spec, number, size)
                .unwrap()
                .fetch()
                .unwrap();
            prop_assert!(page.len() <= size);
            if page.is_empty() {
                break;
            }
            paged.extend(ids(&page));
            number += 1;
        }

        prop_assert_eq!(paged, everything);
    }
}

// =============================================================================
// Deterministic checks
// =============================================================================

#[test]
fn fifteen_items_split_into_ten_and_five() {
    let players: Vec<Player> = (0..15)
        .map(|id| Player {
            id,
            segment: "VIP".to_string(),
            level: id as i64,
            banned: false,
            verified: None,
        })
        .collect();
    let spec = Spec::<Player>::all().order_by("id");

    let first = evaluate_paginated(MemorySource::new(&players), &spec, 1, 10)
        .unwrap()
        .fetch()
        .unwrap();
    let second = evaluate_paginated(MemorySource::new(&players), &spec, 2, 10)
        .unwrap()
        .fetch()
        .unwrap();

    assert_eq!(ids(&first), (0..10).collect::<Vec<_>>());
    assert_eq!(ids(&second), (10..15).collect::<Vec<_>>());
}
