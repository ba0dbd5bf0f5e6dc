//! Named specifications over [`Player`].
//!
//! Each wraps one of the generic criteria from `specula::criteria` and
//! checks its own arguments, so a bad value is reported under the name a
//! caller actually passed.

use specula::criteria::{self, AtLeast, FieldEquals, FieldEqualsIgnoreCase};
use specula::{Include, Predicate, Result, SortOrder, Spec, SpecError, Specification, Timestamp};

use crate::player::{Player, Status};

fn required(name: &'static str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SpecError::InvalidArgument {
            name,
            reason: "must not be blank".to_string(),
        });
    }
    Ok(())
}

/// Players in a marketing segment, matched exactly.
#[derive(Debug, Clone)]
pub struct InSegment(FieldEquals<Player>);

impl InSegment {
    pub fn new(segment: &str) -> Result<Self> {
        required("segment", segment)?;
        Ok(InSegment(FieldEquals::new(Player::SEGMENT, segment)?))
    }
}

impl Specification<Player> for InSegment {
    fn to_predicate(&self) -> Predicate {
        self.0.to_predicate()
    }
}

/// Players who logged in within the last `days` days.
#[derive(Debug, Clone)]
pub struct ActiveWithin(criteria::ActiveWithin<Player>);

impl ActiveWithin {
    pub fn new(days: i64) -> Result<Self> {
        Self::as_of(days, Timestamp::now())
    }

    /// Like [`ActiveWithin::new`] with an explicit clock.
    pub fn as_of(days: i64, now: Timestamp) -> Result<Self> {
        Ok(ActiveWithin(criteria::ActiveWithin::as_of(
            Player::LAST_LOGIN,
            days,
            now,
        )?))
    }

    pub fn cutoff(&self) -> Timestamp {
        self.0.cutoff()
    }
}

impl Specification<Player> for ActiveWithin {
    fn to_predicate(&self) -> Predicate {
        self.0.to_predicate()
    }
}

/// Players at or above a level.
#[derive(Debug, Clone)]
pub struct MinimumLevel(AtLeast<Player>);

impl MinimumLevel {
    pub fn new(level: u32) -> Result<Self> {
        Ok(MinimumLevel(AtLeast::new(Player::LEVEL, level)?))
    }
}

impl Specification<Player> for MinimumLevel {
    fn to_predicate(&self) -> Predicate {
        self.0.to_predicate()
    }
}

/// The player with an email address, ignoring case.
#[derive(Debug, Clone)]
pub struct EmailIs(FieldEqualsIgnoreCase<Player>);

impl EmailIs {
    pub fn new(email: &str) -> Result<Self> {
        required("email", email)?;
        Ok(EmailIs(FieldEqualsIgnoreCase::new(Player::EMAIL, email.trim())?))
    }
}

impl Specification<Player> for EmailIs {
    fn to_predicate(&self) -> Predicate {
        self.0.to_predicate()
    }
}

/// Active-status players in a segment, highest level first with their
/// guild loaded.
///
/// Unlike the filters above, this carries includes and ordering, so it is
/// meant to be evaluated directly rather than composed.
#[derive(Debug, Clone)]
pub struct Leaderboard(Spec<Player>);

impl Leaderboard {
    pub fn new(segment: &str) -> Result<Self> {
        let segment = InSegment::new(segment)?;
        let active = Spec::<Player>::build(|it| it.field(Player::STATUS).eq(Status::Active));
        let listing = Spec::from_specification(&segment.and(active))
            .include(Player::GUILD)
            .order_by_descending(Player::LEVEL)
            .then_by(Player::ID);
        Ok(Leaderboard(listing))
    }
}

impl Specification<Player> for Leaderboard {
    fn to_predicate(&self) -> Predicate {
        self.0.to_predicate()
    }

    fn includes(&self) -> &[Include] {
        self.0.includes()
    }

    fn ordering(&self) -> &SortOrder {
        self.0.ordering()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> Timestamp {
        Timestamp::from_secs(1_700_000_000)
    }

    #[test]
    fn blank_arguments_are_rejected() {
        let err = InSegment::new("  ").unwrap_err();
        assert!(matches!(err, SpecError::InvalidArgument { name: "segment", .. }));

        let err = EmailIs::new("").unwrap_err();
        assert!(matches!(err, SpecError::InvalidArgument { name: "email", .. }));

        assert!(ActiveWithin::as_of(-1, now()).is_err());
    }

    #[test]
    fn email_ignores_case() {
        let spec = EmailIs::new("Ana@Example.com").unwrap();
        let player = Player::new(1, "ana@example.COM", "VIP", now());
        assert!(spec.is_satisfied_by(&player));
    }

    #[test]
    fn minimum_level_is_inclusive() {
        let spec = MinimumLevel::new(10).unwrap();
        let at = Player::new(1, "a@x.io", "VIP", now()).with_level(10);
        let below = Player::new(2, "b@x.io", "VIP", now()).with_level(9);
        assert!(spec.is_satisfied_by(&at));
        assert!(!spec.is_satisfied_by(&below));
    }

    #[test]
    fn active_within_uses_its_clock() {
        let spec = ActiveWithin::as_of(30, now()).unwrap();
        assert_eq!(spec.cutoff(), now().minus_days(30));

        let recent = Player::new(1, "a@x.io", "VIP", now().minus_days(29));
        let stale = Player::new(2, "b@x.io", "VIP", now().minus_days(31));
        assert!(spec.is_satisfied_by(&recent));
        assert!(!spec.is_satisfied_by(&stale));
    }

    #[test]
    fn leaderboard_carries_includes_and_ordering() {
        let board = Leaderboard::new("VIP").unwrap();
        assert_eq!(board.includes(), &[Include::from(Player::GUILD)]);
        assert!(board.ordering().primary().is_some());
        assert!(board.ordering().secondary().is_some());

        let suspended =
            Player::new(1, "a@x.io", "VIP", now()).with_status(Status::Suspended);
        let active = Player::new(2, "b@x.io", "VIP", now());
        assert!(!board.is_satisfied_by(&suspended));
        assert!(board.is_satisfied_by(&active));
    }
}
