//! In-memory player repository.
//!
//! Every read takes a specification and hands it to the evaluator over a
//! [`MemorySource`]; the repository itself knows nothing about segments,
//! levels or activity.

use specula::{MemorySource, QuerySource, Spec, Specification, SpecificationEvaluator};
use tracing::{debug, instrument};

use crate::config::DirectoryConfig;
use crate::error::{DirectoryError, Result};
use crate::player::Player;

#[derive(Debug, Clone, Default)]
pub struct PlayerRepository {
    players: Vec<Player>,
    config: DirectoryConfig,
}

impl PlayerRepository {
    pub fn new(config: DirectoryConfig) -> Self {
        PlayerRepository {
            players: Vec::new(),
            config,
        }
    }

    pub fn with_players(players: Vec<Player>, config: DirectoryConfig) -> Self {
        PlayerRepository { players, config }
    }

    pub fn config(&self) -> &DirectoryConfig {
        &self.config
    }

    pub fn insert(&mut self, player: Player) {
        self.players.push(player);
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// Looks a player up by id.
    pub fn get(&self, id: u64) -> Result<&Player> {
        let by_id = Spec::<Player>::build(|it| it.field(Player::ID).eq(id));
        self.first(&by_id)?.ok_or(DirectoryError::UnknownPlayer(id))
    }

    /// Every player the specification selects, in its order.
    #[instrument(level = "debug", skip_all)]
    pub fn find_all<S>(&self, spec: &S) -> Result<Vec<&Player>>
    where
        S: Specification<Player> + ?Sized,
    {
        let found = SpecificationEvaluator::apply(self.source(), spec).fetch()?;
        debug!(found = found.len(), "find_all");
        Ok(found)
    }

    /// One page of the players the specification selects.
    ///
    /// Missing values fall back to the first page and the configured default
    /// size; a size above the configured maximum is an error.
    #[instrument(level = "debug", skip(self, spec))]
    pub fn list<S>(&self, spec: &S, page: Option<usize>, size: Option<usize>) -> Result<Vec<&Player>>
    where
        S: Specification<Player> + ?Sized,
    {
        let window = self.config.pagination.resolve(page, size)?;
        let found = SpecificationEvaluator::apply_paginated(self.source(), spec, window).fetch()?;
        debug!(found = found.len(), "list");
        Ok(found)
    }

    pub fn first<S>(&self, spec: &S) -> Result<Option<&Player>>
    where
        S: Specification<Player> + ?Sized,
    {
        Ok(SpecificationEvaluator::apply(self.source(), spec).first()?)
    }

    pub fn count<S>(&self, spec: &S) -> Result<usize>
    where
        S: Specification<Player> + ?Sized,
    {
        Ok(SpecificationEvaluator::apply(self.source(), spec).count()?)
    }

    fn source(&self) -> MemorySource<'_, Player> {
        MemorySource::new(&self.players)
    }
}
