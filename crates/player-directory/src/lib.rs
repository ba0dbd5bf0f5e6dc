//! A worked example of a player directory backed by specula.
//!
//! - [`Player`] derives `Entity`, so every field a specification reads is
//!   named by a constant (`Player::SEGMENT`, `Player::LAST_LOGIN`, ...)
//! - [`specs`] holds the named specifications application code builds
//! - [`PlayerRepository`] runs them through the evaluator
//! - [`DirectoryConfig`] carries the pagination limits, loaded from YAML
//!
//! ```
//! use player_directory::specs::{ActiveWithin, InSegment};
//! use player_directory::{DirectoryConfig, Player, PlayerRepository};
//! use specula::{Specification, Timestamp};
//!
//! let now = Timestamp::from_secs(1_700_000_000);
//! let repo = PlayerRepository::with_players(
//!     vec![
//!         Player::new(1, "ana@example.com", "VIP", now.minus_days(5)),
//!         Player::new(2, "bo@example.com", "VIP", now.minus_days(40)),
//!     ],
//!     DirectoryConfig::default(),
//! );
//!
//! let engaged = InSegment::new("VIP")?.and(ActiveWithin::as_of(30, now)?);
//! let found = repo.find_all(&engaged)?;
//! assert_eq!(found.len(), 1);
//! assert_eq!(found[0].id, 1);
//! # Ok::<(), player_directory::DirectoryError>(())
//! ```

mod config;
mod error;
mod player;
mod repository;
pub mod specs;

pub use config::DirectoryConfig;
pub use error::{DirectoryError, Result};
pub use player::{Achievement, Guild, Player, Status};
pub use repository::PlayerRepository;
