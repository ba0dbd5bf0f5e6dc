//! The player entity and its related records.

use specula::{EntityEnum, Literal, Timestamp};
use specula_macros::Entity;

/// Account standing. Discriminants are stored, so they never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Active,
    Suspended,
    Closed,
}

impl EntityEnum for Status {
    fn entity_discriminant(&self) -> u32 {
        match self {
            Status::Active => 1,
            Status::Suspended => 2,
            Status::Closed => 3,
        }
    }
}

impl From<Status> for Literal {
    fn from(status: Status) -> Self {
        Literal::enumeration(status.entity_discriminant())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guild {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub title: String,
}

#[derive(Debug, Clone, Entity)]
pub struct Player {
    #[entity(Number)]
    pub id: u64,

    #[entity(String)]
    pub email: String,

    #[entity(String)]
    pub segment: String,

    #[entity(Number)]
    pub level: u32,

    #[entity(Enum)]
    pub status: Status,

    #[entity(Timestamp, rename = "lastLogin")]
    pub last_login: Timestamp,

    #[entity(String, optional)]
    pub nickname: Option<String>,

    #[entity(relation)]
    pub guild: Option<Guild>,

    #[entity(relation)]
    pub achievements: Vec<Achievement>,

    #[entity(skip)]
    pub password_hash: String,
}

impl Player {
    /// A new active player with no nickname, guild or achievements.
    pub fn new(
        id: u64,
        email: impl Into<String>,
        segment: impl Into<String>,
        last_login: Timestamp,
    ) -> Self {
        Player {
            id,
            email: email.into(),
            segment: segment.into(),
            level: 1,
            status: Status::Active,
            last_login,
            nickname: None,
            guild: None,
            achievements: Vec::new(),
            password_hash: String::new(),
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn with_guild(mut self, name: impl Into<String>) -> Self {
        self.guild = Some(Guild { name: name.into() });
        self
    }
}
