//! Integration tests for the Entity derive macro.
//!
//! These tests verify that `#[derive(Entity)]` generates a working field
//! accessor, field-name constants and relation constants.

#![allow(dead_code)] // Some fields are intentionally not exposed

use specula::{
    Entity, EntityEnum, EntityTimestamp, Include, MemorySource, Number, QuerySource, Spec,
    Specification, Timestamp, Value,
};
use specula_macros::Entity as DeriveEntity;

// =============================================================================
// Basic derive tests
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Active,
    Suspended,
}

impl EntityEnum for Status {
    fn entity_discriminant(&self) -> u32 {
        match self {
            Status::Active => 1,
            Status::Suspended => 2,
        }
    }
}

struct Seen(i64);

impl EntityTimestamp for Seen {
    fn entity_timestamp(&self) -> Timestamp {
        Timestamp::from_secs(self.0)
    }
}

struct Guild;

#[derive(DeriveEntity)]
struct Account {
    #[entity(String)]
    email: String,

    #[entity(Number)]
    level: u32,

    #[entity(Bool)]
    verified: bool,

    #[entity(Enum)]
    status: Status,

    #[entity(Timestamp, rename = "lastLogin")]
    seen: Seen,

    #[entity(String, optional)]
    nickname: Option<String>,

    #[entity(relation)]
    guild: Option<Guild>,

    #[entity(skip)]
    password_hash: String,

    untagged: u8,
}

fn account(email: &str, level: u32, nickname: Option<&str>) -> Account {
    Account {
        email: email.to_string(),
        level,
        verified: true,
        status: Status::Active,
        seen: Seen(1_700_000_000),
        nickname: nickname.map(String::from),
        guild: None,
        password_hash: "x".to_string(),
        untagged: 0,
    }
}

#[test]
fn test_field_values() {
    let a = account("ana@example.com", 7, Some("ana"));

    assert_eq!(a.field_value("email"), Value::from("ana@example.com"));
    assert_eq!(a.field_value("level"), Value::Number(Number::U64(7)));
    assert_eq!(a.field_value("verified"), Value::Bool(true));
    assert_eq!(a.field_value("status"), Value::Enum(1));
    assert_eq!(
        a.field_value("lastLogin"),
        Value::Timestamp(Timestamp::from_secs(1_700_000_000))
    );
    assert_eq!(a.field_value("nickname"), Value::from("ana"));
}

#[test]
fn test_unexposed_fields_read_as_none() {
    let a = account("bo@example.com", 1, None);

    assert_eq!(a.field_value("nickname"), Value::None);
    assert_eq!(a.field_value("seen"), Value::None);
    assert_eq!(a.field_value("password_hash"), Value::None);
    assert_eq!(a.field_value("untagged"), Value::None);
    assert_eq!(a.field_value("guild"), Value::None);
}

#[test]
fn test_constants_generated() {
    assert_eq!(Account::EMAIL, "email");
    assert_eq!(Account::LEVEL, "level");
    assert_eq!(Account::LAST_LOGIN, "lastLogin");
    assert_eq!(Account::NICKNAME, "nickname");
    assert_eq!(Account::GUILD.name(), "guild");
    assert_eq!(Account::GUILD.path().entity(), "Account");
}

#[test]
fn test_derived_entity_in_specifications() {
    let accounts = vec![
        account("ana@example.com", 12, Some("ana")),
        account("bo@example.com", 3, None),
        account("cy@example.com", 30, None),
    ];

    let spec = Spec::<Account>::build(|it| {
        it.field(Account::LEVEL).gte(10u32) & it.field(Account::NICKNAME).is_none()
    })
    .include(Account::GUILD)
    .order_by_descending(Account::LEVEL);

    assert!(!spec.is_satisfied_by(&accounts[0]));
    assert!(spec.is_satisfied_by(&accounts[2]));
    assert_eq!(spec.includes(), &[Include::from(Account::GUILD)]);

    let fetched = specula::evaluate(MemorySource::new(&accounts), &spec)
        .fetch()
        .unwrap();
    let emails: Vec<_> = fetched.iter().map(|a| a.email.as_str()).collect();
    assert_eq!(emails, ["cy@example.com"]);
}
