//! Proc macros for Specula.
//!
//! # Derive Macros
//!
//! - [`Entity`] - Generate the `specula::Entity` field accessor, field-name
//!   constants and typed relation constants
//!
//! # Examples
//!
//! For working examples, see:
//! - `specula/tests/entity_derive.rs` - every attribute in use
//! - `player-directory/src/player.rs` - a derived domain entity

mod entity;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `specula::Entity` for a struct with named fields.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `String` | String field, anything `AsRef<str>` |
/// | `Number` | Numeric field, any type `specula::Number` converts from |
/// | `Timestamp` | Timestamp field - requires `EntityTimestamp` impl |
/// | `Enum` | Enum field - requires `EntityEnum` impl |
/// | `Bool` | Boolean field |
/// | `optional` | Combined with a type: the field is an `Option` of it |
/// | `relation` | Navigation property, exposed as a typed include |
/// | `skip` | Exclude this field |
/// | `rename = "..."` | Use a custom name in predicates and includes |
///
/// Fields without an `#[entity(...)]` attribute are not exposed.
///
/// # Generated Code
///
/// 1. Field name constants (e.g., `Player::SEGMENT`, `Player::LAST_LOGIN`)
/// 2. Relation constants (e.g., `Player::GUILD: Relation<Player>`)
/// 3. Implementation of `Entity::field_value()`
///
/// # Example
///
/// ```ignore
/// use specula::{Include, Spec};
/// use specula_macros::Entity;
///
/// #[derive(Entity)]
/// struct Player {
///     #[entity(String)]
///     segment: String,
///
///     #[entity(Number)]
///     level: u32,
///
///     #[entity(String, optional)]
///     nickname: Option<String>,
///
///     #[entity(relation)]
///     guild: Option<Guild>,
///
///     #[entity(skip)]
///     password_hash: String,
/// }
///
/// let spec = Spec::<Player>::build(|it| it.field(Player::SEGMENT).eq("VIP"))
///     .include(Player::GUILD)
///     .order_by(Player::LEVEL);
/// ```
///
/// # Enum Fields
///
/// ```ignore
/// use specula::EntityEnum;
///
/// #[derive(Clone, Copy)]
/// enum Status { Active, Banned }
///
/// impl EntityEnum for Status {
///     fn entity_discriminant(&self) -> u32 {
///         match self {
///             Status::Active => 0,
///             Status::Banned => 1,
///         }
///     }
/// }
///
/// #[derive(Entity)]
/// struct Player {
///     #[entity(Enum)]
///     status: Status,
/// }
/// ```
#[proc_macro_derive(Entity, attributes(entity))]
pub fn entity_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    entity::entity_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
