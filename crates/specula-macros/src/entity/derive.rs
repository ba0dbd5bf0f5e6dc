//! Implementation of the `#[derive(Entity)]` macro.
//!
//! This macro generates an implementation of the `Entity` trait, field name
//! constants for building predicates, and typed relation constants for
//! includes.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::{parse_entity_attrs, FieldKind};

/// Main implementation of the Entity derive macro.
pub fn entity_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Entity can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Entity can only be derived for structs",
            ))
        }
    };

    let mut field_matches: Vec<TokenStream> = Vec::new();
    let mut constants: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_entity_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let exposed_name = attrs.rename.unwrap_or_else(|| field_name.to_string());
        let const_name = format_ident!("{}", to_screaming_snake_case(&exposed_name));

        if attrs.relation {
            constants.push(quote! {
                /// Typed include for this relation.
                pub const #const_name: ::specula::Relation<Self> =
                    ::specula::Relation::new(#exposed_name);
            });
            continue;
        }

        let kind = match attrs.kind {
            Some(kind) => kind,
            None => continue,
        };

        constants.push(quote! {
            /// Field name constant for building predicates.
            pub const #const_name: &'static str = #exposed_name;
        });

        let value_expr = if attrs.optional {
            let inner = value_of(kind, quote! { inner });
            quote! {
                match &self.#field_name {
                    ::core::option::Option::Some(inner) => #inner,
                    ::core::option::Option::None => ::specula::Value::None,
                }
            }
        } else {
            value_of(kind, quote! { &self.#field_name })
        };

        field_matches.push(quote! {
            #exposed_name => #value_expr,
        });
    }

    let expanded = quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#constants)*
        }

        impl #impl_generics ::specula::Entity for #struct_name #ty_generics #where_clause {
            fn field_value(&self, field: &str) -> ::specula::Value<'_> {
                match field {
                    #(#field_matches)*
                    _ => ::specula::Value::None,
                }
            }
        }
    };

    Ok(expanded)
}

/// Value expression for a field of the given kind, where `place` is a
/// reference to the field.
fn value_of(kind: FieldKind, place: TokenStream) -> TokenStream {
    match kind {
        FieldKind::String => quote! {
            ::specula::Value::from(::core::convert::AsRef::<str>::as_ref(#place))
        },
        FieldKind::Number => quote! {
            ::specula::Value::Number(::specula::Number::from(*#place))
        },
        FieldKind::Timestamp => quote! {
            ::specula::Value::Timestamp(::specula::EntityTimestamp::entity_timestamp(#place))
        },
        FieldKind::Enum => quote! {
            ::specula::Value::Enum(::specula::EntityEnum::entity_discriminant(#place))
        },
        FieldKind::Bool => quote! {
            ::specula::Value::Bool(*#place)
        },
    }
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' || c == '.' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}
