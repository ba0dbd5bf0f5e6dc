//! Attribute parsing for the Entity derive macro.
//!
//! This module provides parsers for the `#[entity(...)]` field attributes
//! used by the `Entity` derive macro.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Ident, Lit, Meta, Result, Token,
};

/// How a field is exposed to predicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// String field: `#[entity(String)]`
    String,
    /// Number field: `#[entity(Number)]`
    Number,
    /// Timestamp field: `#[entity(Timestamp)]`
    Timestamp,
    /// Enum field: `#[entity(Enum)]`
    Enum,
    /// Boolean field: `#[entity(Bool)]`
    Bool,
}

impl FieldKind {
    /// Parse a field kind from an identifier.
    pub fn from_ident(ident: &Ident) -> Result<Self> {
        Self::from_str(&ident.to_string(), ident.span())
    }

    /// Parse a field kind from its name.
    pub fn from_str(s: &str, span: Span) -> Result<Self> {
        match s {
            "String" | "string" => Ok(FieldKind::String),
            "Number" | "number" => Ok(FieldKind::Number),
            "Timestamp" | "timestamp" => Ok(FieldKind::Timestamp),
            "Enum" | "enum" | "enumeration" => Ok(FieldKind::Enum),
            "Bool" | "bool" | "boolean" => Ok(FieldKind::Bool),
            other => Err(Error::new(
                span,
                format!(
                    "unknown entity field type: '{}'. Expected one of: String, Number, Timestamp, Enum, Bool",
                    other
                ),
            )),
        }
    }
}

/// Field-level attributes from `#[entity(...)]`.
#[derive(Debug, Clone)]
pub struct EntityAttr {
    /// How the field reads as a value.
    pub kind: Option<FieldKind>,
    /// The field is an `Option` of its kind; `None` reads as absent.
    pub optional: bool,
    /// The field is a navigation property, exposed as a typed include.
    pub relation: bool,
    /// Exclude the field.
    pub skip: bool,
    /// Custom name for predicates and includes (default: field name).
    pub rename: Option<String>,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for EntityAttr {
    fn default() -> Self {
        EntityAttr {
            kind: None,
            optional: false,
            relation: false,
            skip: false,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl Parse for EntityAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = EntityAttr::default();

        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                // entity(String), entity(skip), entity(relation), ...
                Meta::Path(p) => {
                    if p.is_ident("skip") {
                        attr.skip = true;
                    } else if p.is_ident("relation") {
                        attr.relation = true;
                        attr.span = p.span();
                    } else if p.is_ident("optional") {
                        attr.optional = true;
                    } else if let Some(ident) = p.get_ident() {
                        attr.kind = Some(FieldKind::from_ident(ident)?);
                        attr.span = ident.span();
                    } else {
                        return Err(Error::new(
                            p.span(),
                            "expected field type: String, Number, Timestamp, Enum, Bool, relation, optional, or skip",
                        ));
                    }
                }

                // rename = "custom_name" or ty = "enum"
                Meta::NameValue(nv) => {
                    let syn::Expr::Lit(syn::ExprLit {
                        lit: Lit::Str(s), ..
                    }) = &nv.value
                    else {
                        return Err(Error::new(
                            nv.value.span(),
                            "expected a string literal",
                        ));
                    };
                    if nv.path.is_ident("rename") {
                        attr.rename = Some(s.value());
                    } else if nv.path.is_ident("ty") {
                        attr.kind = Some(FieldKind::from_str(&s.value(), s.span())?);
                        attr.span = s.span();
                    } else {
                        return Err(Error::new(
                            nv.path.span(),
                            "unknown attribute. Expected: rename or ty",
                        ));
                    }
                }

                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown entity attribute. Expected: String, Number, Timestamp, Enum, Bool, relation, optional, skip, rename = \"...\", or ty = \"...\"",
                    ));
                }
            }
        }

        if attr.relation && attr.kind.is_some() {
            return Err(Error::new(
                attr.span,
                "a relation cannot also be a value field",
            ));
        }
        if attr.optional && attr.kind.is_none() {
            return Err(Error::new(
                attr.span,
                "optional needs a field type, e.g. #[entity(String, optional)]",
            ));
        }

        Ok(attr)
    }
}

/// Extract `#[entity(...)]` attributes from a field's attributes.
pub fn parse_entity_attrs(attrs: &[Attribute]) -> Result<EntityAttr> {
    for attr in attrs {
        if attr.path().is_ident("entity") {
            return attr.parse_args::<EntityAttr>();
        }
    }
    Ok(EntityAttr::default())
}
