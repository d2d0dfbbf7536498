//! Derive macro for `hateoas-links` records.
//!
//! `#[derive(LinkRecord)]` reads the same `#[serde(...)]` attributes that shape
//! the wire format and expands to a `record_links!` invocation, so the field
//! table never drifts from the serialized keys.

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, LitStr};

/// Derives `Identified`, `Reflect` and `Record` for a struct with named fields.
///
/// Honors `#[serde(rename_all = "...")]` on the struct and `rename`, `skip`,
/// `skip_serializing` and `flatten` on fields. Fields whose types do not
/// implement `Reflect` are left out with `#[links(skip)]`.
#[proc_macro_derive(LinkRecord, attributes(links))]
pub fn derive_link_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

struct FieldEntry {
    ident: syn::Ident,
    annotation: String,
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let entries = field_entries(input)?;

    let rows = entries.iter().map(|entry| {
        let ident = &entry.ident;
        let annotation = &entry.annotation;
        quote! { #ident => #annotation }
    });

    Ok(quote! {
        ::hateoas_links::record_links!(#name { #(#rows),* });
    })
}

/// One table row per named field, in declaration order.
fn field_entries(input: &DeriveInput) -> syn::Result<Vec<FieldEntry>> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "LinkRecord does not support generic structs; use `record_links!` on each concrete type",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new(
                    name.span(),
                    "LinkRecord only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new(
                name.span(),
                "LinkRecord only supports structs",
            ))
        }
    };

    let rename_all = container_rename_rule(&input.attrs)?;

    let mut entries = Vec::new();
    for field in fields {
        let Some(ident) = field.ident.clone() else {
            continue;
        };
        if links_skip(&field.attrs)? {
            continue;
        }

        let serde = field_serde_attrs(&field.attrs)?;
        let annotation = if serde.skip {
            "-".to_string()
        } else if serde.flatten {
            String::new()
        } else if let Some(rename) = serde.rename {
            rename
        } else {
            let base = ident.unraw().to_string();
            match rename_all {
                Some(rule) => rule.apply(&base),
                None => base,
            }
        };

        entries.push(FieldEntry { ident, annotation });
    }

    Ok(entries)
}

// ---------------------------------------------------------------------------
// Attribute parsing
// ---------------------------------------------------------------------------

#[derive(Default)]
struct SerdeField {
    rename: Option<String>,
    skip: bool,
    flatten: bool,
}

fn field_serde_attrs(attrs: &[Attribute]) -> syn::Result<SerdeField> {
    let mut out = SerdeField::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if let Some(rename) = serialize_name(&meta)? {
                    out.rename = Some(rename);
                }
            } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                out.skip = true;
            } else if meta.path.is_ident("flatten") {
                out.flatten = true;
            } else {
                skip_meta(meta)?;
            }
            Ok(())
        })?;
    }
    Ok(out)
}

fn container_rename_rule(attrs: &[Attribute]) -> syn::Result<Option<RenameRule>> {
    let mut rule = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename_all") {
                if let Some(value) = serialize_name(&meta)? {
                    rule = Some(RenameRule::parse(&value).ok_or_else(|| {
                        meta.error(format!("unknown rename_all rule `{value}`"))
                    })?);
                }
            } else {
                skip_meta(meta)?;
            }
            Ok(())
        })?;
    }
    Ok(rule)
}

fn links_skip(attrs: &[Attribute]) -> syn::Result<bool> {
    let mut skip = false;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("links")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                return Ok(());
            }
            Err(meta.error("unknown links attribute. Supported: skip"))
        })?;
    }
    Ok(skip)
}

/// Value of `key = "..."` or the `serialize` half of `key(serialize = "...")`.
fn serialize_name(meta: &ParseNestedMeta) -> syn::Result<Option<String>> {
    if meta.input.peek(syn::Token![=]) {
        let lit: LitStr = meta.value()?.parse()?;
        return Ok(Some(lit.value()));
    }

    let mut name = None;
    meta.parse_nested_meta(|inner| {
        let lit: LitStr = inner.value()?.parse()?;
        if inner.path.is_ident("serialize") {
            name = Some(lit.value());
        }
        Ok(())
    })?;
    Ok(name)
}

/// Consume a serde option this macro does not interpret.
fn skip_meta(meta: ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(syn::Token![=]) {
        let _: syn::Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(skip_meta)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Case conversion
// ---------------------------------------------------------------------------

/// Serde's `rename_all` rules as they apply to snake_case field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    fn parse(value: &str) -> Option<Self> {
        let rule = match value {
            "lowercase" => Self::Lower,
            "UPPERCASE" => Self::Upper,
            "PascalCase" => Self::Pascal,
            "camelCase" => Self::Camel,
            "snake_case" => Self::Snake,
            "SCREAMING_SNAKE_CASE" => Self::ScreamingSnake,
            "kebab-case" => Self::Kebab,
            "SCREAMING-KEBAB-CASE" => Self::ScreamingKebab,
            _ => return None,
        };
        Some(rule)
    }

    fn apply(self, field: &str) -> String {
        match self {
            Self::Lower | Self::Snake => field.to_string(),
            Self::Upper | Self::ScreamingSnake => field.to_ascii_uppercase(),
            Self::Pascal => pascal(field),
            Self::Camel => {
                let pascal = pascal(field);
                let mut chars = pascal.chars();
                match chars.next() {
                    Some(first) => first.to_ascii_lowercase().to_string() + chars.as_str(),
                    None => pascal,
                }
            }
            Self::Kebab => field.replace('_', "-"),
            Self::ScreamingKebab => field.to_ascii_uppercase().replace('_', "-"),
        }
    }
}

fn pascal(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut capitalize = true;
    for ch in field.chars() {
        if ch == '_' {
            capitalize = true;
        } else if capitalize {
            out.push(ch.to_ascii_uppercase());
            capitalize = false;
        } else {
            out.push(ch);
        }
    }
    out
}
