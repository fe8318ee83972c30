//! Derive macro for the hashcode structural hash.

use proc_macro::TokenStream;
use syn::{parse_macro_input, Attribute, DeriveInput, Error, Expr, Lit, Visibility};

mod hashcode;

/// Derives `Hashcode` with the default record rule.
///
/// Structs hash as records: the type name is mixed into the seed, then every
/// `pub` field is folded in declaration order. Non-public fields and fields
/// marked `#[hashcode(skip)]` or `#[hashcode(ignore)]` do not contribute.
///
/// Enums hash as a record of the enum name, followed by the variant name and
/// then the variant's fields. Variant fields are always visible, so only the
/// exclusion markers remove them.
///
/// The generated impl hashes fields through the driving `StructuralHasher`,
/// so strict mode, the depth limit and cycle detection reach into them.
///
/// Attributes:
/// - `#[hashcode(rename = "Name")]` on the type: type name to mix in.
/// - `#[hashcode(skip)]`, `#[hashcode(ignore)]` on a field: exclude it.
/// - `#[hashcode(include)]` on a non-public field: hash it anyway.
#[proc_macro_derive(Hashcode, attributes(hashcode))]
pub fn derive_hashcode(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    hashcode::expand_derive(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Options from `#[hashcode(...)]` on a field.
#[derive(Debug, Default, Clone, Copy)]
struct FieldOptions {
    excluded: bool,
    include: bool,
}

impl FieldOptions {
    fn from_attrs(attrs: &[Attribute]) -> Result<Self, Error> {
        let mut options = Self::default();
        for attr in hashcode_attributes(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") || meta.path.is_ident("ignore") {
                    options.excluded = true;
                    Ok(())
                } else if meta.path.is_ident("include") {
                    options.include = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `skip`, `ignore` or `include`"))
                }
            })?;
        }
        Ok(options)
    }

    /// Whether the field contributes, given whether it is `pub`.
    fn contributes(&self, visible: bool) -> bool {
        !self.excluded && (visible || self.include)
    }
}

/// Options from `#[hashcode(...)]` on the type.
#[derive(Debug, Default, Clone)]
struct ContainerOptions {
    rename: Option<String>,
}

impl ContainerOptions {
    fn from_attrs(attrs: &[Attribute]) -> Result<Self, Error> {
        let mut options = Self::default();
        for attr in hashcode_attributes(attrs) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    let value: Expr = meta.value()?.parse()?;
                    options.rename = Some(parse_string_literal(&value)?);
                    Ok(())
                } else {
                    Err(meta.error("expected `rename = \"...\"`"))
                }
            })?;
        }
        Ok(options)
    }
}

fn hashcode_attributes(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("hashcode"))
}

fn is_public(vis: &Visibility) -> bool {
    matches!(vis, Visibility::Public(_))
}

fn parse_string_literal(expr: &Expr) -> Result<String, Error> {
    if let Expr::Lit(expr_lit) = expr {
        if let Lit::Str(lit_str) = &expr_lit.lit {
            return Ok(lit_str.value());
        }
    }
    Err(Error::new_spanned(expr, "expected a string literal"))
}
