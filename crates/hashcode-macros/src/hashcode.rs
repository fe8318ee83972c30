//! #[derive(Hashcode)] implementation

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{parse_quote, Data, DataEnum, DeriveInput, Error, Fields, Generics, Index, Type};

use crate::{is_public, ContainerOptions, FieldOptions};

pub fn expand_derive(input: DeriveInput) -> Result<TokenStream, Error> {
    let name = &input.ident;
    let container = ContainerOptions::from_attrs(&input.attrs)?;
    let type_name = container
        .rename
        .unwrap_or_else(|| name.unraw().to_string());

    let mut hashed_types = Vec::new();
    let body = match &input.data {
        Data::Struct(data) => struct_body(&type_name, &data.fields, &mut hashed_types)?,
        Data::Enum(data) => enum_body(&type_name, data, &mut hashed_types)?,
        Data::Union(_) => {
            return Err(Error::new_spanned(
                &input,
                "#[derive(Hashcode)] does not support unions",
            ))
        }
    };

    let generics = with_hashcode_bounds(input.generics.clone(), &hashed_types);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics ::hashcode::Hashcode for #name #ty_generics #where_clause {
            fn hashcode(&self) -> u64 {
                ::hashcode::__internal::traverse(self)
            }

            fn hashcode_in(
                &self,
                __hasher: &::hashcode::__internal::StructuralHasher,
                __ctx: &mut ::hashcode::__internal::HashContext,
            ) -> ::hashcode::__internal::Result<u64> {
                #body
            }
        }
    };

    Ok(expanded)
}

/// Bounds every hashed field type of a generic type, so that containers
/// with extra requirements (map keys need `KeyText`) resolve per field.
fn with_hashcode_bounds(mut generics: Generics, hashed_types: &[&Type]) -> Generics {
    if generics.type_params().next().is_none() {
        return generics;
    }
    let where_clause = generics.make_where_clause();
    for ty in hashed_types {
        where_clause
            .predicates
            .push(parse_quote!(#ty: ::hashcode::Hashcode));
    }
    generics
}

/// Folds the visible fields of a struct, in declaration order, each through
/// the driving hasher.
fn struct_body<'a>(
    type_name: &str,
    fields: &'a Fields,
    hashed_types: &mut Vec<&'a Type>,
) -> Result<TokenStream, Error> {
    let mut mixes = Vec::new();
    for (index, field) in fields.iter().enumerate() {
        let options = FieldOptions::from_attrs(&field.attrs)?;
        if !options.contributes(is_public(&field.vis)) {
            continue;
        }
        hashed_types.push(&field.ty);
        let access = match &field.ident {
            Some(ident) => quote! { self.#ident },
            None => {
                let index = Index::from(index);
                quote! { self.#index }
            }
        };
        mixes.push(quote! { .field_in(&#access, __hasher, __ctx)? });
    }

    Ok(quote! {
        __hasher.enter(::hashcode::__internal::ValueKind::Record, __ctx, |__ctx| {
            ::core::result::Result::Ok(
                ::hashcode::__internal::Combiner::record(#type_name)
                    #(#mixes)*
                    .finish()
            )
        })
    })
}

/// Mixes the variant name after the enum's record seed, then the variant's
/// non-excluded fields.
fn enum_body<'a>(
    type_name: &str,
    data: &'a DataEnum,
    hashed_types: &mut Vec<&'a Type>,
) -> Result<TokenStream, Error> {
    if data.variants.is_empty() {
        return Ok(quote! { match *self {} });
    }

    let mut arms = Vec::new();
    for variant in &data.variants {
        let variant_ident = &variant.ident;
        let variant_name = variant_ident.unraw().to_string();

        let mut bindings = Vec::new();
        let pattern = match &variant.fields {
            Fields::Named(named) => {
                let mut patterns = Vec::new();
                for field in &named.named {
                    let options = FieldOptions::from_attrs(&field.attrs)?;
                    if !options.contributes(true) {
                        continue;
                    }
                    let ident = field.ident.as_ref().ok_or_else(|| {
                        Error::new_spanned(field, "named field without an identifier")
                    })?;
                    hashed_types.push(&field.ty);
                    patterns.push(quote! { #ident });
                    bindings.push(quote! { #ident });
                }
                quote! { Self::#variant_ident { #(#patterns,)* .. } }
            }
            Fields::Unnamed(unnamed) => {
                let mut patterns = Vec::new();
                for (index, field) in unnamed.unnamed.iter().enumerate() {
                    let options = FieldOptions::from_attrs(&field.attrs)?;
                    if options.contributes(true) {
                        hashed_types.push(&field.ty);
                        let binding = format_ident!("__field{}", index);
                        patterns.push(quote! { #binding });
                        bindings.push(quote! { #binding });
                    } else {
                        patterns.push(quote! { _ });
                    }
                }
                quote! { Self::#variant_ident ( #(#patterns),* ) }
            }
            Fields::Unit => quote! { Self::#variant_ident },
        };

        arms.push(quote! {
            #pattern => ::core::result::Result::Ok(
                ::hashcode::__internal::Combiner::record(#type_name)
                    .field(#variant_name)
                    #(.field_in(#bindings, __hasher, __ctx)?)*
                    .finish()
            ),
        });
    }

    Ok(quote! {
        __hasher.enter(::hashcode::__internal::ValueKind::Record, __ctx, |__ctx| {
            match self {
                #(#arms)*
            }
        })
    })
}
