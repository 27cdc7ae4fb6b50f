//! Derive macros for `extkit::DeepClone` and `extkit::Identity`.
//!
//! `#[derive(DeepClone)]` duplicates every field with `DeepClone`,
//! private fields included, since the generated impl lives next to the
//! type. A field marked `#[deep_clone(shallow)]` is copied with
//! `Clone::clone` instead, sharing whatever storage it refers to.
//!
//! `#[derive(Identity)]` marks a record or enum as a value kind: it never
//! shares storage, so it is never the same reference as anything.
//!
//! Unions are rejected: which field is live is not known to the macro.

#![warn(missing_docs)]

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{
    parse_macro_input, parse_quote, Data, DeriveInput, Field, Fields, GenericParam, Generics,
    Index,
};

/// Derive `extkit::DeepClone` for a struct or enum.
#[proc_macro_derive(DeepClone, attributes(deep_clone))]
pub fn derive_deep_clone(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_deep_clone(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// Derive `extkit::Identity` for a struct or enum.
#[proc_macro_derive(Identity)]
pub fn derive_identity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_identity(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_deep_clone(input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let body = match &input.data {
        Data::Struct(data) => {
            let fields = data
                .fields
                .iter()
                .enumerate()
                .map(|(i, field)| {
                    let access = match &field.ident {
                        Some(ident) => quote!(self.#ident),
                        None => {
                            let index = Index::from(i);
                            quote!(self.#index)
                        }
                    };
                    duplicate_field(field, quote!(&#access))
                })
                .collect::<syn::Result<Vec<_>>>()?;
            construct(quote!(Self), &data.fields, &fields)
        }
        Data::Enum(data) if data.variants.is_empty() => quote!(match *self {}),
        Data::Enum(data) => {
            let arms = data
                .variants
                .iter()
                .map(|variant| {
                    let ident = &variant.ident;
                    let bindings = bindings(&variant.fields);
                    let fields = variant
                        .fields
                        .iter()
                        .zip(&bindings)
                        .map(|(field, binding)| duplicate_field(field, quote!(#binding)))
                        .collect::<syn::Result<Vec<_>>>()?;
                    let pattern = construct(quote!(Self::#ident), &variant.fields, &bindings);
                    let value = construct(quote!(Self::#ident), &variant.fields, &fields);
                    Ok(quote!(#pattern => #value,))
                })
                .collect::<syn::Result<Vec<_>>>()?;
            quote! {
                match self {
                    #(#arms)*
                }
            }
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span,
                "DeepClone cannot be derived for unions",
            ))
        }
    };

    let generics = add_deep_clone_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::extkit::DeepClone for #name #ty_generics #where_clause {
            fn deep_clone(&self) -> Self {
                #body
            }
        }
    })
}

fn expand_identity(input: DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let kind = match &input.data {
        Data::Struct(_) => quote!(::extkit::Kind::Struct),
        Data::Enum(_) => quote!(::extkit::Kind::Union),
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span,
                "Identity cannot be derived for unions",
            ))
        }
    };
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::extkit::Identity for #name #ty_generics #where_clause {
            fn kind(&self) -> ::extkit::Kind {
                #kind
            }

            fn storage(&self) -> ::core::option::Option<*const ()> {
                ::core::option::Option::None
            }
        }
    })
}

/// Expression duplicating one field, given a reference to it.
fn duplicate_field(field: &Field, value: TokenStream2) -> syn::Result<TokenStream2> {
    if is_shallow(field)? {
        Ok(quote!(::core::clone::Clone::clone(#value)))
    } else {
        Ok(quote!(::extkit::DeepClone::deep_clone(#value)))
    }
}

fn is_shallow(field: &Field) -> syn::Result<bool> {
    let mut shallow = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("deep_clone") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("shallow") {
                shallow = true;
                Ok(())
            } else {
                Err(meta.error("expected `shallow`"))
            }
        })?;
    }
    Ok(shallow)
}

/// Names bound to each field when matching on an enum variant.
fn bindings(fields: &Fields) -> Vec<TokenStream2> {
    fields
        .iter()
        .enumerate()
        .map(|(i, field)| match &field.ident {
            Some(ident) => quote!(#ident),
            None => {
                let ident = format_ident!("__field{}", i);
                quote!(#ident)
            }
        })
        .collect()
}

/// `path { a: v0, .. }`, `path(v0, ..)` or `path`, depending on the field style.
fn construct(path: TokenStream2, fields: &Fields, values: &[TokenStream2]) -> TokenStream2 {
    match fields {
        Fields::Named(named) => {
            let names = named.named.iter().map(|f| &f.ident);
            quote!(#path { #(#names: #values),* })
        }
        Fields::Unnamed(_) => quote!(#path(#(#values),*)),
        Fields::Unit => path,
    }
}

fn add_deep_clone_bounds(mut generics: Generics) -> Generics {
    for param in &mut generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::extkit::DeepClone));
        }
    }
    generics
}
