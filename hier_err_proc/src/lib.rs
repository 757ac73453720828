/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Derive macros for `hier_err`.

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DataEnum, DataStruct, DeriveInput, Error, Ident};

mod errtype;
mod fields;
use fields::*;

/// Implements `AsErrNode` so a foreign error joins a `hier_err` tree.
///
/// The type must implement [`Error`](`core::error::Error`). Its
/// [`Display`](`core::fmt::Display`) output becomes the node message, and
/// annotated fields become its causes in declaration order.
///
/// # Field Annotations
///
/// #### Single Item
/// * `node_cause`: Mark a field as an `AsErrNode` implementor.
/// * `dyn_cause`: Mark a field as a generic [`Error`](`core::error::Error`).
///
/// #### Collection
/// `*_causes` works on any type with a `.iter()` method returning references
/// to its items.
///
/// * `node_causes`: Mark a field as a collection of `AsErrNode` implementors.
/// * `dyn_causes`: Mark a field as a collection of generic
///   [`Error`](`core::error::Error`)s.
///
/// Enum variants annotate their own fields the same way. Unions are rejected.
///
/// #### Example
/// ```
/// # use std::{error::Error, fmt::{self, Display, Formatter}};
/// use hier_err::{render_linear, AsErrNode, HierErr};
///
/// #[derive(Debug, AsErrNode)]
/// struct SyncFailed {
///     #[dyn_cause]
///     io: std::io::Error,
///     #[node_causes]
///     retries: Vec<HierErr>,
/// }
///
/// impl Error for SyncFailed {}
/// impl Display for SyncFailed {
///     fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
///         write!(f, "sync failed")
///     }
/// }
///
/// let err = SyncFailed {
///     io: std::io::Error::other("broken pipe"),
///     retries: vec![HierErr::with_cause("retry 1", "refused")],
/// };
///
/// assert_eq!(
///     render_linear(&err),
///     "sync failed: broken pipe; retry 1: refused"
/// );
/// ```
#[proc_macro_derive(AsErrNode, attributes(node_cause, dyn_cause, node_causes, dyn_causes))]
pub fn derive_as_err_node(input: TokenStream) -> TokenStream {
    let DeriveInput {
        ident,
        generics,
        data,
        ..
    } = parse_macro_input!(input as DeriveInput);

    let body = match &data {
        Data::Struct(data) => struct_body(data),
        Data::Enum(data) => enum_body(data),
        Data::Union(_) => Err(Error::new(
            ident.span(),
            "AsErrNode cannot be derived for union types",
        )),
    };

    match body {
        Ok(body) => gen_impl(&ident, &generics, body),
        Err(e) => e.into_compile_error().into(),
    }
}

fn struct_body(data: &DataStruct) -> Result<proc_macro2::TokenStream, Error> {
    Ok(struct_causes(&data.fields)?.gen_node())
}

fn enum_body(data: &DataEnum) -> Result<proc_macro2::TokenStream, Error> {
    if data.variants.is_empty() {
        return Ok(quote! { match *self {} });
    }

    let arms = data
        .variants
        .iter()
        .map(|variant| {
            let (pattern, causes) = variant_causes(variant)?;
            let node = causes.gen_node();
            Ok(quote! {
                #pattern => { #node }
            })
        })
        .collect::<Result<Vec<_>, Error>>()?;

    Ok(quote! {
        match self {
            #(#arms)*
        }
    })
}

fn gen_impl(
    ident: &Ident,
    generics: &syn::Generics,
    body: proc_macro2::TokenStream,
) -> TokenStream {
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    quote! {
        #[automatically_derived]
        impl #impl_generics hier_err::AsErrNode for #ident #ty_generics #where_clause {
            fn as_err_node(&self, func: &mut dyn FnMut(hier_err::ErrNode<'_>)) {
                #body
            }
        }
    }
    .into()
}
