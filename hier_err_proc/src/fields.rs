/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use proc_macro2::TokenStream;
use quote::quote;
use syn::{spanned::Spanned, Error, Fields, Member, Variant};

use crate::errtype::{binding_ident, CauseField, CauseKind, CollectedCauses};

/// Collects annotated struct fields, borrowed through `self`.
pub fn struct_causes(fields: &Fields) -> Result<CollectedCauses, Error> {
    let mut causes = Vec::new();
    for (idx, field) in fields.iter().enumerate() {
        if let Some(kind) = CauseKind::of_field(field)? {
            let member = match &field.ident {
                Some(ident) => Member::Named(ident.clone()),
                None => Member::Unnamed(idx.into()),
            };
            causes.push(CauseField {
                kind,
                access: quote! { &self.#member },
                span: field.span(),
            });
        }
    }
    Ok(causes.into_iter().collect())
}

/// Collects annotated variant fields and the match pattern binding them.
pub fn variant_causes(variant: &Variant) -> Result<(TokenStream, CollectedCauses), Error> {
    let ident = &variant.ident;
    let mut causes = Vec::new();
    let mut bindings = Vec::new();

    for (idx, field) in variant.fields.iter().enumerate() {
        let kind = CauseKind::of_field(field)?;
        let binding = binding_ident(idx);

        match (kind, &field.ident) {
            (Some(_), Some(name)) => bindings.push(quote! { #name: #binding }),
            (Some(_), None) => bindings.push(quote! { #binding }),
            (None, Some(_)) => {}
            (None, None) => bindings.push(quote! { _ }),
        }

        if let Some(kind) = kind {
            causes.push(CauseField {
                kind,
                access: quote! { #binding },
                span: field.span(),
            });
        }
    }

    let pattern = match &variant.fields {
        Fields::Named(_) => quote! { Self::#ident { #(#bindings,)* .. } },
        Fields::Unnamed(_) => quote! { Self::#ident ( #(#bindings),* ) },
        Fields::Unit => quote! { Self::#ident },
    };

    Ok((pattern, causes.into_iter().collect()))
}
