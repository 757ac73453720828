/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote, quote_spanned};
use syn::{spanned::Spanned, Attribute, Error, Field, Ident};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CauseKind {
    /// Field implements `AsErrNode`.
    Node,
    /// Field is a plain `Error`.
    Dyn,
    /// Collection of `AsErrNode` implementors.
    NodeIter,
    /// Collection of plain `Error`s.
    DynIter,
}

impl CauseKind {
    fn from_attr(attr: &Attribute) -> Option<Self> {
        let ident = attr.path().get_ident()?;
        match ident.to_string().as_str() {
            "node_cause" => Some(Self::Node),
            "dyn_cause" => Some(Self::Dyn),
            "node_causes" => Some(Self::NodeIter),
            "dyn_causes" => Some(Self::DynIter),
            _ => None,
        }
    }

    /// Finds the single cause annotation on `field`, if any.
    pub fn of_field(field: &Field) -> Result<Option<Self>, Error> {
        let mut found = None;
        for attr in &field.attrs {
            if let Some(kind) = Self::from_attr(attr) {
                attr.meta.require_path_only()?;
                if found.is_some() {
                    return Err(Error::new(
                        attr.path().span(),
                        "a field can only carry one of node_cause, dyn_cause, node_causes, dyn_causes",
                    ));
                }
                found = Some(kind);
            }
        }
        Ok(found)
    }
}

/// An annotated field and the expression that borrows it.
pub struct CauseField {
    pub kind: CauseKind,
    /// Evaluates to a reference to the field.
    pub access: TokenStream,
    pub span: Span,
}

/// Annotated fields of one struct or enum variant, in declaration order.
pub struct CollectedCauses {
    fields: Vec<CauseField>,
}

impl FromIterator<CauseField> for CollectedCauses {
    fn from_iter<T: IntoIterator<Item = CauseField>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl CollectedCauses {
    /// Builds the causes slice and hands the node view to `func`.
    pub fn gen_node(&self) -> TokenStream {
        let storage = self.fields.iter().enumerate().map(|(idx, field)| {
            let store = format_ident!("__dyn_{idx}");
            let CauseField { access, span, .. } = field;

            match field.kind {
                CauseKind::Dyn => quote_spanned! {
                    *span=> let #store: &(dyn core::error::Error + 'static) = #access;
                },
                CauseKind::DynIter => quote_spanned! {
                    *span=> let #store = (#access).iter().map(|z|
                        z as &(dyn core::error::Error + 'static)
                    ).collect::<hier_err::__private::Vec<_>>();
                },
                CauseKind::Node | CauseKind::NodeIter => quote! {},
            }
        });

        let pushes = self.fields.iter().enumerate().map(|(idx, field)| {
            let store = format_ident!("__dyn_{idx}");
            let CauseField { access, span, .. } = field;

            match field.kind {
                CauseKind::Node => quote_spanned! {
                    *span=> causes.push(#access as &dyn hier_err::AsErrNode);
                },
                CauseKind::Dyn => quote_spanned! {
                    *span=> causes.push(&#store as &dyn hier_err::AsErrNode);
                },
                CauseKind::NodeIter => quote_spanned! {
                    *span=> causes.extend((#access).iter().map(|z|
                        z as &dyn hier_err::AsErrNode
                    ));
                },
                CauseKind::DynIter => quote_spanned! {
                    *span=> causes.extend(#store.iter().map(|z|
                        z as &dyn hier_err::AsErrNode
                    ));
                },
            }
        });

        quote! {
            #(#storage)*
            #[allow(unused_mut)]
            let mut causes = hier_err::__private::Vec::<&dyn hier_err::AsErrNode>::new();
            #(#pushes)*
            (func)(hier_err::ErrNode::new(self, causes.as_slice()))
        }
    }
}

/// Binding name for an annotated enum variant field.
pub fn binding_ident(idx: usize) -> Ident {
    format_ident!("__field_{idx}")
}
