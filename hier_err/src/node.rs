/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use alloc::{
    boxed::Box,
    string::{String, ToString},
    vec::Vec,
};
use core::{
    error::Error,
    fmt::{self, Display, Formatter},
};

use crate::{fmt_hierarchical, fmt_linear, AsErrNode, ErrNode, NodePkg};

/// An error with a fixed message and an ordered list of causes.
///
/// The message is set once at construction. Causes can only be appended and
/// keep their insertion order.
///
/// [`Display`] renders the whole tree hierarchically; the alternate flag
/// (`{:#}`) renders it linearly.
///
/// ```
/// use hier_err::{HierErr, render_linear};
///
/// let mut err = HierErr::with_cause("1", "2");
/// err.push(["3", "4"]);
///
/// assert_eq!(render_linear(&err), "1: 2; 3; 4");
/// assert_eq!(format!("{err:#}"), "1: 2; 3; 4");
/// ```
#[derive(Debug)]
pub struct HierErr {
    message: String,
    causes: Vec<Cause>,
    pkg: NodePkg,
}

impl HierErr {
    /// Creates a leaf node.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            causes: Vec::new(),
            pkg: NodePkg::new(),
        }
    }

    /// Creates a node with one initial cause.
    #[track_caller]
    pub fn with_cause(message: impl Into<String>, cause: impl Into<Cause>) -> Self {
        let mut this = Self::new(message);
        this.causes.push(cause.into());
        this
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Causes in insertion order.
    pub fn causes(&self) -> &[Cause] {
        &self.causes
    }

    /// Construction metadata.
    pub fn pkg(&self) -> &NodePkg {
        &self.pkg
    }

    /// Appends `causes` after any existing ones, in iteration order.
    pub fn push<I>(&mut self, causes: I)
    where
        I: IntoIterator,
        I::Item: Into<Cause>,
    {
        self.causes.extend(causes.into_iter().map(Into::into));
    }

    /// Appends a single cause.
    pub fn push_cause(&mut self, cause: impl Into<Cause>) {
        self.causes.push(cause.into());
    }

    /// Builder form of [`Self::push`].
    pub fn append<I>(mut self, causes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Cause>,
    {
        self.push(causes);
        self
    }

    pub fn linear(&self) -> String {
        crate::render_linear(self)
    }

    pub fn hierarchical(&self) -> String {
        crate::render_hierarchical(self)
    }

    pub fn serialize(&self, mode: crate::Mode) -> String {
        crate::serialize(self, mode)
    }
}

impl From<&str> for HierErr {
    #[track_caller]
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for HierErr {
    #[track_caller]
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl Display for HierErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            fmt_linear(self, f)
        } else {
            fmt_hierarchical(self, f)
        }
    }
}

impl Error for HierErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.causes.first().map(|c| c as &(dyn Error + 'static))
    }
}

impl AsErrNode for HierErr {
    fn as_err_node(&self, func: &mut dyn FnMut(ErrNode<'_>)) {
        let causes: Vec<&dyn AsErrNode> = self
            .causes
            .iter()
            .map(|c| c as &dyn AsErrNode)
            .collect();
        (func)(ErrNode::with_pkg(&self.message, &causes, &self.pkg))
    }
}

/// One entry in a [`HierErr`]'s causes.
///
/// Only [`Self::Node`] and [`Self::Foreign`] carry their own causes
/// directly. An [`Self::Opaque`] error is expanded through
/// [`Error::source`], or fully when it is a boxed [`HierErr`].
#[derive(Debug)]
pub enum Cause {
    Text(String),
    Opaque(Box<dyn Error + Send + Sync>),
    Node(HierErr),
    Foreign(Box<dyn AsErrNode + Send + Sync>),
}

impl Cause {
    /// Stores any error as an opaque leaf.
    pub fn error<E: Error + Send + Sync + 'static>(err: E) -> Self {
        Self::Opaque(Box::new(err))
    }

    /// Stores a type that exposes its own causes.
    pub fn foreign<E: AsErrNode + Send + Sync + 'static>(err: E) -> Self {
        Self::Foreign(Box::new(err))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&HierErr> {
        match self {
            Self::Node(node) => Some(node),
            Self::Opaque(err) => err.downcast_ref(),
            _ => None,
        }
    }
}

impl From<&str> for Cause {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Cause {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<HierErr> for Cause {
    fn from(node: HierErr) -> Self {
        Self::Node(node)
    }
}

impl From<Box<dyn Error + Send + Sync>> for Cause {
    fn from(err: Box<dyn Error + Send + Sync>) -> Self {
        Self::Opaque(err)
    }
}

/// Recovers a [`HierErr`] or [`Cause`] stored directly in the report.
///
/// Context layers stay opaque; their sources are still unwrapped when
/// rendering.
#[cfg(feature = "anyhow")]
impl From<anyhow::Error> for Cause {
    fn from(err: anyhow::Error) -> Self {
        let outer: &(dyn Error + 'static) = &*err;
        if outer.is::<HierErr>() {
            err.downcast().map_or_else(|err| Self::Opaque(err.into()), Self::Node)
        } else if outer.is::<Cause>() {
            err.downcast().unwrap_or_else(|err| Self::Opaque(err.into()))
        } else {
            Self::Opaque(err.into())
        }
    }
}

/// Recovers a [`HierErr`] or [`Cause`] stored directly in the report.
#[cfg(feature = "eyre")]
impl From<eyre::Report> for Cause {
    fn from(err: eyre::Report) -> Self {
        let outer: &(dyn Error + 'static) = &*err;
        if outer.is::<HierErr>() {
            err.downcast().map_or_else(|err| Self::Opaque(err.into()), Self::Node)
        } else if outer.is::<Cause>() {
            err.downcast().unwrap_or_else(|err| Self::Opaque(err.into()))
        } else {
            Self::Opaque(err.into())
        }
    }
}

impl Display for Cause {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Opaque(err) => Display::fmt(err, f),
            Self::Node(node) => Display::fmt(node, f),
            Self::Foreign(node) => Display::fmt(node, f),
        }
    }
}

impl Error for Cause {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Text(_) => None,
            Self::Opaque(err) => err.source(),
            Self::Node(node) => node.source(),
            Self::Foreign(node) => node.source(),
        }
    }
}

impl AsErrNode for Cause {
    fn as_err_node(&self, func: &mut dyn FnMut(ErrNode<'_>)) {
        match self {
            Self::Text(text) => (func)(ErrNode::new(text, &[])),
            Self::Opaque(err) => (&**err as &(dyn Error + 'static)).as_err_node(func),
            Self::Node(node) => node.as_err_node(func),
            Self::Foreign(node) => node.as_err_node(func),
        }
    }
}

/// Attaches `causes` to `seed`, promoting it to a node when needed.
///
/// A seed that already is a node keeps its message and gains the causes.
/// Foreign and opaque seeds are copied into a [`HierErr`] through their
/// [`AsErrNode`] view, keeping every nested cause. Any other seed becomes the
/// message of a new node.
///
/// ```
/// use hier_err::{compose, render_linear};
///
/// let promoted = compose("timeout", ["retry 1", "retry 2"]);
/// assert_eq!(render_linear(&promoted), "timeout: retry 1; retry 2");
///
/// let extended = compose(promoted, ["retry 3"]);
/// assert_eq!(extended.message(), "timeout");
/// assert_eq!(extended.causes().len(), 3);
/// ```
#[track_caller]
pub fn compose<I>(seed: impl Into<Cause>, causes: I) -> HierErr
where
    I: IntoIterator,
    I::Item: Into<Cause>,
{
    let pkg = NodePkg::new();
    match seed.into() {
        Cause::Node(node) => node.append(causes),
        Cause::Opaque(err) => match err.downcast::<HierErr>() {
            Ok(node) => (*node).append(causes),
            Err(err) => copy_view(&Cause::Opaque(err), &pkg).append(causes),
        },
        Cause::Text(text) => HierErr {
            message: text,
            causes: Vec::new(),
            pkg,
        }
        .append(causes),
        foreign @ Cause::Foreign(_) => copy_view(&foreign, &pkg).append(causes),
    }
}

/// Copies the [`ErrNode`] view of `err` into an owned tree.
///
/// Childless descendants become [`Cause::Text`]. Nodes without their own
/// metadata take `pkg`.
fn copy_view(err: &dyn AsErrNode, pkg: &NodePkg) -> HierErr {
    let mut copy = None;
    err.as_err_node(&mut |view| {
        let causes = view
            .causes()
            .iter()
            .map(|cause| {
                let node = copy_view(*cause, pkg);
                if node.causes.is_empty() {
                    Cause::Text(node.message)
                } else {
                    Cause::Node(node)
                }
            })
            .collect();

        copy = Some(HierErr {
            message: view.message().to_string(),
            causes,
            pkg: view.pkg.cloned().unwrap_or_else(|| pkg.clone()),
        });
    });

    copy.unwrap_or_else(|| HierErr {
        message: err.to_string(),
        causes: Vec::new(),
        pkg: pkg.clone(),
    })
}
