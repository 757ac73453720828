/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/*!
Nested error chains with two renderings.

A [`HierErr`] carries a message and an ordered list of [`Cause`]s, where each
cause is plain text, an opaque [`Error`], another [`HierErr`], or any foreign
type implementing [`AsErrNode`]. The whole tree renders either on one line
with [`render_linear`] or as a box-drawn tree with [`render_hierarchical`].

```
use hier_err::{render_linear, HierErr};

let err = HierErr::with_cause("loading config", "file not found")
    .append(["permission denied"]);

assert_eq!(
    render_linear(&err),
    "loading config: file not found; permission denied"
);
println!("{err}");
```

Printed without the `source_line` or `tracing` features:

```text
loading config
├─ file not found
└─ permission denied
```
*/

#![no_std]

extern crate alloc;

use alloc::string::{String, ToString};
use core::{
    error::Error,
    fmt::{self, Debug, Display, Formatter},
    panic::Location,
};

mod pkg;
pub use pkg::*;
mod node;
pub use node::*;
mod mode;
pub use mode::*;
mod fmt_logic;
use fmt_logic::*;

#[cfg(feature = "derive")]
pub use hier_err_proc::*;

#[doc(hidden)]
pub mod __private {
    pub use alloc::{format, vec::Vec};
}

/// Builds a [`HierErr`] with a formatted message and a single cause.
///
/// ```
/// use hier_err::{render_linear, wrap_err};
///
/// let err = wrap_err!("1", "2{}", "3");
/// assert_eq!(render_linear(&err), "23: 1");
/// ```
#[macro_export]
macro_rules! wrap_err {
    ($cause:expr, $($arg:tt)+) => {
        $crate::HierErr::with_cause($crate::__private::format!($($arg)+), $cause)
    };
}

/// Renders `err` on a single line.
///
/// Each node is written as its message, followed by `": "` and its causes
/// joined with `"; "`. Leaves are written as their text alone.
pub fn render_linear<E: AsErrNode + ?Sized>(err: &E) -> String {
    serialize(err, Mode::Linear)
}

/// Renders `err` as a tree with box-drawing connectors.
pub fn render_hierarchical<E: AsErrNode + ?Sized>(err: &E) -> String {
    serialize(err, Mode::Hierarchical)
}

/// Renders `err` in the given [`Mode`].
///
/// Output stops at a message whose [`Display`] fails. [`write_tree`]
/// reports that error instead.
pub fn serialize<E: AsErrNode + ?Sized>(err: &E, mode: Mode) -> String {
    let mut out = String::new();
    let _ = write_tree(err, mode, &mut out);
    out
}

/// Renders `err` in the mode named by `mode`.
///
/// Unrecognized names fall back to the plain [`Display`] form of `err`.
pub fn serialize_named<E: AsErrNode + ?Sized>(err: &E, mode: &str) -> String {
    match mode.parse::<Mode>() {
        Ok(mode) => serialize(err, mode),
        Err(_) => err.to_string(),
    }
}

/// Streams the rendering of `err` into `formatter`.
pub fn write_tree<E, F>(err: &E, mode: Mode, formatter: &mut F) -> fmt::Result
where
    E: AsErrNode + ?Sized,
    F: fmt::Write + ?Sized,
{
    match mode {
        Mode::Linear => fmt_linear(err, formatter),
        Mode::Hierarchical => fmt_hierarchical(err, formatter),
    }
}

/// Alternative to [`Result::unwrap`] that formats the error as a tree.
#[track_caller]
pub fn tree_unwrap<T, E: AsErrNode>(res: Result<T, E>) -> T {
    match res {
        Ok(x) => x,
        Err(err) => panic!("{}", Hierarchical(&err)),
    }
}

/// Displays the wrapped error with [`render_linear`] formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Linear<E>(pub E);

impl<E: AsErrNode> Display for Linear<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_linear(&self.0, f)
    }
}

/// Displays the wrapped error with [`render_hierarchical`] formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hierarchical<E>(pub E);

impl<E: AsErrNode> Display for Hierarchical<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt_hierarchical(&self.0, f)
    }
}

/// Temporary view of one node, created by [`AsErrNode`] for rendering.
///
/// # Manual Implementation Example
/// ```
/// # use std::{
/// #   error::Error,
/// #   fmt::{Display, Formatter},
/// # };
/// use hier_err::{render_linear, AsErrNode, ErrNode};
///
/// #[derive(Debug)]
/// pub struct Replication {
///     primary: std::io::Error,
///     replica: std::io::Error,
/// }
///
/// impl AsErrNode for Replication {
///     fn as_err_node(&self, func: &mut dyn FnMut(ErrNode<'_>)) {
///         // Cast to AsErrNode via Error
///         let primary = &self.primary as &(dyn Error + 'static);
///         let replica = &self.replica as &(dyn Error + 'static);
///
///         // Call the formatting function
///         (func)(ErrNode::new(self, &[&primary, &replica]));
///     }
/// }
///
/// impl Error for Replication {}
/// impl Display for Replication {
///     fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
///         write!(f, "replication failed")
///     }
/// }
///
/// let err = Replication {
///     primary: std::io::Error::other("disk full"),
///     replica: std::io::Error::other("timed out"),
/// };
/// assert_eq!(render_linear(&err), "replication failed: disk full; timed out");
/// ```
#[derive(Clone, Copy)]
pub struct ErrNode<'a> {
    msg: &'a dyn Display,
    causes: &'a [&'a dyn AsErrNode],
    pkg: Option<&'a NodePkg>,
}

impl<'a> ErrNode<'a> {
    /// Constructor for nodes without metadata.
    pub fn new(msg: &'a dyn Display, causes: &'a [&'a dyn AsErrNode]) -> Self {
        Self {
            msg,
            causes,
            pkg: None,
        }
    }

    /// Constructor carrying construction metadata.
    pub fn with_pkg(
        msg: &'a dyn Display,
        causes: &'a [&'a dyn AsErrNode],
        pkg: &'a NodePkg,
    ) -> Self {
        Self {
            msg,
            causes,
            pkg: Some(pkg),
        }
    }

    pub fn message(&self) -> &'a dyn Display {
        self.msg
    }

    pub fn causes(&self) -> &'a [&'a dyn AsErrNode] {
        self.causes
    }

    pub fn location(&self) -> Option<&'static Location<'static>> {
        self.pkg.map(NodePkg::location)
    }

    #[cfg(feature = "tracing")]
    pub fn span_trace(&self) -> Option<&'a tracing_error::SpanTrace> {
        self.pkg.map(NodePkg::span_trace)
    }
}

impl Debug for ErrNode<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrNode")
            .field("msg", &format_args!("{}", self.msg))
            .field("causes", &self.causes.len())
            .field("pkg", &self.pkg)
            .finish()
    }
}

/// Defines an [`Error`]'s temporary view as an [`ErrNode`] for rendering.
///
/// This can be derived with `#[derive(AsErrNode)]`, written manually (see
/// [`ErrNode`]), or taken from the default `dyn Error` implementation. The
/// `dyn` implementation treats [`Error::source`] as the only cause.
pub trait AsErrNode: Error {
    /// Constructs the [`ErrNode`] internally and calls `func` on it.
    fn as_err_node(&self, func: &mut dyn FnMut(ErrNode<'_>));
}

/// Displays with [`Error::source`] as the child.
///
/// A [`HierErr`] or [`Cause`] hidden behind `dyn Error` is recovered and
/// rendered with all of its causes.
impl AsErrNode for dyn Error {
    fn as_err_node(&self, func: &mut dyn FnMut(ErrNode<'_>)) {
        if let Some(node) = self.downcast_ref::<HierErr>() {
            return node.as_err_node(func);
        }
        if let Some(cause) = self.downcast_ref::<Cause>() {
            return cause.as_err_node(func);
        }

        let msg = ErrDisplay(self);
        match self.source() {
            Some(e) => (func)(ErrNode::new(&msg, &[&e as &dyn AsErrNode])),
            None => (func)(ErrNode::new(&msg, &[])),
        }
    }
}

impl<T: ?Sized + AsErrNode> AsErrNode for &T {
    fn as_err_node(&self, func: &mut dyn FnMut(ErrNode<'_>)) {
        T::as_err_node(self, func)
    }
}

/// Shows a `dyn Error` through [`Display`] without upcasting.
struct ErrDisplay<'a>(&'a dyn Error);

impl Display for ErrDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self.0, f)
    }
}
