/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use alloc::string::String;
use core::fmt::{self, Display, Write};

use crate::{AsErrNode, ErrNode};

const BRANCH: &str = "├─ ";
const LAST_BRANCH: &str = "└─ ";
const CONTINUING: &str = "│  ";
const DANGLING: &str = "   ";
const SEPARATOR: &str = "│";

/// Writes `err` as `msg: cause; cause`, recursing through every cause.
pub(crate) fn fmt_linear<E, F>(err: &E, f: &mut F) -> fmt::Result
where
    E: AsErrNode + ?Sized,
    F: fmt::Write + ?Sized,
{
    let mut res = Ok(());
    err.as_err_node(&mut |node| res = linear_node(node, f));
    res
}

fn linear_node<F: fmt::Write + ?Sized>(node: ErrNode<'_>, f: &mut F) -> fmt::Result {
    write!(f, "{}", node.message())?;

    for (idx, cause) in node.causes().iter().enumerate() {
        f.write_str(if idx == 0 { ": " } else { "; " })?;
        fmt_linear(*cause, f)?;
    }

    Ok(())
}

/// Writes `err` as a box-drawn tree.
pub(crate) fn fmt_hierarchical<E, F>(err: &E, f: &mut F) -> fmt::Result
where
    E: AsErrNode + ?Sized,
    F: fmt::Write + ?Sized,
{
    let mut front_lines = String::new();
    let mut res = Ok(());
    err.as_err_node(&mut |node| {
        res = HierFmt {
            f: &mut *f,
            front_lines: &mut front_lines,
        }
        .node(node)
        .map(|_| ())
    });
    res
}

struct HierFmt<'a, F: ?Sized> {
    f: &'a mut F,
    /// Connector columns inherited from every ancestor.
    front_lines: &'a mut String,
}

impl<F: fmt::Write + ?Sized> HierFmt<'_, F> {
    /// Starts a child line with the inherited columns and its connector.
    fn connector(&mut self, last: bool) -> fmt::Result {
        self.f.write_char('\n')?;
        self.f.write_str(self.front_lines.as_str())?;
        self.f.write_str(if last { LAST_BRANCH } else { BRANCH })
    }

    /// Writes `msg`, continuing any embedded line breaks under the current
    /// columns. Returns the number of lines written.
    fn message(&mut self, msg: &dyn Display) -> Result<usize, fmt::Error> {
        let mut out = FrontLineWriter {
            f: &mut *self.f,
            front_lines: self.front_lines.as_str(),
            lines: 1,
        };
        write!(out, "{msg}")?;
        Ok(out.lines)
    }

    /// Writes one node and all of its descendants.
    ///
    /// Returns the number of lines in the node's block, which decides
    /// whether a separator follows it.
    fn node(&mut self, node: ErrNode<'_>) -> Result<usize, fmt::Error> {
        let mut lines = self.message(node.message())?;

        #[cfg(any(feature = "source_line", feature = "tracing"))]
        let leaves = metadata_lines(&node);
        #[cfg(not(any(feature = "source_line", feature = "tracing")))]
        let leaves: [String; 0] = [];

        let causes = node.causes();
        let total = leaves.len() + causes.len();

        for (idx, leaf) in leaves.iter().enumerate() {
            self.connector(idx + 1 == total)?;
            self.f.write_str(leaf)?;
            lines += 1;
        }

        for (idx, cause) in causes.iter().enumerate() {
            let last = leaves.len() + idx + 1 == total;
            self.connector(last)?;

            let prev_len = self.front_lines.len();
            self.front_lines.push_str(if last { DANGLING } else { CONTINUING });

            let mut res = Ok(0);
            cause.as_err_node(&mut |source| res = self.node(source));
            self.front_lines.truncate(prev_len);

            let block = res?;
            lines += block;

            if !last && block > 1 {
                self.f.write_char('\n')?;
                self.f.write_str(self.front_lines.as_str())?;
                self.f.write_str(SEPARATOR)?;
                lines += 1;
            }
        }

        Ok(lines)
    }
}

/// Single-line leaves rendered ahead of a node's causes.
#[cfg(any(feature = "source_line", feature = "tracing"))]
fn metadata_lines(node: &ErrNode<'_>) -> alloc::vec::Vec<String> {
    let mut lines = alloc::vec::Vec::new();

    #[cfg(feature = "source_line")]
    if let Some(location) = node.location() {
        lines.push(alloc::format!("at {location}"));
    }

    #[cfg(feature = "tracing")]
    if let Some(trace) = node.span_trace() {
        trace.with_spans(|metadata, _| {
            lines.push(frame_line(metadata));
            true
        });
    }

    lines
}

#[cfg(feature = "tracing")]
fn frame_line(metadata: &tracing_core::Metadata<'_>) -> String {
    alloc::format!("in {}::{}", metadata.target(), metadata.name())
}

/// Indents every line after the first with the current connector columns.
struct FrontLineWriter<'a, F: ?Sized> {
    f: &'a mut F,
    front_lines: &'a str,
    lines: usize,
}

impl<F: fmt::Write + ?Sized> fmt::Write for FrontLineWriter<'_, F> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut parts = s.split('\n');
        if let Some(first) = parts.next() {
            self.f.write_str(first)?;
        }
        for part in parts {
            self.f.write_char('\n')?;
            self.f.write_str(self.front_lines)?;
            self.f.write_str(part)?;
            self.lines += 1;
        }
        Ok(())
    }
}
