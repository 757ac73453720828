/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{array, io};

use hier_err::{render_linear, AsErrNode, Cause, HierErr};
use thiserror::Error;

#[derive(Debug, Error, AsErrNode)]
#[error("unit")]
struct Unit;

#[derive(Debug, Error, AsErrNode)]
#[error("tuple")]
struct Tuple(u8, #[dyn_cause] io::Error, #[node_cause] HierErr);

#[derive(Debug, Error, AsErrNode)]
#[error("arrays")]
struct Arrays {
    #[dyn_causes]
    io: [io::Error; 3],
    #[node_causes]
    causes: Vec<Cause>,
}

#[derive(Debug, Error, AsErrNode)]
#[error("generic")]
struct Generic<E: std::error::Error + 'static> {
    #[dyn_cause]
    inner: E,
}

#[derive(Debug, AsErrNode)]
enum Never {}

impl std::error::Error for Never {}
impl std::fmt::Display for Never {
    fn fmt(&self, _: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {}
    }
}

#[derive(Debug, Error, AsErrNode)]
enum Mixed {
    #[error("named")]
    Named {
        #[dyn_cause]
        first: io::Error,
        skipped: u8,
        #[node_causes]
        rest: Vec<HierErr>,
    },
    #[error("tuple")]
    Tuple(u8, #[node_cause] Unit),
    #[error("unit")]
    Empty,
}

fn main() {
    let eof = || io::Error::from(io::ErrorKind::UnexpectedEof);

    let _ = render_linear(&Unit);
    let _ = render_linear(&Tuple(0, eof(), HierErr::new("node")));
    let _ = render_linear(&Arrays {
        io: array::from_fn(|_| eof()),
        causes: vec!["text".into()],
    });
    let _ = render_linear(&Generic { inner: eof() });
    let _ = render_linear(&Mixed::Named {
        first: eof(),
        skipped: 1,
        rest: Vec::new(),
    });
    let _ = render_linear(&Mixed::Tuple(1, Unit));
    let _ = render_linear(&Mixed::Empty);
    let _ = std::mem::size_of::<Never>();
}
