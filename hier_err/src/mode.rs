/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use alloc::string::{String, ToString};
use core::{
    error::Error,
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Output shape for [`serialize`](crate::serialize).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Mode {
    /// `msg: cause; cause` on a single line.
    Linear,
    /// Multi-line tree with box-drawing connectors.
    #[default]
    Hierarchical,
}

impl Mode {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Hierarchical => "hierarchical",
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Mode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case(Self::Linear.name()) {
            Ok(Self::Linear)
        } else if s.eq_ignore_ascii_case(Self::Hierarchical.name()) {
            Ok(Self::Hierarchical)
        } else {
            Err(UnknownMode(s.to_string()))
        }
    }
}

/// A mode name that is neither `linear` nor `hierarchical`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownMode(pub String);

impl Display for UnknownMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "unknown serialization mode {:?}", self.0)
    }
}

impl Error for UnknownMode {}
