/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use hier_err::AsErrNode;

fn main() {}

#[allow(dead_code)]
#[derive(Debug, AsErrNode)]
struct DoubleCause {
    #[dyn_cause]
    #[dyn_causes]
    io: std::io::Error,
}
