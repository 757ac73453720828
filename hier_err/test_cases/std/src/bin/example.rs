/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt::{self, Display, Formatter};

use hier_err::{render_hierarchical, render_linear, AsErrNode, Cause, HierErr};
use thiserror::Error;

#[allow(dead_code)]
fn main() {
    let (lines, tree) = gen_print();
    println!("{lines}\n\n{tree}")
}

fn gen_print() -> (String, String) {
    let fatal = MissedClass::Overslept(Overslept {
        bed_time: BedTime {
            hour: 2,
            reasons: vec![
                BedTimeReasons::FinishingProject(ClassProject {
                    desc: "proving 1 == 2".to_string(),
                }),
                BedTimeReasons::ExamStressed,
                BedTimeReasons::PlayingGames,
            ],
        },
        comfy: BedComfy,
    });

    let report = HierErr::with_cause("morning went wrong", Cause::foreign(fatal))
        .append(["coffee machine empty"]);

    (render_linear(&report), render_hierarchical(&report))
}

#[derive(Debug, Error)]
#[error("{desc}")]
struct ClassProject {
    desc: String,
}

#[derive(Debug, Error, AsErrNode)]
enum BedTimeReasons {
    #[error("finishing a project")]
    FinishingProject(#[node_cause] ClassProject),
    #[error("stressed about exams")]
    ExamStressed,
    #[error("playing video games")]
    PlayingGames,
}

impl AsErrNode for ClassProject {
    fn as_err_node(&self, func: &mut dyn FnMut(hier_err::ErrNode<'_>)) {
        (func)(hier_err::ErrNode::new(self, &[]))
    }
}

#[derive(Debug, Error, AsErrNode)]
struct BedTime {
    hour: u8,
    #[node_causes]
    reasons: Vec<BedTimeReasons>,
}

impl Display for BedTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let half = if self.hour < 12 { "A.M." } else { "P.M." };
        let hour = if self.hour > 12 {
            self.hour - 12
        } else {
            self.hour
        };
        write!(f, "went to sleep at {hour} {half}")
    }
}

#[derive(Debug, Error)]
#[error("bed is comfortable")]
struct BedComfy;

#[derive(Debug, Error, AsErrNode)]
#[error("stayed in bed too long")]
struct Overslept {
    #[dyn_cause]
    comfy: BedComfy,
    #[node_cause]
    bed_time: BedTime,
}

#[derive(Debug, Error, AsErrNode)]
#[error("missed class")]
enum MissedClass {
    Overslept(#[node_cause] Overslept),
    #[expect(unused)]
    NuclearWar,
}
