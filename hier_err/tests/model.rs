use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io,
};

use hier_err::{
    compose, render_hierarchical, render_linear, serialize, serialize_named, tree_unwrap, wrap_err,
    write_tree, AsErrNode, Cause, ErrNode, HierErr, Mode, UnknownMode,
};

fn cause_texts(err: &HierErr) -> Vec<String> {
    err.causes().iter().map(ToString::to_string).collect()
}

#[test]
fn push_keeps_prior_cause_first() {
    let mut err = HierErr::with_cause("1", "2");
    err.push(["3", "4"]);

    assert_eq!(err.message(), "1");
    assert_eq!(cause_texts(&err), ["2", "3", "4"]);
}

#[test]
fn push_onto_empty_and_many() {
    let mut empty = HierErr::new("1");
    assert!(empty.causes().is_empty());
    empty.push(["a"]);
    assert_eq!(cause_texts(&empty), ["a"]);

    let mut many = HierErr::new("1").append(["a", "b"]);
    many.push_cause("c");
    many.push(Vec::<Cause>::new());
    assert_eq!(cause_texts(&many), ["a", "b", "c"]);
}

#[test]
fn compose_extends_existing_node() {
    let base = HierErr::with_cause("download", "timeout");
    let composed = compose(base, ["checksum mismatch"]);

    assert_eq!(composed.message(), "download");
    assert_eq!(cause_texts(&composed), ["timeout", "checksum mismatch"]);
}

#[test]
fn compose_promotes_leaf_values() {
    let from_text = compose("disk", ["full"]);
    assert_eq!(from_text.message(), "disk");
    assert_eq!(render_linear(&from_text), "disk: full");

    let from_error = compose(Cause::error(io::Error::other("io")), ["short read"]);
    assert_eq!(from_error.message(), "io");
    assert_eq!(cause_texts(&from_error), ["short read"]);
}

#[test]
fn compose_unwraps_boxed_node() {
    let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(HierErr::with_cause("a", "b"));
    let composed = compose(boxed, ["c"]);

    assert_eq!(composed.message(), "a");
    assert_eq!(render_linear(&composed), "a: b; c");
}

#[derive(Debug)]
struct Mirror {
    primary: io::Error,
    rest: Vec<HierErr>,
}

impl Error for Mirror {}
impl Display for Mirror {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "mirror failed")
    }
}

impl AsErrNode for Mirror {
    fn as_err_node(&self, func: &mut dyn FnMut(ErrNode<'_>)) {
        let primary = &self.primary as &(dyn Error + 'static);
        let mut causes: Vec<&dyn AsErrNode> = Vec::new();
        causes.push(&primary);
        causes.extend(self.rest.iter().map(|e| e as &dyn AsErrNode));
        (func)(ErrNode::new(self, &causes))
    }
}

#[test]
fn compose_keeps_foreign_subtree() {
    let seed = Mirror {
        primary: io::Error::other("disk full"),
        rest: vec![HierErr::with_cause("retry", "refused")],
    };
    let composed = compose(Cause::foreign(seed), ["x"]);

    assert_eq!(composed.message(), "mirror failed");
    assert_eq!(render_linear(&composed), "mirror failed: disk full; retry: refused; x");

    let causes = composed.causes();
    assert_eq!(causes[0].as_text(), Some("disk full"));
    assert_eq!(causes[1].as_node().map(HierErr::message), Some("retry"));
    assert_eq!(causes[2].as_text(), Some("x"));
}

#[derive(Debug, thiserror::Error)]
#[error("query failed")]
struct Query(#[source] io::Error);

#[test]
fn compose_keeps_opaque_source_chain() {
    let composed = compose(Cause::error(Query(io::Error::other("connection reset"))), ["x"]);

    assert_eq!(composed.message(), "query failed");
    assert_eq!(render_linear(&composed), "query failed: connection reset; x");
    assert_eq!(composed.causes().len(), 2);
}

#[test]
fn compose_never_double_wraps() {
    let once = compose("seed", ["x"]);
    let twice = compose(once, ["y"]);

    assert_eq!(twice.message(), "seed");
    assert_eq!(render_linear(&twice), "seed: x; y");
}

#[test]
fn cause_accessors() {
    let err = HierErr::new("top").append([
        Cause::from("text"),
        HierErr::new("node").into(),
        Cause::error(io::Error::other("opaque")),
    ]);

    let causes = err.causes();
    assert_eq!(causes[0].as_text(), Some("text"));
    assert_eq!(causes[1].as_node().map(HierErr::message), Some("node"));
    assert!(causes[2].as_node().is_none());
    assert!(causes[2].as_text().is_none());
}

#[test]
fn source_is_first_cause() {
    let err = HierErr::new("top").append(["first", "second"]);
    assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("first"));
    assert!(HierErr::new("leaf").source().is_none());
}

#[test]
fn mode_dispatch() {
    let err = wrap_err!("1", "2{}", "3");

    assert_eq!(serialize(&err, Mode::Linear), "23: 1");
    assert_eq!(err.serialize(Mode::Linear), "23: 1");
    assert_eq!(serialize(&err, Mode::Hierarchical), render_hierarchical(&err));
    assert_eq!(Mode::default(), Mode::Hierarchical);
}

#[derive(Debug)]
struct Unprintable;

impl Error for Unprintable {}
impl Display for Unprintable {
    fn fmt(&self, _: &mut Formatter<'_>) -> fmt::Result {
        Err(fmt::Error)
    }
}

#[test]
fn failing_message_stops_output() {
    let err = HierErr::new("top").append([Cause::error(Unprintable), "after".into()]);

    let mut out = String::new();
    assert_eq!(write_tree(&err, Mode::Linear, &mut out), Err(fmt::Error));
    assert_eq!(out, "top: ");
    assert_eq!(serialize(&err, Mode::Linear), "top: ");
}

#[test]
fn mode_names() {
    assert_eq!("linear".parse::<Mode>(), Ok(Mode::Linear));
    assert_eq!("Hierarchical".parse::<Mode>(), Ok(Mode::Hierarchical));
    assert_eq!(Mode::Linear.to_string(), "linear");
    assert_eq!(
        "json".parse::<Mode>(),
        Err(UnknownMode("json".to_string()))
    );
    assert_eq!(
        UnknownMode("json".to_string()).to_string(),
        "unknown serialization mode \"json\""
    );
}

#[test]
fn unknown_mode_falls_back_to_display() {
    let err = HierErr::new("top").append(["x"]);

    assert_eq!(serialize_named(&err, "linear"), "top: x");
    assert_eq!(serialize_named(&err, "yaml"), err.to_string());

    let leaf = Cause::from("plain");
    assert_eq!(serialize_named(&leaf, ""), "plain");
}

#[test]
fn tree_unwrap_passes_ok() {
    let res: Result<u8, HierErr> = Ok(7);
    assert_eq!(tree_unwrap(res), 7);
}

#[test]
#[should_panic(expected = "outer")]
fn tree_unwrap_panics_with_tree() {
    let res: Result<(), HierErr> = Err(HierErr::with_cause("outer", "inner"));
    tree_unwrap(res);
}

#[test]
fn renders_are_thread_safe() {
    let err = std::sync::Arc::new(HierErr::new("shared").append(["a", "b"]));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let err = err.clone();
            std::thread::spawn(move || render_linear(&*err))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "shared: a; b");
    }
}
