#![cfg(feature = "eyre")]

use std::io;

use eyre::WrapErr;
use hier_err::{render_linear, Cause, HierErr};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("query failed")]
struct Query(#[source] io::Error);

#[test]
fn plain_chain() {
    let err = HierErr::with_cause(
        "request",
        eyre::Report::from(Query(io::Error::other("connection reset"))),
    );

    assert_eq!(render_linear(&err), "request: query failed: connection reset");
}

#[test]
fn wrap_err_chain() {
    let res: Result<(), io::Error> = Err(io::Error::other("EOF"));
    let err = HierErr::with_cause("request", res.wrap_err("read header").unwrap_err());

    assert_eq!(render_linear(&err), "request: read header: EOF");
}

#[test]
fn wrapped_node_is_recovered() {
    let inner = eyre::Report::from(HierErr::new("inner").append(["x", "y"]));
    let err = HierErr::with_cause("top", inner);

    assert_eq!(err.causes()[0].as_node().map(HierErr::message), Some("inner"));
    assert_eq!(render_linear(&err), "top: inner: x; y");

    #[cfg(not(any(feature = "source_line", feature = "tracing")))]
    assert_eq!(
        hier_err::render_hierarchical(&err),
        "top\n└─ inner\n   ├─ x\n   └─ y"
    );
}

#[test]
fn wrapped_cause_is_recovered() {
    let cause = Cause::from(eyre::Report::from(Cause::from("plain")));
    assert_eq!(cause.as_text(), Some("plain"));
}
