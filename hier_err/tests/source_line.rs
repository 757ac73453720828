#![cfg(all(feature = "source_line", not(feature = "tracing")))]

use hier_err::{compose, render_hierarchical, render_linear, HierErr};

#[test]
fn location_leads_the_causes() {
    let err = HierErr::with_cause("outer", "inner");
    let location = err.pkg().location();

    assert_eq!(location.file(), file!());
    assert_eq!(
        render_hierarchical(&err),
        format!("outer\n├─ at {location}\n└─ inner")
    );
    assert_eq!(render_linear(&err), "outer: inner");
}

#[test]
fn leaf_location_is_last() {
    let line = line!() + 1;
    let err = HierErr::new("leaf");
    let location = err.pkg().location();

    assert_eq!(location.line(), line);
    assert_eq!(render_hierarchical(&err), format!("leaf\n└─ at {location}"));
}

#[test]
fn compose_tracks_its_caller() {
    let line = line!() + 1;
    let err = compose("seed", ["cause"]);
    assert_eq!(err.pkg().location().line(), line);
}

#[test]
fn nested_locations() {
    let inner = HierErr::with_cause("inner", "cause");
    let inner_loc = inner.pkg().location();
    let outer = HierErr::with_cause("outer", inner);
    let outer_loc = outer.pkg().location();

    let expected = format!(
        "outer
├─ at {outer_loc}
└─ inner
   ├─ at {inner_loc}
   └─ cause"
    );

    assert_eq!(render_hierarchical(&outer), expected);
}
