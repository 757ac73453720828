#![cfg(all(feature = "tracing", not(feature = "source_line")))]

use hier_err::{render_hierarchical, render_linear, HierErr};
use tracing_error::ErrorLayer;
use tracing_subscriber::{layer::SubscriberExt, Registry};

#[tracing::instrument]
fn load_config() -> HierErr {
    HierErr::with_cause("load config", "missing file")
}

#[test]
fn span_frames_lead_the_causes() {
    let subscriber = Registry::default().with(ErrorLayer::default());
    let err = tracing::subscriber::with_default(subscriber, load_config);

    assert_eq!(
        render_hierarchical(&err),
        "load config\n├─ in span_trace::load_config\n└─ missing file"
    );
    assert_eq!(render_linear(&err), "load config: missing file");
}

#[test]
fn no_subscriber_no_frames() {
    let err = HierErr::with_cause("a", "b");
    assert_eq!(render_hierarchical(&err), "a\n└─ b");
}
