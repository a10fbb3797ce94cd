//! Tracing subscriber for the `irule` binary.
//!
//! `RUST_LOG` wins when set. Otherwise only warnings are shown, or, with
//! `--debug`, the parser's and evaluator's debug events as an indented
//! tree.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use tracing_tree::HierarchicalLayer;

static TRACING_INIT: Once = Once::new();

/// Filter directives used when `RUST_LOG` is unset.
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "warn,irule_lexer=debug,irule_parse=debug,irule_eval=debug,irulec=debug"
    } else {
        "warn"
    }
}

/// Install the global subscriber. Later calls do nothing.
pub fn init_tracing(debug: bool) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

        let tree = debug.then(|| {
            HierarchicalLayer::new(2)
                .with_writer(std::io::stderr)
                .with_targets(true)
        });
        let plain = (!debug).then(|| {
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true)
        });

        // Another subscriber may already be installed, e.g. by a test harness.
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(tree)
            .with(plain)
            .try_init();
    });
}
