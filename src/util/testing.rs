//! Test helpers: one-time tracing setup and fixture builders

use std::path::{Path, PathBuf};
use std::sync::Once;

use tracing::{debug, info};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::domain::{Forest, Species, Tree};

static TEST_SETUP: Once = Once::new();

/// Install the test logging subscriber once per process.
///
/// Honors `RUST_LOG`; defaults to `debug`.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        info!("Test Setup complete");
    });
}

fn setup_test_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}

/// A small forest with known values: heights 10, 20 and 35 feet.
pub fn sample_forest(name: &str) -> Forest {
    let mut forest = Forest::new(name);
    forest.push(Tree::new(Species::Birch, 2020, 10.0, 12.0));
    forest.push(Tree::new(Species::Maple, 2015, 20.0, 15.5));
    forest.push(Tree::new(Species::Fir, 2008, 35.0, 10.0));
    forest
}

/// Write a delimited text file into `dir` and return its path.
pub fn write_text_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("write forest text file");
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_test_setup() {
        init_test_setup();
        init_test_setup();
    }

    #[test]
    fn test_sample_forest_average() {
        assert_eq!(sample_forest("Sample").average_height(), 21.67);
    }
}
