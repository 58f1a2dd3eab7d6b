pub mod mock_evaluator;
pub use mock_evaluator::ClosureEvaluator;

use once_cell::sync::Lazy;

static TRACING_INIT: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
});

/// Initialize a `tracing` subscriber once for the whole test binary, so
/// `RUST_LOG=debug cargo test -- --nocapture` surfaces phase transitions.
pub fn init_tracing() {
    Lazy::force(&TRACING_INIT);
}

/// Assert that a `Result` contains a specific error variant.
///
/// Handles the common pattern of pattern-matching a `CoreError` (or any
/// local error type) without repeating the "expected error, got Ok" panic
/// message at every call site.
#[macro_export]
macro_rules! assert_error {
    ($result:expr, $pattern:pat => $validation:block) => {
        if let Err(error) = &$result {
            match error {
                $pattern => $validation,
                other => panic!(
                    "error variant mismatch. expected pattern {}, got {:?}",
                    stringify!($pattern),
                    other
                ),
            }
        } else {
            panic!("expected error result, got Ok");
        }
    };

    ($result:expr, $pattern:pat) => {
        if let Err(error) = &$result {
            assert!(
                matches!(error, $pattern),
                "error variant mismatch. expected pattern {}, got {:?}",
                stringify!($pattern),
                error
            );
        } else {
            panic!("expected error result, got Ok");
        }
    };
}
