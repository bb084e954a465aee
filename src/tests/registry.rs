// Logger interning: stable references per context, including past
// the fixed registry capacity.

use crate::config::MAX_CONTEXTS;
use crate::level::LogLevel;
use crate::logger::create_logger;

#[test]
fn interned_logger_is_stable_per_context() {
    let a = create_logger("RNAV");
    let b = create_logger("RNAV");
    assert!(core::ptr::eq(a, b));
    assert_eq!(a.context().as_str(), "RNAV");
}

#[test]
fn full_registry_still_hands_out_stable_references() {
    // Intern the contexts other tests rely on before filling, so they
    // keep their dedicated entries whatever the test order.
    create_logger("FFIL");
    create_logger("RNAV");
    for i in 0..MAX_CONTEXTS {
        create_logger(&format!("V{i:03}"));
    }

    // Registry is full: a new context no longer gets its own entry,
    // but repeated calls still return one stable reference.
    let first = create_logger("POVR");
    let second = create_logger("POVR");
    assert!(core::ptr::eq(first, second));

    // The fallback logger is bound to the empty context and follows
    // the default threshold.
    assert!(first.context().is_empty());
    assert!(first.is_enabled(LogLevel::Info));
    assert!(!first.is_enabled(LogLevel::Verbose));

    // Contexts interned before the registry filled keep their entry.
    let nav = create_logger("RNAV");
    assert_eq!(nav.context().as_str(), "RNAV");
}
