//! Three-frame value-domain failure: `outer` -> `middle` -> `inner`.

use std::hint::black_box;

pub const INNER_ERROR_MESSAGE: &str = "Test error from inner function";

/// Fixture chain, outermost first.
pub const FRAMES: &[&str] = &["outer", "middle", "inner"];

/// Always panics with [`INNER_ERROR_MESSAGE`].
#[inline(never)]
pub fn inner() -> ! {
    panic!("{}", INNER_ERROR_MESSAGE);
}

/// Doubles `data`. An empty sentinel is handed on to [`inner`].
#[inline(never)]
pub fn middle(data: Option<i64>) -> i64 {
    match data {
        Some(value) => value * 2,
        None => inner(),
    }
}

/// Scenario entry point.
#[inline(never)]
pub fn outer() {
    let result = middle(None);
    black_box(result);
}
