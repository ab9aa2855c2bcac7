//! Single-frame missing capability: method call through an empty reference.

use std::hint::black_box;

pub const SIGNATURE: &str = "empty reference has no method";
pub const FRAMES: &[&str] = &["call_on_empty"];

/// Target type carrying the capability the scenario tries to reach.
#[derive(Debug)]
pub struct Handle {
    id: u32,
}

impl Handle {
    pub fn new(id: u32) -> Self {
        Self { id }
    }

    pub fn some_method(&self) -> u32 {
        self.id
    }
}

/// Scenario entry point.
#[inline(never)]
pub fn call_on_empty() {
    let handle: Option<&Handle> = black_box(None);
    let reply = handle
        .expect("empty reference has no method `some_method`")
        .some_method();
    black_box(reply);
}
