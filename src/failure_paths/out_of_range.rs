//! Single-frame out-of-range read.

use std::hint::black_box;

pub const ITEMS: [i32; 3] = [1, 2, 3];
pub const INDEX: usize = 10;
pub const SIGNATURE: &str = "index out of bounds";
pub const FRAMES: &[&str] = &["index_past_end"];

/// Scenario entry point. Reads index 10 of a three element vector.
#[inline(never)]
pub fn index_past_end() {
    let items = ITEMS.to_vec();
    // black_box keeps the bound check at runtime
    let item = items[black_box(INDEX)];
    black_box(item);
}
