//! Read-only arena dump for debugging.
//!
//! Renders the raw arena as one row per slot and one column per byte.
//! The four bookkeeping columns are printed as signed values so the
//! `NONE_BYTE` encoding shows up as `-1`, the way the index fields are
//! meant to be read; payload columns are printed unsigned.

use std::fmt::Write;

use crate::config::{BOOKKEEPING_SIZE, SLOT_COUNT, SLOT_SIZE};
use crate::pool::FragmentPool;

/// Render the pool's arena as a 64x32 table.
///
/// Purely observational: takes the pool by shared reference and mutates
/// nothing.
pub fn dump_arena(pool: &FragmentPool) -> String {
    let mut out = String::new();
    let arena = pool.arena();

    let _ = writeln!(
        out,
        "arena: {} slots x {} bytes, {} free",
        SLOT_COUNT,
        SLOT_SIZE,
        pool.free_count()
    );

    // Column header
    let _ = write!(out, "      ");
    for col in 0..SLOT_SIZE {
        let _ = write!(out, "{col:>4}");
    }
    let _ = writeln!(out);

    for row in 0..SLOT_COUNT {
        let _ = write!(out, "{row:>4} |");
        for col in 0..SLOT_SIZE {
            let byte = arena[row * SLOT_SIZE + col];
            if col < BOOKKEEPING_SIZE {
                // Index fields read as signed: 0xFF renders as -1
                let _ = write!(out, "{:>4}", byte as i8);
            } else {
                let _ = write!(out, "{byte:>4}");
            }
        }
        let _ = writeln!(out);
    }

    out
}
