//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `jotpad_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("jotpad_core ping={}", jotpad_core::ping());
    println!("jotpad_core version={}", jotpad_core::core_version());
}
