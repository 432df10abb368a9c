// ── Hookchat Atoms Layer ───────────────────────────────────────────────────
// Pure constants, error types, and data definitions. Zero side effects,
// no I/O. Atoms may only depend on std and external pure crates; nothing
// here may import from engine/.

pub mod constants;
pub mod error;
pub mod types;
