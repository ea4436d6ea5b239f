//! Usage: Pure logic (no window or OS calls).

pub(crate) mod appearance;
