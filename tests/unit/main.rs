//! Unit tests mirroring the `src` tree one file per module


#[path = "../support/mod.rs"]
mod support;
