//! Composition with an opaque computation layer
//!
//! Quantization composes with downstream computation by quantizing data
//! and/or weights independently before handing both to a black-box
//! `compute(data, weights)` function. This module provides that seam
//! plus the serializable configuration mapping that drives it.

mod config;
mod layer;


pub use config::{ClipInit, QuantConfig};
pub use layer::{Compute, QuantizedLayer};
