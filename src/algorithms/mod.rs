// SPDX-License-Identifier: MIT

//! Algorithms built on [`BoundedPool`](crate::BoundedPool).

pub mod generate;
pub mod reduce;
pub mod stencil;

pub use generate::{generate, generate_with};
pub use reduce::{sum, sum_capped};
pub use stencil::{filter, MIN_STENCIL_LEN};
