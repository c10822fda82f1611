// SPDX-License-Identifier: MIT

pub mod counters;
pub mod producers;
pub mod reference;
