// Copyright 2024-2025 Irreducible Inc.

//! Prime-field arithmetic for the Vortex polynomial commitment scheme.
//!
//! The working field is [`KoalaBear`], the 31-bit prime field with modulus
//! `2^31 - 2^24 + 1`. Its large power-of-two subgroup makes it suitable for
//! radix-2 number-theoretic transforms. Soundness-critical randomness lives in
//! the degree-4 extension [`KoalaBearExt4`], which shares the base field's
//! two-adic subgroups.

mod arithmetic;
mod extension;
mod field;
mod koala_bear;

pub use arithmetic::batch_invert;
pub use extension::KoalaBearExt4;
pub use field::{ExtensionOf, Field, TwoAdicField};
pub use koala_bear::KoalaBear;
