// Copyright 2024-2025 Irreducible Inc.

use std::{
	fmt::{Debug, Display},
	hash::Hash,
	iter::{Product, Sum},
	ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use rand::RngCore;

/// Element of a finite field.
pub trait Field:
	'static
	+ Copy
	+ Clone
	+ Default
	+ Debug
	+ Display
	+ Eq
	+ PartialEq
	+ Hash
	+ Send
	+ Sync
	+ Add<Output = Self>
	+ Sub<Output = Self>
	+ Mul<Output = Self>
	+ Neg<Output = Self>
	+ AddAssign
	+ SubAssign
	+ MulAssign
	+ Sum<Self>
	+ Product<Self>
{
	const ZERO: Self;
	const ONE: Self;

	/// Number of bytes in the canonical big-endian encoding.
	const N_BYTES: usize;

	fn square(self) -> Self {
		self * self
	}

	fn pow(self, mut exp: u64) -> Self {
		let mut acc = Self::ONE;
		let mut base = self;
		while exp != 0 {
			if exp & 1 == 1 {
				acc *= base;
			}
			base = base.square();
			exp >>= 1;
		}
		acc
	}

	/// Multiplicative inverse, `None` for zero.
	fn inverse(self) -> Option<Self>;

	/// Reduces an integer into the field.
	fn from_u64(val: u64) -> Self;

	/// Uniformly random field element.
	fn random(rng: &mut impl RngCore) -> Self;

	/// Appends the canonical big-endian encoding to `out`.
	fn append_canonical_bytes(&self, out: &mut Vec<u8>);
}

/// Field with a multiplicative subgroup of order `2^TWO_ADICITY`.
pub trait TwoAdicField: Field {
	const TWO_ADICITY: usize;

	/// Returns a root of unity of exact order `2^bits`.
	///
	/// Panics if `bits > Self::TWO_ADICITY`.
	fn two_adic_generator(bits: usize) -> Self;
}

/// Field extension over `F`, including the trivial degree-1 extension of a
/// field over itself so that generic code covers both.
pub trait ExtensionOf<F: Field>:
	Field + From<F> + Add<F, Output = Self> + Sub<F, Output = Self> + Mul<F, Output = Self>
{
	const DEGREE: usize;

	/// Builds an element from exactly `DEGREE` base coefficients, low degree
	/// first.
	fn from_base_slice(coefficients: &[F]) -> Self;

	/// The base coefficients, low degree first.
	fn base_slice(&self) -> &[F];
}

impl<F: Field> ExtensionOf<F> for F {
	const DEGREE: usize = 1;

	fn from_base_slice(coefficients: &[F]) -> Self {
		assert_eq!(coefficients.len(), 1);
		coefficients[0]
	}

	fn base_slice(&self) -> &[F] {
		std::slice::from_ref(self)
	}
}
