// Copyright 2024-2025 Irreducible Inc.

use std::{
	fmt::{self, Debug, Display},
	iter::{Product, Sum},
	ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use bytes::{Buf, BufMut};
use rand::RngCore;
use vortex_utils::serialization::{self, DeserializeBytes, SerializeBytes};

use crate::field::{Field, TwoAdicField};

/// The 31-bit prime field with modulus `p = 2^31 - 2^24 + 1`.
///
/// `p - 1 = 2^24 * 127`, so the multiplicative group contains a subgroup of
/// order `2^24`, enough for every transform domain this crate works with. The
/// value is kept in canonical form, always strictly below the modulus.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct KoalaBear(u32);

impl KoalaBear {
	pub const MODULUS: u32 = (1 << 31) - (1 << 24) + 1;

	/// 3 generates the full multiplicative group of the field.
	pub const MULTIPLICATIVE_GENERATOR: Self = Self(3);

	pub const fn new(val: u32) -> Self {
		Self(val % Self::MODULUS)
	}

	pub const fn to_canonical_u32(self) -> u32 {
		self.0
	}
}

impl Add for KoalaBear {
	type Output = Self;

	fn add(self, rhs: Self) -> Self {
		// Both operands are canonical, so the u32 sum cannot overflow.
		let mut sum = self.0 + rhs.0;
		if sum >= Self::MODULUS {
			sum -= Self::MODULUS;
		}
		Self(sum)
	}
}

impl Sub for KoalaBear {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self {
		if self.0 >= rhs.0 {
			Self(self.0 - rhs.0)
		} else {
			Self(self.0 + (Self::MODULUS - rhs.0))
		}
	}
}

impl Mul for KoalaBear {
	type Output = Self;

	fn mul(self, rhs: Self) -> Self {
		Self(((self.0 as u64 * rhs.0 as u64) % Self::MODULUS as u64) as u32)
	}
}

impl Neg for KoalaBear {
	type Output = Self;

	fn neg(self) -> Self {
		if self.0 == 0 {
			self
		} else {
			Self(Self::MODULUS - self.0)
		}
	}
}

impl AddAssign for KoalaBear {
	fn add_assign(&mut self, rhs: Self) {
		*self = *self + rhs;
	}
}

impl SubAssign for KoalaBear {
	fn sub_assign(&mut self, rhs: Self) {
		*self = *self - rhs;
	}
}

impl MulAssign for KoalaBear {
	fn mul_assign(&mut self, rhs: Self) {
		*self = *self * rhs;
	}
}

impl Sum for KoalaBear {
	fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.fold(Self::ZERO, Add::add)
	}
}

impl Product for KoalaBear {
	fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.fold(Self::ONE, Mul::mul)
	}
}

impl Display for KoalaBear {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Debug for KoalaBear {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		Display::fmt(self, f)
	}
}

impl Field for KoalaBear {
	const ZERO: Self = Self(0);
	const ONE: Self = Self(1);
	const N_BYTES: usize = 4;

	fn inverse(self) -> Option<Self> {
		if self.0 == 0 {
			None
		} else {
			Some(self.pow(Self::MODULUS as u64 - 2))
		}
	}

	fn from_u64(val: u64) -> Self {
		Self((val % Self::MODULUS as u64) as u32)
	}

	fn random(rng: &mut impl RngCore) -> Self {
		Self::from_u64(rng.next_u64())
	}

	fn append_canonical_bytes(&self, out: &mut Vec<u8>) {
		out.extend_from_slice(&self.0.to_be_bytes());
	}
}

impl TwoAdicField for KoalaBear {
	const TWO_ADICITY: usize = 24;

	fn two_adic_generator(bits: usize) -> Self {
		assert!(bits <= Self::TWO_ADICITY);
		Self::MULTIPLICATIVE_GENERATOR.pow((Self::MODULUS as u64 - 1) >> bits)
	}
}

impl SerializeBytes for KoalaBear {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), serialization::Error> {
		if write_buf.remaining_mut() < Self::N_BYTES {
			return Err(serialization::Error::WriteBufferFull);
		}
		write_buf.put_u32(self.0);
		Ok(())
	}
}

impl DeserializeBytes for KoalaBear {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, serialization::Error> {
		if read_buf.remaining() < Self::N_BYTES {
			return Err(serialization::Error::NotEnoughBytes);
		}
		let val = read_buf.get_u32();
		if val >= Self::MODULUS {
			return Err(serialization::Error::NotCanonical);
		}
		Ok(Self(val))
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	#[test]
	fn test_modulus_structure() {
		assert_eq!(KoalaBear::MODULUS, 2130706433);
		assert_eq!((KoalaBear::MODULUS - 1) % (1 << 24), 0);
		assert_eq!((KoalaBear::MODULUS as u64 - 1) >> 24, 127);
	}

	#[test]
	fn test_two_adic_generator_orders() {
		for bits in 0..=8 {
			let omega = KoalaBear::two_adic_generator(bits);
			assert_eq!(omega.pow(1 << bits), KoalaBear::ONE);
			if bits > 0 {
				assert_ne!(omega.pow(1 << (bits - 1)), KoalaBear::ONE);
			}
		}
	}

	#[test]
	fn test_inverse_of_zero() {
		assert_eq!(KoalaBear::ZERO.inverse(), None);
	}

	proptest! {
		#[test]
		fn prop_inverse_roundtrip(raw in 1u32..KoalaBear::MODULUS) {
			let val = KoalaBear::new(raw);
			let inv = val.inverse().unwrap();
			prop_assert_eq!(val * inv, KoalaBear::ONE);
		}

		#[test]
		fn prop_add_sub_roundtrip(a in 0u32..KoalaBear::MODULUS, b in 0u32..KoalaBear::MODULUS) {
			let (a, b) = (KoalaBear::new(a), KoalaBear::new(b));
			prop_assert_eq!(a + b - b, a);
			prop_assert_eq!(a - b + b, a);
		}

		#[test]
		fn prop_mul_matches_u64_reduction(a in 0u32..KoalaBear::MODULUS, b in 0u32..KoalaBear::MODULUS) {
			let expected = ((a as u64 * b as u64) % KoalaBear::MODULUS as u64) as u32;
			prop_assert_eq!((KoalaBear::new(a) * KoalaBear::new(b)).to_canonical_u32(), expected);
		}

		#[test]
		fn prop_serialization_roundtrip(raw in 0u32..KoalaBear::MODULUS) {
			let val = KoalaBear::new(raw);
			let mut buf = Vec::new();
			val.serialize(&mut buf).unwrap();
			prop_assert_eq!(KoalaBear::deserialize(buf.as_slice()).unwrap(), val);
		}
	}
}
