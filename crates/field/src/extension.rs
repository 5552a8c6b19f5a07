// Copyright 2024-2025 Irreducible Inc.

use std::{
	fmt::{self, Debug, Display},
	iter::{Product, Sum},
	ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

use bytes::{Buf, BufMut};
use rand::RngCore;
use vortex_utils::serialization::{self, DeserializeBytes, SerializeBytes};

use crate::{
	field::{ExtensionOf, Field, TwoAdicField},
	koala_bear::KoalaBear,
};

/// Binomial non-residue: `X^4 - 3` is irreducible over [`KoalaBear`].
const W: KoalaBear = KoalaBear::new(3);

/// `p^4 - 2`, the inversion exponent of the extension field.
const INVERSION_EXPONENT: u128 = (KoalaBear::MODULUS as u128).pow(4) - 2;

/// Degree-4 binomial extension of [`KoalaBear`], `F_p[X] / (X^4 - 3)`.
///
/// Coefficients are stored low degree first. The extension only exposes the
/// base field's two-adic subgroups, which keeps base- and extension-field
/// transforms interoperable on shared domains.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KoalaBearExt4([KoalaBear; 4]);

impl KoalaBearExt4 {
	pub const fn new(coefficients: [KoalaBear; 4]) -> Self {
		Self(coefficients)
	}

	pub const fn coefficients(&self) -> &[KoalaBear; 4] {
		&self.0
	}

	fn pow_u128(self, exp: u128) -> Self {
		let mut acc = Self::ONE;
		let mut base = self;
		let mut exp = exp;
		while exp != 0 {
			if exp & 1 == 1 {
				acc *= base;
			}
			base = base.square();
			exp >>= 1;
		}
		acc
	}
}

impl From<KoalaBear> for KoalaBearExt4 {
	fn from(val: KoalaBear) -> Self {
		Self([val, KoalaBear::ZERO, KoalaBear::ZERO, KoalaBear::ZERO])
	}
}

impl Add for KoalaBearExt4 {
	type Output = Self;

	fn add(self, rhs: Self) -> Self {
		Self(std::array::from_fn(|i| self.0[i] + rhs.0[i]))
	}
}

impl Sub for KoalaBearExt4 {
	type Output = Self;

	fn sub(self, rhs: Self) -> Self {
		Self(std::array::from_fn(|i| self.0[i] - rhs.0[i]))
	}
}

impl Mul for KoalaBearExt4 {
	type Output = Self;

	fn mul(self, rhs: Self) -> Self {
		// Schoolbook product in F_p[X], then fold X^4 = W back down.
		let mut prod = [KoalaBear::ZERO; 7];
		for i in 0..4 {
			for j in 0..4 {
				prod[i + j] += self.0[i] * rhs.0[j];
			}
		}
		for k in 4..7 {
			let carry = prod[k] * W;
			prod[k - 4] += carry;
		}
		Self([prod[0], prod[1], prod[2], prod[3]])
	}
}

impl Neg for KoalaBearExt4 {
	type Output = Self;

	fn neg(self) -> Self {
		Self(std::array::from_fn(|i| -self.0[i]))
	}
}

impl Add<KoalaBear> for KoalaBearExt4 {
	type Output = Self;

	fn add(mut self, rhs: KoalaBear) -> Self {
		self.0[0] += rhs;
		self
	}
}

impl Sub<KoalaBear> for KoalaBearExt4 {
	type Output = Self;

	fn sub(mut self, rhs: KoalaBear) -> Self {
		self.0[0] -= rhs;
		self
	}
}

impl Mul<KoalaBear> for KoalaBearExt4 {
	type Output = Self;

	fn mul(self, rhs: KoalaBear) -> Self {
		Self(std::array::from_fn(|i| self.0[i] * rhs))
	}
}

impl AddAssign for KoalaBearExt4 {
	fn add_assign(&mut self, rhs: Self) {
		*self = *self + rhs;
	}
}

impl SubAssign for KoalaBearExt4 {
	fn sub_assign(&mut self, rhs: Self) {
		*self = *self - rhs;
	}
}

impl MulAssign for KoalaBearExt4 {
	fn mul_assign(&mut self, rhs: Self) {
		*self = *self * rhs;
	}
}

impl Sum for KoalaBearExt4 {
	fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.fold(Self::ZERO, Add::add)
	}
}

impl Product for KoalaBearExt4 {
	fn product<I: Iterator<Item = Self>>(iter: I) -> Self {
		iter.fold(Self::ONE, Mul::mul)
	}
}

impl Display for KoalaBearExt4 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} + {}*x + {}*x^2 + {}*x^3", self.0[0], self.0[1], self.0[2], self.0[3])
	}
}

impl Debug for KoalaBearExt4 {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		Display::fmt(self, f)
	}
}

impl Field for KoalaBearExt4 {
	const ZERO: Self = Self([KoalaBear::new(0); 4]);
	const ONE: Self =
		Self([KoalaBear::new(1), KoalaBear::new(0), KoalaBear::new(0), KoalaBear::new(0)]);
	const N_BYTES: usize = 16;

	fn inverse(self) -> Option<Self> {
		if self == Self::ZERO {
			None
		} else {
			Some(self.pow_u128(INVERSION_EXPONENT))
		}
	}

	fn from_u64(val: u64) -> Self {
		KoalaBear::from_u64(val).into()
	}

	fn random(rng: &mut impl RngCore) -> Self {
		Self(std::array::from_fn(|_| KoalaBear::random(rng)))
	}

	fn append_canonical_bytes(&self, out: &mut Vec<u8>) {
		for coefficient in &self.0 {
			coefficient.append_canonical_bytes(out);
		}
	}
}

impl TwoAdicField for KoalaBearExt4 {
	// Capped at the base field's two-adicity: all domains used by the
	// commitment scheme are shared between the base field and the extension.
	const TWO_ADICITY: usize = KoalaBear::TWO_ADICITY;

	fn two_adic_generator(bits: usize) -> Self {
		KoalaBear::two_adic_generator(bits).into()
	}
}

impl ExtensionOf<KoalaBear> for KoalaBearExt4 {
	const DEGREE: usize = 4;

	fn from_base_slice(coefficients: &[KoalaBear]) -> Self {
		assert_eq!(coefficients.len(), 4);
		Self(std::array::from_fn(|i| coefficients[i]))
	}

	fn base_slice(&self) -> &[KoalaBear] {
		&self.0
	}
}

impl SerializeBytes for KoalaBearExt4 {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), serialization::Error> {
		for coefficient in &self.0 {
			coefficient.serialize(&mut write_buf)?;
		}
		Ok(())
	}
}

impl DeserializeBytes for KoalaBearExt4 {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, serialization::Error> {
		let mut coefficients = [KoalaBear::ZERO; 4];
		for coefficient in &mut coefficients {
			*coefficient = KoalaBear::deserialize(&mut read_buf)?;
		}
		Ok(Self(coefficients))
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rand::{rngs::StdRng, SeedableRng};

	use super::*;

	fn x() -> KoalaBearExt4 {
		KoalaBearExt4::new([KoalaBear::ZERO, KoalaBear::ONE, KoalaBear::ZERO, KoalaBear::ZERO])
	}

	#[test]
	fn test_reduction_constant() {
		// X * X^3 = X^4 must reduce to W.
		assert_eq!(x() * x().square(), x().square() * x());
		assert_eq!(x().square().square(), W.into());
	}

	#[test]
	fn test_mixed_base_operations() {
		let mut rng = StdRng::seed_from_u64(0);
		let a = KoalaBearExt4::random(&mut rng);
		let b = KoalaBear::random(&mut rng);

		assert_eq!(a * b, a * KoalaBearExt4::from(b));
		assert_eq!(a + b, a + KoalaBearExt4::from(b));
		assert_eq!(a - b, a - KoalaBearExt4::from(b));
	}

	#[test]
	fn test_inverse_of_zero() {
		assert_eq!(KoalaBearExt4::ZERO.inverse(), None);
	}

	proptest! {
		#[test]
		fn prop_inverse_roundtrip(seed in any::<u64>()) {
			let mut rng = StdRng::seed_from_u64(seed);
			let val = KoalaBearExt4::random(&mut rng);
			prop_assume!(val != KoalaBearExt4::ZERO);
			prop_assert_eq!(val * val.inverse().unwrap(), KoalaBearExt4::ONE);
		}

		#[test]
		fn prop_mul_is_commutative_and_associative(seed in any::<u64>()) {
			let mut rng = StdRng::seed_from_u64(seed);
			let a = KoalaBearExt4::random(&mut rng);
			let b = KoalaBearExt4::random(&mut rng);
			let c = KoalaBearExt4::random(&mut rng);
			prop_assert_eq!(a * b, b * a);
			prop_assert_eq!((a * b) * c, a * (b * c));
		}

		#[test]
		fn prop_distributivity(seed in any::<u64>()) {
			let mut rng = StdRng::seed_from_u64(seed);
			let a = KoalaBearExt4::random(&mut rng);
			let b = KoalaBearExt4::random(&mut rng);
			let c = KoalaBearExt4::random(&mut rng);
			prop_assert_eq!(a * (b + c), a * b + a * c);
		}

		#[test]
		fn prop_serialization_roundtrip(seed in any::<u64>()) {
			let mut rng = StdRng::seed_from_u64(seed);
			let val = KoalaBearExt4::random(&mut rng);
			let mut buf = Vec::new();
			val.serialize(&mut buf).unwrap();
			prop_assert_eq!(KoalaBearExt4::deserialize(buf.as_slice()).unwrap(), val);
		}
	}
}
