// Copyright 2024-2025 Irreducible Inc.

use crate::field::Field;

/// Inverts every element of `values` with Montgomery's trick: one field
/// inversion plus three multiplications per element.
///
/// Returns `None` when any input is zero.
pub fn batch_invert<F: Field>(values: &[F]) -> Option<Vec<F>> {
	if values.is_empty() {
		return Some(Vec::new());
	}

	// Prefix products: prefixes[i] = values[0] * ... * values[i].
	let mut prefixes = Vec::with_capacity(values.len());
	let mut acc = F::ONE;
	for &val in values {
		acc *= val;
		prefixes.push(acc);
	}

	// A zero anywhere zeroes the total product.
	let mut inv_acc = prefixes.last().copied().expect("values is non-empty").inverse()?;

	let mut result = vec![F::ZERO; values.len()];
	for i in (1..values.len()).rev() {
		result[i] = inv_acc * prefixes[i - 1];
		inv_acc *= values[i];
	}
	result[0] = inv_acc;

	Some(result)
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rand::{rngs::StdRng, SeedableRng};

	use super::*;
	use crate::{koala_bear::KoalaBear, KoalaBearExt4};

	#[test]
	fn test_batch_invert_empty() {
		assert_eq!(batch_invert::<KoalaBear>(&[]), Some(Vec::new()));
	}

	#[test]
	fn test_batch_invert_rejects_zero() {
		let values = [KoalaBear::new(7), KoalaBear::ZERO, KoalaBear::new(12)];
		assert_eq!(batch_invert(&values), None);
	}

	proptest! {
		#[test]
		fn prop_batch_invert_matches_individual(seed in any::<u64>(), len in 1usize..40) {
			let mut rng = StdRng::seed_from_u64(seed);
			let values: Vec<KoalaBearExt4> = (0..len)
				.map(|_| KoalaBearExt4::random(&mut rng))
				.filter(|v| *v != KoalaBearExt4::ZERO)
				.collect();
			prop_assume!(!values.is_empty());

			let inverses = batch_invert(&values).unwrap();
			for (val, inv) in values.iter().zip(&inverses) {
				prop_assert_eq!(val.inverse().unwrap(), *inv);
			}
		}
	}
}
