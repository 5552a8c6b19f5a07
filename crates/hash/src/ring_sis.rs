// Copyright 2024-2025 Irreducible Inc.

//! Ring-SIS column hashing over `R = F_p[X]/(X^d + 1)`.
//!
//! A column of field elements is decomposed into short limbs, the limbs are
//! grouped into ring elements, and the digest is the accumulated negacyclic
//! product against the public key polynomials. Collision resistance reduces
//! to the hardness of finding short vectors in the lattice spanned by the
//! key; binding only needs the key to be public and fixed, so it is derived
//! deterministically from a published seed.

use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use vortex_field::{Field, KoalaBear};
use vortex_utils::{bail, ensure};

use super::error::Error;

/// Seed of the published hashing key.
const KEY_SEED: [u8; 32] = *b"VORTEX-RING-SIS-KEY-SEED-V1\0\0\0\0\0";

/// Geometry of the ring-SIS instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SisParams {
	/// Base-2 log of the limb bound; limbs carry this many bits.
	pub log_two_bound: usize,
	/// Base-2 log of the ring degree `d`.
	pub log_two_degree: usize,
}

/// The standard instance: 16-bit limbs over `F_p[X]/(X^64 + 1)`.
pub const SIS_STD_PARAMS: SisParams = SisParams {
	log_two_bound: 16,
	log_two_degree: 6,
};

impl SisParams {
	pub const fn degree(&self) -> usize {
		1 << self.log_two_degree
	}

	/// Limbs needed to cover one canonical 32-bit field element encoding.
	pub const fn limbs_per_element(&self) -> usize {
		32usize.div_ceil(self.log_two_bound)
	}
}

/// A ring-SIS hashing key sized for a maximum input length.
#[derive(Debug, Clone)]
pub struct SisKey {
	params: SisParams,
	max_nb_field_elements: usize,
	/// Key polynomials in coefficient form, each of length `degree`.
	polynomials: Vec<Vec<KoalaBear>>,
}

impl SisKey {
	/// Derives the public key supporting inputs of up to
	/// `max_nb_field_elements` field elements.
	pub fn generate(params: SisParams, max_nb_field_elements: usize) -> Result<Self, Error> {
		if params.log_two_bound == 0 || params.log_two_bound > 32 {
			bail!(Error::InvalidLimbBound { log_two_bound: params.log_two_bound });
		}

		let degree = params.degree();
		let max_limbs = max_nb_field_elements.max(1) * params.limbs_per_element();
		let nb_polynomials = max_limbs.div_ceil(degree);

		let mut rng = ChaCha12Rng::from_seed(KEY_SEED);
		let polynomials = (0..nb_polynomials)
			.map(|_| (0..degree).map(|_| KoalaBear::random(&mut rng)).collect())
			.collect();

		Ok(Self {
			params,
			max_nb_field_elements,
			polynomials,
		})
	}

	pub fn params(&self) -> SisParams {
		self.params
	}

	/// Length of a digest block, in field elements.
	pub fn digest_len(&self) -> usize {
		self.params.degree()
	}

	pub fn max_nb_field_elements(&self) -> usize {
		self.max_nb_field_elements
	}

	/// Hashes up to `max_nb_field_elements` field elements into one digest
	/// block of `digest_len()` field elements.
	///
	/// Shorter inputs hash as if zero-padded to the maximum length: zero
	/// limbs contribute nothing to the accumulated products, so the digest
	/// of a column does not depend on the key capacity headroom.
	pub fn hash(&self, input: &[KoalaBear]) -> Result<Vec<KoalaBear>, Error> {
		ensure!(
			input.len() <= self.max_nb_field_elements,
			Error::InputExceedsKeyCapacity {
				actual: input.len(),
				max: self.max_nb_field_elements,
			}
		);

		let limbs = self.decompose(input);
		let degree = self.params.degree();

		let mut digest = vec![KoalaBear::ZERO; degree];
		for (polynomial, limb_chunk) in self.polynomials.iter().zip(limbs.chunks(degree)) {
			negacyclic_mul_acc(&mut digest, polynomial, limb_chunk);
		}
		Ok(digest)
	}

	/// Splits every element's canonical encoding into limbs of
	/// `log_two_bound` bits, least-significant limb first.
	fn decompose(&self, input: &[KoalaBear]) -> Vec<KoalaBear> {
		let limbs_per_element = self.params.limbs_per_element();
		let mask = if self.params.log_two_bound == 32 {
			u32::MAX
		} else {
			(1u32 << self.params.log_two_bound) - 1
		};

		let mut limbs = Vec::with_capacity(input.len() * limbs_per_element);
		for element in input {
			let raw = element.to_canonical_u32();
			for limb_index in 0..limbs_per_element {
				let limb = (raw >> (limb_index * self.params.log_two_bound)) & mask;
				limbs.push(KoalaBear::new(limb));
			}
		}
		limbs
	}
}

/// `acc += a * b` in `F_p[X]/(X^d + 1)`, where `b` may be shorter than `d`.
fn negacyclic_mul_acc(acc: &mut [KoalaBear], a: &[KoalaBear], b: &[KoalaBear]) {
	let degree = acc.len();
	for (i, &a_i) in a.iter().enumerate() {
		for (j, &b_j) in b.iter().enumerate() {
			let k = i + j;
			if k < degree {
				acc[k] += a_i * b_j;
			} else {
				// X^d = -1
				acc[k - degree] -= a_i * b_j;
			}
		}
	}
}
