// Copyright 2024-2025 Irreducible Inc.

use digest::{Digest, Output};
use vortex_field::Field;

/// Hashes one column of field elements through a fresh digest instance.
///
/// Hashers carry internal state; allocating one per call keeps concurrent
/// column hashing safe without sharing.
pub fn hash_column<F: Field, D: Digest>(column: &[F]) -> Output<D> {
	let mut bytes = Vec::with_capacity(column.len() * F::N_BYTES);
	for element in column {
		element.append_canonical_bytes(&mut bytes);
	}

	let mut hasher = D::new();
	Digest::update(&mut hasher, &bytes);
	hasher.finalize()
}

/// Folds a digest back into a single field element: the first eight bytes,
/// read big-endian, reduced into the field.
pub fn fold_digest<F: Field, D: Digest>(digest: &Output<D>) -> F {
	assert!(digest.len() >= 8, "digest must be at least 8 bytes");
	let mut word = [0u8; 8];
	word.copy_from_slice(&digest[..8]);
	F::from_u64(u64::from_be_bytes(word))
}
