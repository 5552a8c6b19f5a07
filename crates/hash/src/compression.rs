// Copyright 2024-2025 Irreducible Inc.
// Copyright (c) 2024 The Plonky3 Authors

//! The compression interface is taken from [p3_symmetric](https://github.com/Plonky3/Plonky3/blob/main/symmetric/src/compression.rs) in [Plonky3].
//!
//! [Plonky3]: <https://github.com/plonky3/plonky3>

use std::marker::PhantomData;

use digest::{Digest, Output};

/// An `N`-to-1 compression function collision-resistant in a hash tree
/// setting.
///
/// It may not be collision-resistant in general; it only needs to be
/// collision-resistant in hash-tree like settings where the preimage of a
/// non-leaf node must consist of compression outputs.
pub trait PseudoCompressionFunction<T, const N: usize>: Clone {
	fn compress(&self, input: [T; N]) -> T;
}

/// Two-to-one compression that rehashes the concatenation of two digests
/// through a fresh instance of `D`.
pub struct DigestCompression<D>(PhantomData<fn() -> D>);

impl<D> DigestCompression<D> {
	pub const fn new() -> Self {
		Self(PhantomData)
	}
}

impl<D> Default for DigestCompression<D> {
	fn default() -> Self {
		Self::new()
	}
}

impl<D> Clone for DigestCompression<D> {
	fn clone(&self) -> Self {
		Self::new()
	}
}

impl<D> std::fmt::Debug for DigestCompression<D> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str("DigestCompression")
	}
}

impl<D: Digest> PseudoCompressionFunction<Output<D>, 2> for DigestCompression<D> {
	fn compress(&self, [left, right]: [Output<D>; 2]) -> Output<D> {
		let mut hasher = D::new();
		Digest::update(&mut hasher, &left);
		Digest::update(&mut hasher, &right);
		hasher.finalize()
	}
}

#[cfg(test)]
mod tests {
	use sha2::Sha256;

	use super::*;

	#[test]
	fn test_compress_is_order_sensitive() {
		let compression = DigestCompression::<Sha256>::new();
		let left = Sha256::digest(b"left");
		let right = Sha256::digest(b"right");

		assert_eq!(
			compression.compress([left.clone(), right.clone()]),
			compression.compress([left.clone(), right.clone()])
		);
		assert_ne!(compression.compress([left.clone(), right.clone()]), compression.compress([right, left]));
	}
}
