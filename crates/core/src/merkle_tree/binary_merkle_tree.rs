// Copyright 2024-2025 Irreducible Inc.

use std::array;

use bytes::{Buf, BufMut};
use rayon::prelude::*;
use tracing::instrument;
use vortex_hash::PseudoCompressionFunction;
use vortex_utils::{
	bail,
	checked_arithmetics::checked_log_2,
	ensure,
	serialization::{self, DeserializeBytes, SerializeBytes},
};

use super::errors::{Error, VerificationError};

/// A binary Merkle tree over a power-of-two number of leaf digests.
#[derive(Debug, Clone)]
pub struct MerkleTree<D> {
	/// Base-2 logarithm of the number of leaves.
	log_len: usize,
	/// All nodes, arranged as a flattened array of layers with the root at
	/// the end.
	inner_nodes: Vec<D>,
}

/// A membership proof: the sibling path from a leaf to the root, along with
/// the position the proof was generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleProof<D> {
	/// Sibling digests, leaf layer first.
	pub siblings: Vec<D>,
	/// The leaf index the path belongs to.
	pub index: usize,
}

/// Builds the tree bottom-up, compressing each layer in parallel.
#[instrument("MerkleTree::build", skip_all, level = "debug")]
pub fn build<D, C>(compression: &C, leaves: Vec<D>) -> Result<MerkleTree<D>, Error>
where
	D: Clone + Send + Sync,
	C: PseudoCompressionFunction<D, 2> + Sync,
{
	ensure!(leaves.len().is_power_of_two(), Error::PowerOfTwoLengthRequired);

	let log_len = checked_log_2(leaves.len());
	let mut inner_nodes = leaves;
	inner_nodes.reserve((1 << (log_len + 1)) - 1 - inner_nodes.len());

	let mut layer_start = 0;
	let mut layer_len = 1 << log_len;
	while layer_len > 1 {
		let next_layer: Vec<D> = inner_nodes[layer_start..layer_start + layer_len]
			.par_chunks_exact(2)
			.map(|pair| compression.compress(array::from_fn(|i| pair[i].clone())))
			.collect();
		inner_nodes.extend(next_layer);
		layer_start += layer_len;
		layer_len /= 2;
	}

	Ok(MerkleTree {
		log_len,
		inner_nodes,
	})
}

impl<D: Clone> MerkleTree<D> {
	pub fn log_len(&self) -> usize {
		self.log_len
	}

	pub fn root(&self) -> D {
		self.inner_nodes.last().expect("the tree has at least one node").clone()
	}

	/// The membership proof for the given leaf index.
	pub fn branch(&self, index: usize) -> Result<MerkleProof<D>, Error> {
		if index >= 1 << self.log_len {
			bail!(Error::IndexOutOfRange {
				max: (1 << self.log_len) - 1,
			});
		}

		let mut siblings = Vec::with_capacity(self.log_len);
		let mut layer_start = 0;
		let mut layer_len = 1 << self.log_len;
		for depth in 0..self.log_len {
			let sibling = (index >> depth) ^ 1;
			siblings.push(self.inner_nodes[layer_start + sibling].clone());
			layer_start += layer_len;
			layer_len /= 2;
		}

		Ok(MerkleProof { siblings, index })
	}
}

/// Recomputes the path from `leaf` and checks it against `root`.
///
/// The proof's recorded position must equal `claimed_index`: a valid path
/// presented for the wrong position is rejected.
pub fn verify_proof<D, C>(
	compression: &C,
	proof: &MerkleProof<D>,
	leaf: D,
	root: &D,
	claimed_index: usize,
) -> Result<(), VerificationError>
where
	D: Clone + Eq,
	C: PseudoCompressionFunction<D, 2>,
{
	if proof.index != claimed_index {
		return Err(VerificationError::PositionMismatch);
	}

	let mut node = leaf;
	let mut index = proof.index;
	for sibling in &proof.siblings {
		node = if index & 1 == 0 {
			compression.compress([node, sibling.clone()])
		} else {
			compression.compress([sibling.clone(), node])
		};
		index >>= 1;
	}

	// A position beyond the tree base cannot be excused by a short path.
	if index != 0 {
		return Err(VerificationError::PositionMismatch);
	}

	if node == *root {
		Ok(())
	} else {
		Err(VerificationError::InvalidPath)
	}
}

impl<D: SerializeBytes> SerializeBytes for MerkleProof<D> {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), serialization::Error> {
		(self.index as u32).serialize(&mut write_buf)?;
		serialization::serialize_seq(&self.siblings, &mut write_buf)
	}
}

impl<D: DeserializeBytes> DeserializeBytes for MerkleProof<D> {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, serialization::Error> {
		let index = u32::deserialize(&mut read_buf)? as usize;
		let siblings = serialization::deserialize_seq(&mut read_buf)?;
		Ok(Self { siblings, index })
	}
}
