// Copyright 2024-2025 Irreducible Inc.

use bytes::{Buf, BufMut};
use vortex_field::{KoalaBear, KoalaBearExt4};
use vortex_utils::{
	bail,
	serialization::{self, DeserializeBytes, SerializeBytes},
};

use super::{commit::EncodedMatrix, errors::Error};
use crate::merkle_tree::{MerkleProof, MerkleTree};

/// An opening proof, produced in two steps: [`Params::open`] fills the
/// encoded linear combination, and [`OpeningProof::complete`] discloses the
/// verifier-chosen columns.
///
/// [`Params::open`]: super::Params::open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningProof<D> {
	/// Reed–Solomon encoding of the random linear combination of every
	/// committed row.
	pub linear_combination: Vec<KoalaBearExt4>,
	/// The disclosed sub-columns: per commitment, per chosen entry, one field
	/// element per committed row.
	pub columns: Vec<Vec<Vec<KoalaBear>>>,
	/// One membership proof per commitment per chosen entry, in Merkle mode.
	pub merkle_proofs: Option<Vec<Vec<MerkleProof<D>>>>,
}

impl<D> OpeningProof<D> {
	pub(super) fn new(linear_combination: Vec<KoalaBearExt4>) -> Self {
		Self {
			linear_combination,
			columns: Vec::new(),
			merkle_proofs: None,
		}
	}
}

impl<D: Clone> OpeningProof<D> {
	/// Fills in the raw sub-columns at the verifier-chosen indices, read
	/// straight out of the matrices retained from the commit round, and
	/// attaches one Merkle membership proof per commitment per index when
	/// trees are supplied.
	pub fn complete(
		&mut self,
		entry_list: &[usize],
		matrices: &[EncodedMatrix],
		trees: Option<&[MerkleTree<D>]>,
	) -> Result<(), Error> {
		if matrices.is_empty() {
			bail!(Error::NoCommittedMatrices);
		}
		if entry_list.is_empty() {
			bail!(Error::EmptyEntryList);
		}
		if let Some(trees) = trees {
			if trees.len() != matrices.len() {
				bail!(Error::MatrixTreeArityMismatch {
					matrices: matrices.len(),
					trees: trees.len(),
				});
			}
		}

		let mut columns = Vec::with_capacity(matrices.len());
		for matrix in matrices {
			let mut disclosed = Vec::with_capacity(entry_list.len());
			for &entry in entry_list {
				if entry >= matrix.nb_encoded_columns() {
					bail!(Error::EntryOutOfRange {
						entry,
						max: matrix.nb_encoded_columns(),
					});
				}
				disclosed.push(matrix.column(entry));
			}
			columns.push(disclosed);
		}
		self.columns = columns;

		self.merkle_proofs = match trees {
			Some(trees) => {
				let mut proofs = Vec::with_capacity(trees.len());
				for tree in trees {
					let branches = entry_list
						.iter()
						.map(|&entry| tree.branch(entry))
						.collect::<Result<Vec<_>, _>>()?;
					proofs.push(branches);
				}
				Some(proofs)
			}
			None => None,
		};

		Ok(())
	}
}

impl<D: SerializeBytes> SerializeBytes for OpeningProof<D> {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), serialization::Error> {
		self.linear_combination.serialize(&mut write_buf)?;
		self.columns.serialize(&mut write_buf)?;
		match &self.merkle_proofs {
			Some(proofs) => {
				1u8.serialize(&mut write_buf)?;
				proofs.serialize(&mut write_buf)
			}
			None => 0u8.serialize(&mut write_buf),
		}
	}
}

impl<D: DeserializeBytes> DeserializeBytes for OpeningProof<D> {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, serialization::Error> {
		let linear_combination = Vec::deserialize(&mut read_buf)?;
		let columns = Vec::deserialize(&mut read_buf)?;
		let merkle_proofs = match u8::deserialize(&mut read_buf)? {
			0 => None,
			1 => Some(Vec::deserialize(&mut read_buf)?),
			index => {
				return Err(serialization::Error::UnknownEnumVariant {
					name: "OpeningProof",
					index,
				})
			}
		};
		Ok(Self {
			linear_combination,
			columns,
			merkle_proofs,
		})
	}
}
