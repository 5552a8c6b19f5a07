// Copyright 2024-2025 Irreducible Inc.

use bytes::{Buf, BufMut};
use digest::{Digest, Output};
use rayon::prelude::*;
use tracing::instrument;
use vortex_field::KoalaBear;
use vortex_hash::{fold_digest, hash_column};
use vortex_utils::{
	bail,
	serialization::{self, DeserializeBytes, SerializeBytes},
};

use super::{errors::Error, params::Params};
use crate::{
	merkle_tree::{self, MerkleTree},
	row::RowVector,
};

/// The Reed–Solomon encoding of every committed row.
///
/// Retained by the committer between the commit and open rounds; the
/// disclosed sub-columns are read straight out of it, without recomputation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedMatrix {
	rows: Vec<Vec<KoalaBear>>,
}

impl EncodedMatrix {
	pub fn nb_rows(&self) -> usize {
		self.rows.len()
	}

	pub fn nb_encoded_columns(&self) -> usize {
		self.rows.first().map_or(0, Vec::len)
	}

	pub fn rows(&self) -> &[Vec<KoalaBear>] {
		&self.rows
	}

	/// One entry per committed row, taken at the given encoded column index.
	pub fn column(&self, index: usize) -> Vec<KoalaBear> {
		self.rows.iter().map(|row| row[index]).collect()
	}
}

/// The public output of a commit round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Commitment<D> {
	/// Vanilla mode: the concatenated column digests, one block per encoded
	/// column.
	Columns(Vec<KoalaBear>),
	/// Merkle mode: the root of the tree over the column digests.
	MerkleRoot(D),
}

/// Everything a commit round produces: the public commitment and the
/// prover-side state required to answer the opening round.
#[derive(Debug, Clone)]
pub struct Committed<D> {
	pub matrix: EncodedMatrix,
	pub commitment: Commitment<D>,
	/// Present in Merkle mode only; needed to extract membership proofs.
	pub tree: Option<MerkleTree<D>>,
}

impl<H: Digest> Params<H> {
	/// Commits to a batch of rows: Reed–Solomon encodes every row, hashes
	/// every column of the encoded matrix, and in Merkle mode aggregates the
	/// column digests under a single root.
	#[instrument(skip_all, name = "vortex::commit", level = "debug")]
	pub fn commit(&self, rows: &[RowVector<KoalaBear>]) -> Result<Committed<Output<H>>, Error> {
		self.check_rows(rows)?;
		if rows.len() > self.max_nb_rows() {
			bail!(Error::TooManyRows {
				actual: rows.len(),
				max: self.max_nb_rows(),
			});
		}

		let matrix = self.encode_rows(rows)?;

		let (commitment, tree) = if self.is_merkle_mode() {
			let leaves = (0..matrix.nb_encoded_columns())
				.into_par_iter()
				.map(|index| self.column_leaf(&matrix.column(index)))
				.collect::<Result<Vec<_>, _>>()?;
			let tree = merkle_tree::build(self.compression(), leaves)?;
			(Commitment::MerkleRoot(tree.root()), Some(tree))
		} else {
			let digests = (0..matrix.nb_encoded_columns())
				.into_par_iter()
				.map(|index| self.column_digest(&matrix.column(index)))
				.collect::<Result<Vec<_>, _>>()?;
			(Commitment::Columns(digests.concat()), None)
		};

		Ok(Committed {
			matrix,
			commitment,
			tree,
		})
	}

	fn encode_rows(&self, rows: &[RowVector<KoalaBear>]) -> Result<EncodedMatrix, Error> {
		let rows = rows
			.par_iter()
			.map(|row| match row {
				// A constant row encodes to a constant codeword; skip the
				// transforms entirely.
				RowVector::Constant { value, .. } => {
					Ok(vec![*value; self.nb_encoded_columns()])
				}
				row => self.code().encode(&row.to_dense()).map_err(Error::from),
			})
			.collect::<Result<Vec<_>, _>>()?;
		Ok(EncodedMatrix { rows })
	}

	/// The column digest in vanilla mode: a full lattice digest block, or a
	/// single folded element under the SIS replacement.
	pub(super) fn column_digest(&self, column: &[KoalaBear]) -> Result<Vec<KoalaBear>, Error> {
		match self.sis_key() {
			Some(key) => Ok(key.hash(column)?),
			None => Ok(vec![fold_digest::<KoalaBear, H>(&hash_column::<_, H>(column))]),
		}
	}

	/// The Merkle leaf of a column: the lattice digest block re-hashed into
	/// one digest, or the raw generic digest of the column.
	pub(super) fn column_leaf(&self, column: &[KoalaBear]) -> Result<Output<H>, Error> {
		match self.sis_key() {
			Some(key) => Ok(hash_column::<_, H>(&key.hash(column)?)),
			None => Ok(hash_column::<_, H>(column)),
		}
	}
}

impl<D: SerializeBytes> SerializeBytes for Commitment<D> {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), serialization::Error> {
		match self {
			Self::Columns(columns) => {
				0u8.serialize(&mut write_buf)?;
				columns.serialize(&mut write_buf)
			}
			Self::MerkleRoot(root) => {
				1u8.serialize(&mut write_buf)?;
				root.serialize(&mut write_buf)
			}
		}
	}
}

impl<D: DeserializeBytes> DeserializeBytes for Commitment<D> {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, serialization::Error> {
		match u8::deserialize(&mut read_buf)? {
			0 => Ok(Self::Columns(Vec::deserialize(&mut read_buf)?)),
			1 => Ok(Self::MerkleRoot(D::deserialize(&mut read_buf)?)),
			index => Err(serialization::Error::UnknownEnumVariant {
				name: "Commitment",
				index,
			}),
		}
	}
}
