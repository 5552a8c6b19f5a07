// Copyright 2024-2025 Irreducible Inc.

use digest::Digest;
use vortex_field::{KoalaBear, KoalaBearExt4};
use vortex_hash::{DigestCompression, SisKey, SisParams};
use vortex_ntt::ReedSolomonCode;
use vortex_utils::{bail, checked_arithmetics::checked_log_2};

use super::errors::Error;
use crate::row::RowVector;

/// Engine configuration for one proving session.
///
/// `H` is the generic collision-resistant hash: it hashes columns in no-SIS
/// mode and builds Merkle nodes in Merkle mode. Geometry and hash selection
/// are fixed at construction; the two builder-style mutators
/// ([`Params::with_merkle_mode`], [`Params::remove_sis`]) must be applied
/// before the first commit.
#[derive(Debug)]
pub struct Params<H: Digest> {
	blow_up_factor: usize,
	nb_columns: usize,
	max_nb_rows: usize,
	sis_key: Option<SisKey>,
	merkle_mode: bool,
	code: ReedSolomonCode<KoalaBear>,
	code_ext: ReedSolomonCode<KoalaBearExt4>,
	compression: DigestCompression<H>,
}

impl<H: Digest> Params<H> {
	pub fn new(
		blow_up_factor: usize,
		nb_columns: usize,
		max_nb_rows: usize,
		sis_params: SisParams,
	) -> Result<Self, Error> {
		if nb_columns == 0 || !nb_columns.is_power_of_two() {
			bail!(Error::InvalidColumnCount { actual: nb_columns });
		}
		if blow_up_factor < 2 || !blow_up_factor.is_power_of_two() {
			bail!(Error::InvalidBlowUpFactor { actual: blow_up_factor });
		}
		if max_nb_rows == 0 {
			bail!(Error::ZeroRowCapacity);
		}

		let log_dim = checked_log_2(nb_columns);
		let log_inv_rate = checked_log_2(blow_up_factor);
		let code = ReedSolomonCode::new(log_dim, log_inv_rate)?;
		let code_ext = ReedSolomonCode::new(log_dim, log_inv_rate)?;
		let sis_key = SisKey::generate(sis_params, max_nb_rows)?;

		Ok(Self {
			blow_up_factor,
			nb_columns,
			max_nb_rows,
			sis_key: Some(sis_key),
			merkle_mode: false,
			code,
			code_ext,
			compression: DigestCompression::new(),
		})
	}

	/// Switches commitments to a single Merkle root over the column digests.
	pub fn with_merkle_mode(mut self) -> Self {
		self.merkle_mode = true;
		self
	}

	/// Discards the lattice key and hashes columns with `H` instead.
	pub fn remove_sis(mut self) -> Self {
		self.sis_key = None;
		self
	}

	/// Whether the lattice hash has been replaced by the generic hash.
	pub fn has_sis_replacement(&self) -> bool {
		self.sis_key.is_none()
	}

	pub fn is_merkle_mode(&self) -> bool {
		self.merkle_mode
	}

	pub fn blow_up_factor(&self) -> usize {
		self.blow_up_factor
	}

	pub fn nb_columns(&self) -> usize {
		self.nb_columns
	}

	pub fn max_nb_rows(&self) -> usize {
		self.max_nb_rows
	}

	/// Number of columns of the encoded matrix.
	pub fn nb_encoded_columns(&self) -> usize {
		self.nb_columns * self.blow_up_factor
	}

	/// Field elements per column digest in vanilla mode: a full lattice
	/// digest block, or a single folded element under the SIS replacement.
	pub fn column_digest_len(&self) -> usize {
		self.sis_key.as_ref().map_or(1, SisKey::digest_len)
	}

	pub fn code(&self) -> &ReedSolomonCode<KoalaBear> {
		&self.code
	}

	pub fn code_ext(&self) -> &ReedSolomonCode<KoalaBearExt4> {
		&self.code_ext
	}

	pub(super) fn sis_key(&self) -> Option<&SisKey> {
		self.sis_key.as_ref()
	}

	pub(super) fn compression(&self) -> &DigestCompression<H> {
		&self.compression
	}

	/// Shared precondition of commit and open.
	pub(super) fn check_rows(&self, rows: &[RowVector<KoalaBear>]) -> Result<(), Error> {
		if rows.is_empty() {
			bail!(Error::NoRows);
		}
		for (i, row) in rows.iter().enumerate() {
			if row.len() != self.nb_columns {
				bail!(Error::RowLengthMismatch {
					row: i,
					expected: self.nb_columns,
					actual: row.len(),
				});
			}
		}
		Ok(())
	}
}
