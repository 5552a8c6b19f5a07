// Copyright 2024-2025 Irreducible Inc.

use digest::{Digest, Output};
use rayon::prelude::*;
use tracing::instrument;
use vortex_field::{Field, KoalaBear, KoalaBearExt4};

use super::{errors::Error, params::Params, proof::OpeningProof};
use crate::row::RowVector;

impl<H: Digest> Params<H> {
	/// Collapses every committed row into one random linear combination
	/// `Σ_k coin^k · row_k` and Reed–Solomon encodes it over the extension
	/// field.
	///
	/// `rows` is the concatenation of the rows of every commitment batched
	/// into the proof, in commitment order; the verifier reconstructs the
	/// same coefficient powers from its claim lists. The returned proof still
	/// has to be completed with the disclosed columns once the verifier has
	/// chosen its entries, via [`OpeningProof::complete`].
	#[instrument(skip_all, name = "vortex::open", level = "debug")]
	pub fn open(
		&self,
		rows: &[RowVector<KoalaBear>],
		random_coin: KoalaBearExt4,
	) -> Result<OpeningProof<Output<H>>, Error> {
		self.check_rows(rows)?;

		// Horner per column position, backwards over the rows; positions are
		// independent, so the column range parallelizes freely.
		let combination: Vec<KoalaBearExt4> = (0..self.nb_columns())
			.into_par_iter()
			.map(|position| {
				rows.iter()
					.rev()
					.fold(KoalaBearExt4::ZERO, |acc, row| acc * random_coin + row.get(position))
			})
			.collect();

		let linear_combination = self.code_ext().encode(&combination)?;
		Ok(OpeningProof::new(linear_combination))
	}
}
