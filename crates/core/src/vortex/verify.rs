// Copyright 2024-2025 Irreducible Inc.

use digest::{Digest, Output};
use itertools::izip;
use tracing::instrument;
use vortex_field::{Field, KoalaBearExt4};
use vortex_utils::bail;

use super::{
	commit::Commitment,
	errors::{Error, VerificationError},
	params::Params,
	proof::OpeningProof,
};
use crate::merkle_tree;

/// Everything the verifier consumes for one opening: the public transcript
/// values plus the shared engine configuration.
pub struct VerifierInputs<'a, H: Digest> {
	/// Engine configuration, identical to the prover's.
	pub params: &'a Params<H>,
	/// One commitment per batched matrix.
	pub commitments: &'a [Commitment<Output<H>>],
	/// The completed opening proof.
	pub proof: &'a OpeningProof<Output<H>>,
	/// The common evaluation point.
	pub x: KoalaBearExt4,
	/// Claimed evaluations at `x`, one list per commitment with one entry per
	/// committed row, in the order the rows were passed to the opening.
	pub ys: &'a [Vec<KoalaBearExt4>],
	/// The batching coefficient the linear combination was taken at.
	pub random_coin: KoalaBearExt4,
	/// Verifier-chosen encoded column indices.
	pub entry_list: &'a [usize],
}

/// Runs every consistency check of the opening protocol.
///
/// Malformed inputs (arity or geometry mismatches) surface as [`Error`]
/// values before any cryptographic work; a well-formed but invalid proof
/// surfaces as [`Error::Verification`] carrying the first check that failed
/// and where.
#[instrument(skip_all, name = "vortex::verify_opening", level = "debug")]
pub fn verify_opening<H: Digest>(inputs: &VerifierInputs<H>) -> Result<(), Error> {
	let &VerifierInputs {
		params,
		commitments,
		proof,
		x,
		ys,
		random_coin,
		entry_list,
	} = inputs;

	check_input_shape(inputs)?;

	// The opened vector must be a valid codeword; everything downstream
	// assumes it interpolates to a low-degree polynomial.
	if proof.linear_combination.len() != params.nb_encoded_columns()
		|| !params.code_ext().is_codeword(&proof.linear_combination)?
	{
		bail!(VerificationError::NotACodeword);
	}

	// The linear combination must open at `x` to the same random combination
	// of the claimed evaluations; coefficient powers run across the joined
	// row list, commitment by commitment.
	let mut expected = KoalaBearExt4::ZERO;
	let mut power = KoalaBearExt4::ONE;
	for ys_i in ys {
		for &y in ys_i {
			expected += power * y;
			power *= random_coin;
		}
	}
	let opened = params
		.code_ext()
		.large_domain()
		.evaluate_lagrange(&proof.linear_combination, x)?;
	if opened != expected {
		bail!(VerificationError::EvaluationMismatch);
	}

	// Each disclosed sub-column must hash back to the committed digest, or
	// carry a valid membership proof at its exact position.
	for (i, (commitment, disclosed)) in izip!(commitments, &proof.columns).enumerate() {
		match commitment {
			Commitment::Columns(digests) => {
				let digest_len = params.column_digest_len();
				if params.is_merkle_mode()
					|| digests.len() != params.nb_encoded_columns() * digest_len
				{
					bail!(Error::CommitmentModeMismatch { commitment: i });
				}
				for (&entry, column) in izip!(entry_list, disclosed) {
					let recomputed = params.column_digest(column)?;
					if recomputed[..] != digests[entry * digest_len..(entry + 1) * digest_len] {
						bail!(VerificationError::DigestMismatch {
							commitment: i,
							entry,
						});
					}
				}
			}
			Commitment::MerkleRoot(root) => {
				if !params.is_merkle_mode() {
					bail!(Error::CommitmentModeMismatch { commitment: i });
				}
				let branches = proof
					.merkle_proofs
					.as_ref()
					.and_then(|proofs| proofs.get(i))
					.filter(|branches| branches.len() == entry_list.len())
					.ok_or(Error::MissingMerkleProofs { commitment: i })?;
				for (&entry, column, branch) in izip!(entry_list, disclosed, branches) {
					let leaf = params.column_leaf(column)?;
					merkle_tree::verify_proof(params.compression(), branch, leaf, root, entry)
						.map_err(|err| match err {
							merkle_tree::VerificationError::PositionMismatch => {
								VerificationError::WrongDisclosedPosition {
									commitment: i,
									entry,
								}
							}
							merkle_tree::VerificationError::InvalidPath => {
								VerificationError::MerklePathMismatch {
									commitment: i,
									entry,
								}
							}
						})?;
				}
			}
		}
	}

	// Spot check: at every chosen entry the disclosed raw data, combined with
	// the same coefficient powers as the claims, must reproduce the opened
	// codeword. This is what binds the disclosure to the commitment.
	for (q, &entry) in entry_list.iter().enumerate() {
		let mut combined = KoalaBearExt4::ZERO;
		let mut power = KoalaBearExt4::ONE;
		for disclosed in &proof.columns {
			for &value in &disclosed[q] {
				combined += power * value;
				power *= random_coin;
			}
		}
		if combined != proof.linear_combination[entry] {
			bail!(VerificationError::LinearCombinationMismatch { entry });
		}
	}

	Ok(())
}

/// Arity and geometry preconditions; violating any of these is a caller bug
/// rather than an invalid proof.
fn check_input_shape<H: Digest>(inputs: &VerifierInputs<H>) -> Result<(), Error> {
	let VerifierInputs {
		params,
		commitments,
		proof,
		ys,
		entry_list,
		..
	} = inputs;

	if commitments.len() != ys.len() || commitments.len() != proof.columns.len() {
		bail!(Error::InputArityMismatch {
			commitments: commitments.len(),
			claims: ys.len(),
			columns: proof.columns.len(),
		});
	}
	if entry_list.is_empty() {
		bail!(Error::EmptyEntryList);
	}
	for &entry in *entry_list {
		if entry >= params.nb_encoded_columns() {
			bail!(Error::EntryOutOfRange {
				entry,
				max: params.nb_encoded_columns(),
			});
		}
	}
	for (i, (ys_i, disclosed)) in izip!(*ys, &proof.columns).enumerate() {
		if ys_i.is_empty() {
			bail!(Error::EmptyClaimList { commitment: i });
		}
		if disclosed.len() != entry_list.len() {
			bail!(Error::DisclosedColumnCountMismatch {
				commitment: i,
				expected: entry_list.len(),
				actual: disclosed.len(),
			});
		}
		for (&entry, column) in izip!(*entry_list, disclosed) {
			if column.len() != ys_i.len() {
				bail!(Error::DisclosedColumnLengthMismatch {
					commitment: i,
					entry,
					expected: ys_i.len(),
					actual: column.len(),
				});
			}
		}
	}
	Ok(())
}
