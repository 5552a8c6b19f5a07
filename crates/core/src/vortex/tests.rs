// Copyright 2024-2025 Irreducible Inc.

use assert_matches::assert_matches;
use digest::Output;
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use sha2::Sha256;
use vortex_field::{Field, KoalaBear, KoalaBearExt4};
use vortex_hash::SIS_STD_PARAMS;
use vortex_utils::serialization::{DeserializeBytes, SerializeBytes};

use super::*;
use crate::row::RowVector;

fn random_rows(rng: &mut StdRng, nb_rows: usize, len: usize) -> Vec<RowVector<KoalaBear>> {
	(0..nb_rows)
		.map(|_| RowVector::dense((0..len).map(|_| KoalaBear::random(rng)).collect()))
		.collect()
}

fn evaluate_rows(
	params: &Params<Sha256>,
	rows: &[RowVector<KoalaBear>],
	x: KoalaBearExt4,
) -> Vec<KoalaBearExt4> {
	let domain = params.code().small_domain();
	rows.iter().map(|row| domain.evaluate_lagrange(&row.to_dense(), x).unwrap()).collect()
}

/// An owned prover transcript, ready to be checked (and mutated) by the
/// verifier side of a test.
struct Setup {
	commitments: Vec<Commitment<Output<Sha256>>>,
	ys: Vec<Vec<KoalaBearExt4>>,
	proof: OpeningProof<Output<Sha256>>,
	x: KoalaBearExt4,
	random_coin: KoalaBearExt4,
	entry_list: Vec<usize>,
}

impl Setup {
	fn verify(&self, params: &Params<Sha256>) -> Result<(), Error> {
		verify_opening(&VerifierInputs {
			params,
			commitments: &self.commitments,
			proof: &self.proof,
			x: self.x,
			ys: &self.ys,
			random_coin: self.random_coin,
			entry_list: &self.entry_list,
		})
	}
}

/// Runs the full prover side: one commit per batch, one joint opening.
fn prove(
	params: &Params<Sha256>,
	nb_rows_per_commitment: &[usize],
	entry_list: &[usize],
	seed: u64,
) -> Setup {
	let mut rng = StdRng::seed_from_u64(seed);
	let x = KoalaBearExt4::random(&mut rng);
	let random_coin = KoalaBearExt4::random(&mut rng);

	let mut all_rows = Vec::new();
	let mut commitments = Vec::new();
	let mut matrices = Vec::new();
	let mut trees = Vec::new();
	let mut ys = Vec::new();
	for &nb_rows in nb_rows_per_commitment {
		let rows = random_rows(&mut rng, nb_rows, params.nb_columns());
		let committed = params.commit(&rows).unwrap();
		ys.push(evaluate_rows(params, &rows, x));
		commitments.push(committed.commitment);
		matrices.push(committed.matrix);
		trees.extend(committed.tree);
		all_rows.extend(rows);
	}

	let mut proof = params.open(&all_rows, random_coin).unwrap();
	let trees = params.is_merkle_mode().then_some(trees.as_slice());
	proof.complete(entry_list, &matrices, trees).unwrap();

	Setup {
		commitments,
		ys,
		proof,
		x,
		random_coin,
		entry_list: entry_list.to_vec(),
	}
}

const ENTRY_LIST: [usize; 4] = [1, 5, 19, 645];

fn std_params() -> Params<Sha256> {
	Params::new(2, 1024, 16, SIS_STD_PARAMS).unwrap()
}

#[test]
fn test_commit_open_verify() {
	let params = std_params();
	let setup = prove(&params, &[15], &ENTRY_LIST, 0);
	setup.verify(&params).unwrap();
}

#[test]
fn test_flipped_disclosed_entry_fails() {
	let params = std_params();
	let mut setup = prove(&params, &[15], &ENTRY_LIST, 1);

	setup.proof.columns[0][2][7] += KoalaBear::ONE;
	assert_matches!(
		setup.verify(&params),
		Err(Error::Verification(VerificationError::DigestMismatch {
			commitment: 0,
			entry: 19,
		}))
	);
}

#[test]
fn test_merkle_mode_commit_open_verify() {
	let params = std_params().with_merkle_mode();
	let setup = prove(&params, &[15], &ENTRY_LIST, 2);
	setup.verify(&params).unwrap();
}

#[test]
fn test_batched_commitments_verify_jointly() {
	let params = std_params().with_merkle_mode();
	let setup = prove(&params, &[15, 15, 15, 15], &ENTRY_LIST, 3);
	setup.verify(&params).unwrap();
}

#[test]
fn test_swapped_merkle_roots_fail() {
	let params = std_params().with_merkle_mode();
	let mut setup = prove(&params, &[15, 15, 15, 15], &ENTRY_LIST, 4);

	setup.commitments.swap(0, 1);
	assert_matches!(
		setup.verify(&params),
		Err(Error::Verification(VerificationError::MerklePathMismatch {
			commitment: 0,
			..
		}))
	);
}

#[test]
fn test_no_sis_replacement() {
	let params = std_params().remove_sis();
	assert!(params.has_sis_replacement());

	// One folded field element per encoded column instead of a digest block.
	let mut rng = StdRng::seed_from_u64(5);
	let rows = random_rows(&mut rng, 15, params.nb_columns());
	let committed = params.commit(&rows).unwrap();
	assert_matches!(
		&committed.commitment,
		Commitment::Columns(columns) if columns.len() == params.nb_encoded_columns()
	);

	let setup = prove(&params, &[15], &ENTRY_LIST, 6);
	setup.verify(&params).unwrap();
}

#[test]
fn test_no_sis_merkle_mode() {
	let params = std_params().remove_sis().with_merkle_mode();
	let setup = prove(&params, &[15, 15], &ENTRY_LIST, 7);
	setup.verify(&params).unwrap();
}

#[test]
fn test_sis_digest_block_shape() {
	let params = std_params();
	let mut rng = StdRng::seed_from_u64(8);
	let rows = random_rows(&mut rng, 15, params.nb_columns());
	let committed = params.commit(&rows).unwrap();

	assert_matches!(
		&committed.commitment,
		Commitment::Columns(columns)
			if columns.len() == params.nb_encoded_columns() * params.column_digest_len()
	);
}

#[test]
fn test_open_is_idempotent() {
	let params = std_params();
	let mut rng = StdRng::seed_from_u64(9);
	let random_coin = KoalaBearExt4::random(&mut rng);
	let rows = random_rows(&mut rng, 15, params.nb_columns());
	let committed = params.commit(&rows).unwrap();
	let matrices = [committed.matrix];

	let serialize = |proof: &OpeningProof<Output<Sha256>>| {
		let mut buf = Vec::new();
		proof.serialize(&mut buf).unwrap();
		buf
	};

	let mut first = params.open(&rows, random_coin).unwrap();
	first.complete(&ENTRY_LIST, &matrices, None).unwrap();
	let mut second = params.open(&rows, random_coin).unwrap();
	second.complete(&ENTRY_LIST, &matrices, None).unwrap();

	assert_eq!(serialize(&first), serialize(&second));
}

#[test]
fn test_proof_serialization_roundtrip() {
	for merkle in [false, true] {
		let params = if merkle { std_params().with_merkle_mode() } else { std_params() };
		let setup = prove(&params, &[3, 2], &ENTRY_LIST, 10);

		let mut buf = Vec::new();
		setup.proof.serialize(&mut buf).unwrap();
		let proof_copy = OpeningProof::<Output<Sha256>>::deserialize(buf.as_slice()).unwrap();
		assert_eq!(setup.proof, proof_copy);

		for commitment in &setup.commitments {
			let mut buf = Vec::new();
			commitment.serialize(&mut buf).unwrap();
			let copy = Commitment::<Output<Sha256>>::deserialize(buf.as_slice()).unwrap();
			assert_eq!(*commitment, copy);
		}
	}
}

#[test]
fn test_compact_rows_commit_like_dense() {
	let mut rng = StdRng::seed_from_u64(11);
	let params = Params::<Sha256>::new(2, 64, 8, SIS_STD_PARAMS).unwrap();

	let window: Vec<KoalaBear> = (0..20).map(|_| KoalaBear::random(&mut rng)).collect();
	let compact = vec![
		RowVector::constant(KoalaBear::new(12), 64),
		RowVector::windowed(window, 5, 64, KoalaBear::ZERO),
	];
	let dense: Vec<_> = compact.iter().map(|row| RowVector::dense(row.to_dense())).collect();

	let committed_compact = params.commit(&compact).unwrap();
	let committed_dense = params.commit(&dense).unwrap();
	assert_eq!(committed_compact.commitment, committed_dense.commitment);
	assert_eq!(committed_compact.matrix, committed_dense.matrix);
}

#[test]
fn test_statement_mutations_fail() {
	let params = Params::<Sha256>::new(2, 8, 17, SIS_STD_PARAMS).unwrap().with_merkle_mode();
	let entry_list = [1usize, 2, 3, 4, 5, 6, 7, 8];

	let mutators: Vec<(&str, fn(&mut Setup))> = vec![
		("increment the first y", |setup| {
			setup.ys[0][0] += KoalaBearExt4::ONE;
		}),
		("swap two ys within a commitment", |setup| {
			setup.ys[1].swap(0, 1);
		}),
		("swap the claim lists of two commitments", |setup| {
			setup.ys.swap(0, 1);
		}),
		("move a y across commitments", |setup| {
			let y = setup.ys[1].pop().unwrap();
			setup.ys[2].insert(0, y);
		}),
		("bump the evaluation point", |setup| {
			setup.x += KoalaBearExt4::ONE;
		}),
		("drop the first y", |setup| {
			setup.ys[0].remove(0);
		}),
		("bump the random coin", |setup| {
			setup.random_coin += KoalaBearExt4::ONE;
		}),
		("point an entry out of range", |setup| {
			setup.entry_list[0] = 10000;
		}),
		("overwrite a linear combination position", |setup| {
			setup.proof.linear_combination[0] = setup.proof.linear_combination[1];
		}),
	];

	for (explainer, mutate) in mutators {
		let mut setup = prove(&params, &[1, 3, 15], &entry_list, 12);
		setup.verify(&params).unwrap();

		mutate(&mut setup);
		assert!(setup.verify(&params).is_err(), "mutation not caught: {explainer}");
	}
}

#[test]
fn test_commit_preconditions() {
	let params = std_params();
	let mut rng = StdRng::seed_from_u64(13);

	assert_matches!(params.commit(&[]), Err(Error::NoRows));

	let short = random_rows(&mut rng, 2, 512);
	assert_matches!(
		params.commit(&short),
		Err(Error::RowLengthMismatch {
			row: 0,
			expected: 1024,
			actual: 512,
		})
	);

	let too_many = random_rows(&mut rng, 17, 1024);
	assert_matches!(
		params.commit(&too_many),
		Err(Error::TooManyRows {
			actual: 17,
			max: 16,
		})
	);
}

#[test]
fn test_complete_preconditions() {
	let params = std_params();
	let mut rng = StdRng::seed_from_u64(14);
	let random_coin = KoalaBearExt4::random(&mut rng);
	let rows = random_rows(&mut rng, 3, params.nb_columns());
	let committed = params.commit(&rows).unwrap();
	let matrices = [committed.matrix];

	let mut proof = params.open(&rows, random_coin).unwrap();
	assert_matches!(proof.complete(&[], &matrices, None), Err(Error::EmptyEntryList));
	assert_matches!(
		proof.complete(&[2048], &matrices, None),
		Err(Error::EntryOutOfRange {
			entry: 2048,
			max: 2048,
		})
	);
	assert_matches!(
		proof.complete(&ENTRY_LIST, &[], None),
		Err(Error::NoCommittedMatrices)
	);
	assert_matches!(
		proof.complete(&ENTRY_LIST, &matrices, Some(&[])),
		Err(Error::MatrixTreeArityMismatch {
			matrices: 1,
			trees: 0,
		})
	);
}

#[test]
fn test_verify_arity_preconditions() {
	let params = std_params();
	let mut setup = prove(&params, &[4, 4], &ENTRY_LIST, 15);

	setup.ys.pop();
	assert_matches!(
		setup.verify(&params),
		Err(Error::InputArityMismatch {
			commitments: 2,
			claims: 1,
			columns: 2,
		})
	);
}

proptest! {
	/// Honest transcripts verify for any randomness and batch shape, in both
	/// hashing modes.
	#[test]
	fn prop_honest_proofs_verify(seed in any::<u64>(), nb_rows in 1usize..8, no_sis in any::<bool>()) {
		let params = Params::<Sha256>::new(2, 16, 8, SIS_STD_PARAMS).unwrap();
		let params = if no_sis { params.remove_sis() } else { params };

		let setup = prove(&params, &[nb_rows, 3], &[0, 3, 17, 31], seed);
		prop_assert!(setup.verify(&params).is_ok());
	}
}

#[test]
fn test_params_construction_errors() {
	assert_matches!(
		Params::<Sha256>::new(2, 12, 16, SIS_STD_PARAMS),
		Err(Error::InvalidColumnCount { actual: 12 })
	);
	assert_matches!(
		Params::<Sha256>::new(3, 16, 16, SIS_STD_PARAMS),
		Err(Error::InvalidBlowUpFactor { actual: 3 })
	);
	assert_matches!(
		Params::<Sha256>::new(2, 16, 0, SIS_STD_PARAMS),
		Err(Error::ZeroRowCapacity)
	);
	// The blown-up domain must fit inside the field's two-adic subgroup.
	assert_matches!(
		Params::<Sha256>::new(2, 1 << 24, 16, SIS_STD_PARAMS),
		Err(Error::Ntt(_))
	);
}
