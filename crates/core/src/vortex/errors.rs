// Copyright 2024-2025 Irreducible Inc.

use crate::merkle_tree;

/// Configuration and precondition violations: a caller bug, reported before
/// any cryptographic work starts.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("the column count must be a non-zero power of two, got {actual}")]
	InvalidColumnCount { actual: usize },
	#[error("the blow-up factor must be a power of two at least 2, got {actual}")]
	InvalidBlowUpFactor { actual: usize },
	#[error("the row capacity must be non-zero")]
	ZeroRowCapacity,
	#[error("no rows to commit")]
	NoRows,
	#[error("row {row} has length {actual}, expected {expected}")]
	RowLengthMismatch {
		row: usize,
		expected: usize,
		actual: usize,
	},
	#[error("{actual} rows exceed the lattice key capacity of {max}")]
	TooManyRows { actual: usize, max: usize },
	#[error("the entry list is empty")]
	EmptyEntryList,
	#[error("entry {entry} is out of range: only {max} encoded columns")]
	EntryOutOfRange { entry: usize, max: usize },
	#[error("no committed matrices to disclose columns from")]
	NoCommittedMatrices,
	#[error("got {matrices} committed matrices but {trees} Merkle trees")]
	MatrixTreeArityMismatch { matrices: usize, trees: usize },
	#[error("got {commitments} commitments, {claims} claim lists and {columns} disclosed column sets")]
	InputArityMismatch {
		commitments: usize,
		claims: usize,
		columns: usize,
	},
	#[error("commitment {commitment} carries no claimed evaluations")]
	EmptyClaimList { commitment: usize },
	#[error("commitment {commitment} does not match the engine hashing mode")]
	CommitmentModeMismatch { commitment: usize },
	#[error("missing Merkle proofs for commitment {commitment}")]
	MissingMerkleProofs { commitment: usize },
	#[error("commitment {commitment} discloses {actual} columns, expected {expected}")]
	DisclosedColumnCountMismatch {
		commitment: usize,
		expected: usize,
		actual: usize,
	},
	#[error("disclosed column at entry {entry} of commitment {commitment} has {actual} rows, expected {expected}")]
	DisclosedColumnLengthMismatch {
		commitment: usize,
		entry: usize,
		expected: usize,
		actual: usize,
	},
	#[error("transform error: {0}")]
	Ntt(#[from] vortex_ntt::Error),
	#[error("column hashing error: {0}")]
	Hash(#[from] vortex_hash::Error),
	#[error("Merkle tree error: {0}")]
	MerkleTree(#[from] merkle_tree::Error),
	#[error("verification failure: {0}")]
	Verification(#[from] VerificationError),
}

/// Failed proof checks: the expected outcome for an invalid proof, with
/// enough context to tell which check tripped and where.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VerificationError {
	#[error("the opened linear combination is not a Reed-Solomon codeword")]
	NotACodeword,
	#[error("the linear combination is inconsistent with the claimed evaluations")]
	EvaluationMismatch,
	#[error("column digest mismatch at commitment {commitment}, entry {entry}")]
	DigestMismatch { commitment: usize, entry: usize },
	#[error("Merkle path mismatch at commitment {commitment}, entry {entry}")]
	MerklePathMismatch { commitment: usize, entry: usize },
	#[error("Merkle proof discloses the wrong position at commitment {commitment}, entry {entry}")]
	WrongDisclosedPosition { commitment: usize, entry: usize },
	#[error("the disclosed columns do not match the linear combination at entry {entry}")]
	LinearCombinationMismatch { entry: usize },
}
