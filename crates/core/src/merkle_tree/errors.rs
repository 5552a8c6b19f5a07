// Copyright 2024-2025 Irreducible Inc.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("the number of leaves must be a power of two")]
	PowerOfTwoLengthRequired,
	#[error("index exceeds the tree base size: {max}")]
	IndexOutOfRange { max: usize },
	#[error("verification failure: {0}")]
	Verification(#[from] VerificationError),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VerificationError {
	#[error("the proof's recorded position does not match the claimed index")]
	PositionMismatch,
	#[error("the recomputed root does not match")]
	InvalidPath,
}
