// Copyright 2024-2025 Irreducible Inc.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("domain of size 2^{log_required} exceeds the field's 2-adicity")]
	DomainTooLarge { log_required: usize },
	#[error("the blow-up factor must be a power of two, at least 2")]
	InvalidBlowUpFactor,
	#[error("message length must be exactly {expected}")]
	IncorrectMessageLength { expected: usize },
	#[error("codeword length must be exactly {expected}")]
	IncorrectCodewordLength { expected: usize },
	#[error("evaluation vector length must be exactly {expected}")]
	IncorrectEvaluationsLength { expected: usize },
}
