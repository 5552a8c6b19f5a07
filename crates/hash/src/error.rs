// Copyright 2024-2025 Irreducible Inc.

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("input of {actual} field elements exceeds the key capacity of {max}")]
	InputExceedsKeyCapacity { actual: usize, max: usize },
	#[error("the limb bound must divide the element encoding, got log2 bound {log_two_bound}")]
	InvalidLimbBound { log_two_bound: usize },
}
