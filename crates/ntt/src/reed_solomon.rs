// Copyright 2024-2025 Irreducible Inc.

//! Reed–Solomon codes over two-adic prime fields.
//!
//! Messages are rows in Lagrange form over the small domain; codewords are
//! evaluations of the same polynomial over the blown-up domain. Membership is
//! decided by the low-degree test: inverse-transform and require that every
//! coefficient at or beyond the message length vanishes.

use std::sync::Arc;

use vortex_field::TwoAdicField;
use vortex_utils::{bail, checked_arithmetics::checked_log_2};

use super::{domain::Domain, error::Error};

#[derive(Debug)]
pub struct ReedSolomonCode<F: TwoAdicField> {
	small: Arc<Domain<F>>,
	large: Arc<Domain<F>>,
	log_dim: usize,
	log_inv_rate: usize,
}

impl<F: TwoAdicField> ReedSolomonCode<F> {
	pub fn new(log_dim: usize, log_inv_rate: usize) -> Result<Self, Error> {
		if log_inv_rate == 0 {
			bail!(Error::InvalidBlowUpFactor);
		}
		// The blown-up domain is the one that can exceed the field's
		// two-adicity; resolve it before building the smaller tables.
		let large = Domain::get(log_dim + log_inv_rate)?;
		let small = Domain::get(log_dim)?;
		Ok(Self {
			small,
			large,
			log_dim,
			log_inv_rate,
		})
	}

	/// Builds the code from its message length and blow-up factor, both of
	/// which must be powers of two.
	pub fn with_blow_up(dim: usize, blow_up_factor: usize) -> Result<Self, Error> {
		if blow_up_factor < 2 || !blow_up_factor.is_power_of_two() {
			bail!(Error::InvalidBlowUpFactor);
		}
		Self::new(checked_log_2(dim), checked_log_2(blow_up_factor))
	}

	/// The message length.
	pub const fn dim(&self) -> usize {
		1 << self.log_dim
	}

	/// The block length.
	#[allow(clippy::len_without_is_empty)]
	pub const fn len(&self) -> usize {
		1 << (self.log_dim + self.log_inv_rate)
	}

	/// The reciprocal of the rate, ie. `self.len() / self.dim()`.
	pub const fn inv_rate(&self) -> usize {
		1 << self.log_inv_rate
	}

	pub fn small_domain(&self) -> &Domain<F> {
		&self.small
	}

	pub fn large_domain(&self) -> &Domain<F> {
		&self.large
	}

	/// Encodes a row of evaluations over the small domain into a codeword
	/// over the large domain.
	pub fn encode(&self, row: &[F]) -> Result<Vec<F>, Error> {
		if row.len() != self.dim() {
			bail!(Error::IncorrectMessageLength { expected: self.dim() });
		}

		let _scope = tracing::trace_span!(
			"Reed-Solomon encode",
			log_dim = self.log_dim,
			log_inv_rate = self.log_inv_rate,
		)
		.entered();

		if self.log_inv_rate == 1 {
			self.encode_blow_up_two(row)
		} else {
			self.encode_general(row)
		}
	}

	/// General path: interpolate, zero-pad the coefficients, transform over
	/// the large domain.
	fn encode_general(&self, row: &[F]) -> Result<Vec<F>, Error> {
		let mut codeword = Vec::with_capacity(self.len());
		codeword.extend_from_slice(row);
		self.small.inverse_transform(&mut codeword[..]);
		codeword.resize(self.len(), F::ZERO);
		self.large.forward_transform(&mut codeword);
		Ok(codeword)
	}

	/// Blow-up-2 path: the even codeword positions are the original row, the
	/// odd positions are the polynomial evaluated over the shifted coset, via
	/// one half-size transform and the coset table.
	fn encode_blow_up_two(&self, row: &[F]) -> Result<Vec<F>, Error> {
		let mut coset = row.to_vec();
		self.small.inverse_transform(&mut coset);
		self.small.coset_transform(&mut coset)?;

		let mut codeword = Vec::with_capacity(self.len());
		for (even, odd) in row.iter().zip(&coset) {
			codeword.push(*even);
			codeword.push(*odd);
		}
		Ok(codeword)
	}

	/// The low-degree test: a vector of large-domain evaluations is a
	/// codeword iff every interpolated coefficient at or beyond the message
	/// length is exactly zero.
	pub fn is_codeword(&self, word: &[F]) -> Result<bool, Error> {
		if word.len() != self.len() {
			bail!(Error::IncorrectCodewordLength { expected: self.len() });
		}

		let mut coefficients = word.to_vec();
		self.large.inverse_transform(&mut coefficients);
		Ok(coefficients[self.dim()..].iter().all(|c| *c == F::ZERO))
	}
}
