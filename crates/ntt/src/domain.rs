// Copyright 2024-2025 Irreducible Inc.

use std::{
	any::{Any, TypeId},
	collections::HashMap,
	sync::{Arc, OnceLock, RwLock},
};

use vortex_field::{batch_invert, ExtensionOf, Field, TwoAdicField};

use super::error::Error;

/// Process-wide domain cache, keyed by field type and log-size. The first
/// caller for a given key pays the table construction; everybody else shares
/// the same `Arc`.
static DOMAIN_CACHE: OnceLock<RwLock<HashMap<(TypeId, usize), Arc<dyn Any + Send + Sync>>>> =
	OnceLock::new();

/// Precomputed root-of-unity data for one power-of-two transform size.
///
/// Holds the subgroup generator and its inverse, the half-size twiddle tables
/// driving the radix-2 butterflies, and, when the field is large enough, the
/// coset table of the order-`2n` root used by the blow-up-2 encoding fast
/// path.
#[derive(Debug)]
pub struct Domain<F: TwoAdicField> {
	log_size: usize,
	size: usize,
	generator: F,
	generator_inv: F,
	size_inv: F,
	roots: Vec<F>,
	inv_roots: Vec<F>,
	coset_table: Option<Vec<F>>,
}

impl<F: TwoAdicField> Domain<F> {
	/// Returns the shared domain of size `2^log_size`.
	pub fn get(log_size: usize) -> Result<Arc<Self>, Error> {
		let cache = DOMAIN_CACHE.get_or_init(Default::default);
		let key = (TypeId::of::<F>(), log_size);

		if let Some(domain) = cache.read().expect("domain cache lock").get(&key) {
			return Ok(Self::downcast(Arc::clone(domain)));
		}

		let built: Arc<dyn Any + Send + Sync> = Arc::new(Self::build(log_size)?);
		let mut guard = cache.write().expect("domain cache lock");
		// A racing builder may have landed first; the earliest insert wins so
		// every caller observes the same tables.
		let entry = guard.entry(key).or_insert(built);
		Ok(Self::downcast(Arc::clone(entry)))
	}

	fn downcast(entry: Arc<dyn Any + Send + Sync>) -> Arc<Self> {
		entry
			.downcast::<Self>()
			.unwrap_or_else(|_| unreachable!("cache entries are keyed by field type"))
	}

	fn build(log_size: usize) -> Result<Self, Error> {
		if log_size > F::TWO_ADICITY {
			return Err(Error::DomainTooLarge { log_required: log_size });
		}

		let size = 1 << log_size;
		let generator = F::two_adic_generator(log_size);
		let generator_inv = generator.inverse().expect("roots of unity are invertible");
		let size_inv = F::from_u64(size as u64).inverse().expect("domain size is a unit");

		let roots = powers(generator, size / 2);
		let inv_roots = powers(generator_inv, size / 2);

		let coset_table = (log_size + 1 <= F::TWO_ADICITY)
			.then(|| powers(F::two_adic_generator(log_size + 1), size));

		Ok(Self {
			log_size,
			size,
			generator,
			generator_inv,
			size_inv,
			roots,
			inv_roots,
			coset_table,
		})
	}

	pub fn size(&self) -> usize {
		self.size
	}

	pub fn log_size(&self) -> usize {
		self.log_size
	}

	pub fn generator(&self) -> F {
		self.generator
	}

	pub fn generator_inv(&self) -> F {
		self.generator_inv
	}

	/// The `i`-th domain element `ω^i`, for `i < size`.
	pub fn element(&self, i: usize) -> F {
		debug_assert!(i < self.size);
		if i < self.roots.len() {
			self.roots[i]
		} else if i == 0 {
			F::ONE
		} else {
			// ω^(n/2) = -1 for every domain of size at least 2.
			-self.roots[i - self.roots.len()]
		}
	}

	/// In-place transform from coefficients to evaluations, natural order.
	pub fn forward_transform(&self, values: &mut [F]) {
		assert_eq!(values.len(), self.size);
		fft_in_place(values, &self.roots);
	}

	/// In-place transform from evaluations to coefficients, natural order.
	pub fn inverse_transform(&self, values: &mut [F]) {
		assert_eq!(values.len(), self.size);
		fft_in_place(values, &self.inv_roots);
		for value in values {
			*value *= self.size_inv;
		}
	}

	/// In-place transform from coefficients to evaluations over the coset
	/// `g·H`, where `g` is the canonical order-`2n` root.
	pub fn coset_transform(&self, coefficients: &mut [F]) -> Result<(), Error> {
		assert_eq!(coefficients.len(), self.size);
		let coset_table = self
			.coset_table
			.as_ref()
			.ok_or(Error::DomainTooLarge { log_required: self.log_size + 1 })?;
		for (coefficient, shift) in coefficients.iter_mut().zip(coset_table) {
			*coefficient *= *shift;
		}
		fft_in_place(coefficients, &self.roots);
		Ok(())
	}

	/// Barycentric evaluation of a Lagrange-form vector at an out-of-domain
	/// point, possibly in an extension of the coefficient field.
	///
	/// Exact when `x` happens to lie on the domain.
	pub fn evaluate_lagrange<E: ExtensionOf<F>>(&self, evals: &[F], x: E) -> Result<E, Error> {
		if evals.len() != self.size {
			return Err(Error::IncorrectEvaluationsLength { expected: self.size });
		}

		let diffs: Vec<E> = (0..self.size).map(|i| x - self.element(i)).collect();
		if let Some(on_domain) = diffs.iter().position(|d| *d == E::ZERO) {
			return Ok(evals[on_domain].into());
		}

		let inv_diffs = batch_invert(&diffs).expect("all differences are non-zero");

		// P(x) = (x^n - 1)/n · Σ_i ω^i·y_i / (x - ω^i)
		let sum = inv_diffs
			.into_iter()
			.enumerate()
			.map(|(i, inv_diff)| inv_diff * (self.element(i) * evals[i]))
			.sum::<E>();

		let vanishing = x.pow(self.size as u64) - F::ONE;
		Ok(vanishing * self.size_inv * sum)
	}
}

/// Iterative radix-2 decimation-in-time transform; `roots` is the half-size
/// table of powers of the subgroup generator.
fn fft_in_place<F: Field>(values: &mut [F], roots: &[F]) {
	let n = values.len();
	if n <= 1 {
		return;
	}

	bit_reverse_permute(values);

	let mut len = 2;
	while len <= n {
		let half = len / 2;
		let step = n / len;
		for start in (0..n).step_by(len) {
			for i in 0..half {
				let twiddle = roots[i * step];
				let a = values[start + i];
				let b = values[start + half + i] * twiddle;
				values[start + i] = a + b;
				values[start + half + i] = a - b;
			}
		}
		len <<= 1;
	}
}

fn bit_reverse_permute<T>(values: &mut [T]) {
	let n = values.len();
	if n <= 2 {
		return;
	}
	let log_n = n.trailing_zeros();
	for i in 0..n {
		let j = i.reverse_bits() >> (usize::BITS - log_n);
		if j > i {
			values.swap(i, j);
		}
	}
}

fn powers<F: Field>(base: F, count: usize) -> Vec<F> {
	let mut acc = F::ONE;
	(0..count)
		.map(|_| {
			let current = acc;
			acc *= base;
			current
		})
		.collect()
}
