// Copyright 2024-2025 Irreducible Inc.

//! Committed row representations.
//!
//! Rows are logically plain vectors of field elements; the variants avoid
//! materializing data for the degenerate shapes that dominate real traces
//! (constant columns, zero-padded windows). Every variant must behave exactly
//! like its dense expansion: encodings and digests may never depend on the
//! representation.

use vortex_field::Field;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowVector<F: Field> {
	/// Fully materialized row.
	Dense(Vec<F>),
	/// The same value at every position.
	Constant { value: F, len: usize },
	/// A data window at `offset`, padded with `pad` elsewhere.
	Windowed {
		window: Vec<F>,
		offset: usize,
		len: usize,
		pad: F,
	},
}

impl<F: Field> RowVector<F> {
	pub fn dense(values: Vec<F>) -> Self {
		Self::Dense(values)
	}

	pub fn constant(value: F, len: usize) -> Self {
		Self::Constant { value, len }
	}

	/// Panics if the window does not fit in the row.
	pub fn windowed(window: Vec<F>, offset: usize, len: usize, pad: F) -> Self {
		assert!(offset + window.len() <= len, "window must fit in the row");
		Self::Windowed {
			window,
			offset,
			len,
			pad,
		}
	}

	pub fn len(&self) -> usize {
		match self {
			Self::Dense(values) => values.len(),
			Self::Constant { len, .. } | Self::Windowed { len, .. } => *len,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// The entry at position `i`. Panics if out of range.
	pub fn get(&self, i: usize) -> F {
		assert!(i < self.len());
		match self {
			Self::Dense(values) => values[i],
			Self::Constant { value, .. } => *value,
			Self::Windowed {
				window,
				offset,
				pad,
				..
			} => {
				if i >= *offset && i < offset + window.len() {
					window[i - offset]
				} else {
					*pad
				}
			}
		}
	}

	/// Writes the dense expansion into `buf`, which must have length
	/// `self.len()`.
	pub fn write_dense(&self, buf: &mut [F]) {
		assert_eq!(buf.len(), self.len());
		match self {
			Self::Dense(values) => buf.copy_from_slice(values),
			Self::Constant { value, .. } => buf.fill(*value),
			Self::Windowed {
				window,
				offset,
				pad,
				..
			} => {
				buf.fill(*pad);
				buf[*offset..offset + window.len()].copy_from_slice(window);
			}
		}
	}

	pub fn to_dense(&self) -> Vec<F> {
		let mut buf = vec![F::ZERO; self.len()];
		self.write_dense(&mut buf);
		buf
	}

	pub fn iter(&self) -> impl Iterator<Item = F> + '_ {
		(0..self.len()).map(move |i| self.get(i))
	}
}
