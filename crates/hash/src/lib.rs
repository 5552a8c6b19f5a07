// Copyright 2024-2025 Irreducible Inc.

//! Column hashing for the Vortex commitment scheme.
//!
//! Two interchangeable strategies turn a matrix column into a short digest:
//! the ring-SIS lattice hash of [`ring_sis`], which outputs a block of field
//! elements and is linear in the decomposed input, and the generic
//! byte-oriented hashing of [`column`], which folds a standard digest into a
//! single field element. [`compression`] provides the 2-to-1 digest
//! compression used for Merkle tree nodes.

pub mod column;
pub mod compression;
mod error;
pub mod ring_sis;

pub use column::{fold_digest, hash_column};
pub use compression::{DigestCompression, PseudoCompressionFunction};
pub use error::Error;
pub use ring_sis::{SisKey, SisParams, SIS_STD_PARAMS};
