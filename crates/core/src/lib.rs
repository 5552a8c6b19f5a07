// Copyright 2024-2025 Irreducible Inc.

//! The Vortex polynomial commitment scheme.
//!
//! A prover commits to a batch of rows in Lagrange form by Reed–Solomon
//! encoding each row, hashing every column of the encoded matrix (with a
//! ring-SIS lattice hash or a generic collision-resistant hash), and
//! optionally aggregating the column digests under a Merkle root. Opening
//! collapses many evaluation claims into one random linear combination and
//! spot-checks verifier-chosen columns against the commitment.
//!
//! The entry point is [`vortex::Params`].

pub mod merkle_tree;
pub mod row;
pub mod vortex;
