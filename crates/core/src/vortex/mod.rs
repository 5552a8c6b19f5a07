// Copyright 2024-2025 Irreducible Inc.

//! The Vortex commitment engine.
//!
//! One [`Params`] instance drives a commitment round: [`Params::commit`]
//! encodes and hashes a batch of rows, [`Params::open`] computes the random
//! linear combination of every committed row, and
//! [`OpeningProof::complete`] discloses the verifier-chosen columns out of
//! the retained matrices. [`verify_opening`] re-runs all consistency checks
//! on the other side.

mod commit;
mod errors;
mod open;
mod params;
mod proof;
#[cfg(test)]
mod tests;
mod verify;

pub use commit::{Commitment, Committed, EncodedMatrix};
pub use errors::{Error, VerificationError};
pub use params::Params;
pub use proof::OpeningProof;
pub use verify::{verify_opening, VerifierInputs};
