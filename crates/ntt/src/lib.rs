// Copyright 2024-2025 Irreducible Inc.

//! Radix-2 number-theoretic transforms and the Reed–Solomon code built on
//! them.
//!
//! [`Domain`] owns the precomputed root tables for one power-of-two subgroup
//! of a two-adic field; domains are memoized process-wide so that the first
//! caller for a given size pays the setup cost. [`ReedSolomonCode`] pairs a
//! message-size domain with a blown-up codeword domain and provides the
//! encoding and low-degree test the commitment scheme is built on.

mod domain;
mod error;
mod reed_solomon;

pub use domain::Domain;
pub use error::Error;
pub use reed_solomon::ReedSolomonCode;
