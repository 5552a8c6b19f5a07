// Copyright 2024-2025 Irreducible Inc.

use std::mem::size_of;

use bytes::{Buf, BufMut};
use generic_array::{ArrayLength, GenericArray};

#[derive(Clone, thiserror::Error, Debug)]
pub enum Error {
	#[error("Write buffer is full")]
	WriteBufferFull,
	#[error("Not enough data in read buffer to deserialize")]
	NotEnoughBytes,
	#[error("Unknown enum variant index {name}::{index}")]
	UnknownEnumVariant { name: &'static str, index: u8 },
	#[error("Deserialized value is not in canonical form")]
	NotCanonical,
}

/// Represents type that can be serialized to a byte buffer.
pub trait SerializeBytes {
	fn serialize(&self, write_buf: impl BufMut) -> Result<(), Error>;
}

/// Represents type that can be deserialized from a byte buffer.
pub trait DeserializeBytes {
	fn deserialize(read_buf: impl Buf) -> Result<Self, Error>
	where
		Self: Sized;
}

impl SerializeBytes for u8 {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), Error> {
		if write_buf.remaining_mut() < size_of::<u8>() {
			return Err(Error::WriteBufferFull);
		}
		write_buf.put_u8(*self);
		Ok(())
	}
}

impl DeserializeBytes for u8 {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, Error> {
		if read_buf.remaining() < size_of::<u8>() {
			return Err(Error::NotEnoughBytes);
		}
		Ok(read_buf.get_u8())
	}
}

impl SerializeBytes for u32 {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), Error> {
		if write_buf.remaining_mut() < size_of::<u32>() {
			return Err(Error::WriteBufferFull);
		}
		write_buf.put_u32(*self);
		Ok(())
	}
}

impl DeserializeBytes for u32 {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, Error> {
		if read_buf.remaining() < size_of::<u32>() {
			return Err(Error::NotEnoughBytes);
		}
		Ok(read_buf.get_u32())
	}
}

impl<N: ArrayLength<u8>> SerializeBytes for GenericArray<u8, N> {
	fn serialize(&self, mut write_buf: impl BufMut) -> Result<(), Error> {
		if write_buf.remaining_mut() < N::USIZE {
			return Err(Error::WriteBufferFull);
		}
		write_buf.put_slice(self);
		Ok(())
	}
}

impl<N: ArrayLength<u8>> DeserializeBytes for GenericArray<u8, N> {
	fn deserialize(mut read_buf: impl Buf) -> Result<Self, Error> {
		if read_buf.remaining() < N::USIZE {
			return Err(Error::NotEnoughBytes);
		}

		let mut ret = Self::default();
		read_buf.copy_to_slice(&mut ret);
		Ok(ret)
	}
}

impl<T: SerializeBytes> SerializeBytes for Vec<T> {
	fn serialize(&self, write_buf: impl BufMut) -> Result<(), Error> {
		serialize_seq(self, write_buf)
	}
}

impl<T: DeserializeBytes> DeserializeBytes for Vec<T> {
	fn deserialize(read_buf: impl Buf) -> Result<Self, Error> {
		deserialize_seq(read_buf)
	}
}

/// Serializes a length-prefixed sequence.
pub fn serialize_seq<T: SerializeBytes>(
	items: &[T],
	mut write_buf: impl BufMut,
) -> Result<(), Error> {
	(items.len() as u32).serialize(&mut write_buf)?;
	for item in items {
		item.serialize(&mut write_buf)?;
	}
	Ok(())
}

/// Deserializes a length-prefixed sequence written by [`serialize_seq`].
pub fn deserialize_seq<T: DeserializeBytes>(mut read_buf: impl Buf) -> Result<Vec<T>, Error> {
	let len = u32::deserialize(&mut read_buf)? as usize;
	(0..len).map(|_| T::deserialize(&mut read_buf)).collect()
}
