//! This module contains the pure, stateless kernels for LEB128 (Little-Endian
//! Base 128) variable-length integer encoding and decoding.
//!
//! The symbol wire format uses it for texts that contain code units above 255,
//! where most values are still small. It is fully panic-free.

use num_traits::{PrimInt, Unsigned};
use std::io::Cursor;

use crate::error::StrataError;

//==================================================================================
// 1. Public API for Single-Value Operations
//==================================================================================

/// Encodes a single unsigned integer into a LEB128 byte sequence, writing to a buffer.
pub fn encode_one<T>(value: T, buffer: &mut Vec<u8>) -> Result<(), StrataError>
where
    T: PrimInt + Unsigned,
{
    let zero = T::zero();
    let seven_bit_mask = T::from(0x7F).ok_or_else(|| {
        StrataError::Leb128DecodeError("Failed to create 7-bit mask for type".to_string())
    })?;
    let continuation_bit_t = T::from(0x80).ok_or_else(|| {
        StrataError::Leb128DecodeError("Failed to create continuation bit for type".to_string())
    })?;

    let mut current_value = value;
    loop {
        let mut byte = current_value & seven_bit_mask;
        current_value = current_value >> 7;
        if current_value != zero {
            byte = byte | continuation_bit_t;
        }

        let byte_u8 = byte.to_u8().ok_or_else(|| {
            StrataError::Leb128DecodeError("Failed to convert generic integer to u8".to_string())
        })?;
        buffer.push(byte_u8);

        if current_value == zero {
            break;
        }
    }
    Ok(())
}

/// Decodes a single unsigned integer from a LEB128 byte stream cursor.
pub fn decode_one<T>(cursor: &mut Cursor<&[u8]>) -> Result<T, StrataError>
where
    T: PrimInt + Unsigned,
{
    let mut result = T::zero();
    let mut shift = 0;
    let total_bits = std::mem::size_of::<T>() * 8;

    loop {
        let pos = cursor.position() as usize;
        let byte = *cursor
            .get_ref()
            .get(pos)
            .ok_or_else(|| StrataError::Leb128DecodeError("Unexpected end of buffer".to_string()))?;
        cursor.set_position((pos + 1) as u64);

        let seven_bit_payload = T::from(byte & 0x7F).ok_or_else(|| {
            StrataError::Leb128DecodeError("Failed to create 7-bit payload from byte".to_string())
        })?;

        if shift >= total_bits {
            return Err(StrataError::Leb128DecodeError(
                "Integer overflow during decoding".to_string(),
            ));
        }

        result = result | (seven_bit_payload << shift);

        if byte & 0x80 == 0 {
            // The last group may carry bits beyond the width of T.
            if shift + 7 > total_bits && (byte >> (total_bits - shift)) > 0 {
                return Err(StrataError::Leb128DecodeError(
                    "Integer overflow during decoding".to_string(),
                ));
            }
            return Ok(result);
        }

        shift += 7;
    }
}

//==================================================================================
// 2. Public API for Slice Operations
//==================================================================================

/// Encodes every value of a slice, appending to `output_buf`.
pub fn encode<T>(input_slice: &[T], output_buf: &mut Vec<u8>) -> Result<(), StrataError>
where
    T: PrimInt + Unsigned,
{
    for &val in input_slice {
        encode_one(val, output_buf)?;
    }
    Ok(())
}

/// Decodes values until the input is exhausted. A value cut off by the end of
/// the buffer is an error.
pub fn decode_all<T>(input_bytes: &[u8]) -> Result<Vec<T>, StrataError>
where
    T: PrimInt + Unsigned,
{
    let mut values = Vec::with_capacity(input_bytes.len());
    let mut cursor = Cursor::new(input_bytes);
    while (cursor.position() as usize) < input_bytes.len() {
        values.push(decode_one::<T>(&mut cursor)?);
    }
    Ok(values)
}
