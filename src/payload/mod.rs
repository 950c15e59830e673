//! QR payload encoding and validation.
//!
//! This module defines the self-describing, checksummed text payload that
//! the label generator writes into QR codes and the scanner reads back out.
//! Validation is strict: anything that was not produced by this scheme is
//! rejected, so stray QR codes in the camera view can never register as
//! matches.

mod checksum;
mod codec;

pub use codec::{decode, encode, DecodeError, SOURCE_TAG};
