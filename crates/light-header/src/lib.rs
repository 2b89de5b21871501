//! # Light client headers
//!
//! This crate derives the auxiliary header a light client tracks for every finalized block. The
//! header commits to four BN254 scalar field elements:
//!
//! - the MiMC hash of the block's application state hash
//! - the MiMC hash of the validator slate
//! - the block time, in unix seconds
//! - the block height
//!
//! The validator slate always has [`MAX_VALIDATORS`] slots. Each occupied slot holds the `x` and
//! `y` coordinates of the validator's EdDSA-BN254 public key followed by its voting power, every
//! value encoded as a 32 byte big endian field element. Empty slots are all zeroes, so the slate
//! has the same shape no matter how many validators the block has. That fixed shape is what lets
//! a circuit with a constant number of constraints re-derive the header.
//!
//! Validators are committed in the order the [`ValidatorLookup`] returns them by index. That
//! order is part of the header, so producers and verifiers must agree on it.

mod builder;
pub use builder::{
    build_light_header, validators_hash, FinalizedBlock, LightHeaderBuilder, ValidatorInfo,
    ValidatorLookup,
};

mod encoding;
pub use encoding::{encode_validator, HeaderError, EMPTY_SLOT, SLOT_SIZE};

mod header_aux;
pub use header_aux::{HeaderAux, HeaderReport, HEADER_AUX_SIZE};

mod validators;
pub use validators::{Block, Validator, ValidatorSet};

/// Number of slots in the validator slate. Validators past this index are not committed to.
pub const MAX_VALIDATORS: usize = 150;
