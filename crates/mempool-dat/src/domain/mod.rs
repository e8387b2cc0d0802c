//! # Domain Layer - Snapshot Decoder
//!
//! Pure decoding logic with no file-system access.
//!
//! ## Components
//!
//! - `entities`: FileHeader, MempoolEntry, Mempool, TrailingData
//! - `codec`: fixed-width integer reader, header and entry decoders
//! - `stream`: byte-offset tracking reader
//! - `value_objects`: serializable summaries of a decoded snapshot
//! - `errors`: MempoolDatError and its field/entry causes

pub mod codec;
pub mod entities;
pub mod errors;
pub mod stream;
pub mod value_objects;

pub use codec::*;
pub use entities::*;
pub use errors::*;
pub use stream::*;
pub use value_objects::*;
