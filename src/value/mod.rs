//! Value subsystem
//!
//! The closed set of cell values a table can hold, plus the codec that maps
//! them to and from the portable JSON tree used for persistence.
//!
//! Only `Picture` and `RealInterval` have a custom portable form:
//! - picture: base64 text of the raw bytes
//! - realInvl: `{"start": f64, "end": f64}`
//!
//! Decoding comes in two flavours. `decode_as` is driven by a declared
//! `DataType` and never guesses. `decode` sniffs the shape of the portable
//! value and is only meant for schema-less contexts.

mod codec;
mod errors;
mod interval;
mod picture;
mod types;

pub use codec::{decode, decode_as, encode, json_type_name, JPEG_BASE64_MAGIC};
pub use errors::{ValueError, ValueResult};
pub use interval::RealInterval;
pub use picture::Picture;
pub use types::{DataType, Value};
