//! Transport layer: query encoding and wire-format details.

mod params;
mod send;

pub use params::Params;
pub use send::{TransportError, decode_json_body, encode_send_query};
