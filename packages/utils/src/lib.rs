pub mod msg;
pub mod state;

pub use msg::{
    deserialize_address_map, normalize_json_map, parse_address_map, to_hex_amount, to_wei,
};
pub use state::Address;
