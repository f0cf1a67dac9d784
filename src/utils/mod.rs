pub mod fillvector;
pub mod u8_keys;
