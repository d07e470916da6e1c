pub mod jwt;
pub mod req_parse;
pub mod serde_fn;
