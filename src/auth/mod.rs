pub mod access_gate;
pub mod password;
pub mod token_codec;

pub use access_gate::{claim_subject, RoleGuard, TokenAuth};
pub use token_codec::TokenCodec;
