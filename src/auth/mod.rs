pub mod codec;
pub mod password;

pub use codec::{Claims, TokenCodec, TokenError, UserSnapshot};
pub use password::PasswordError;
