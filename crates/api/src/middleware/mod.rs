pub mod jwt;
pub mod validate;

pub use self::jwt::{auth_middleware, ensure_role};
pub use self::validate::{SimpleValidatedJson, SimpleValidatedQuery};
