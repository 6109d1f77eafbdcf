mod product;
mod role;
mod user;

pub use self::product::{OwnerProductCount, Product};
pub use self::role::Role;
pub use self::user::User;
