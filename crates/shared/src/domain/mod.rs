mod actor;
pub mod requests;
pub mod responses;

pub use self::actor::Actor;
