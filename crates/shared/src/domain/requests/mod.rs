mod auth;
mod email;
mod product;
mod user;

use regex::Regex;
use std::sync::LazyLock;

pub use self::auth::{LoginRequest, RegisterRequest};
pub use self::email::{EmailRequest, SendMailRequest, TestMailRequest, WelcomeMailRequest};
pub use self::product::{
    CreateProductRequest, NewProduct, PatchProductRequest, ProductChanges, ProductNameQuery,
    UpdateProductRequest,
};
pub use self::user::{
    CreateUserRequest, NewUser, PatchUserRequest, SearchQuery, UpdateUserRequest, UserChanges,
};

pub(crate) static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("valid username regex"));

pub(crate) static LOWERCASE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]").expect("valid lowercase regex"));

pub(crate) static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^01\d+$").expect("valid phone regex"));

pub(crate) static FULL_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z\s]+$").expect("valid full name regex"));
