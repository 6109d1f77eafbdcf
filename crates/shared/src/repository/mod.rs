#[cfg(any(test, feature = "test-util"))]
pub mod memory;
mod product;
mod user;

pub use self::product::ProductRepository;
pub use self::user::UserRepository;

/// Escapes `LIKE` wildcards and wraps the term for a substring match.
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn wildcards_are_escaped() {
        assert_eq!(like_pattern("lamp"), "%lamp%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
    }
}
