use chrono::Utc;
use rand::Rng;

/// `SELLER_<unix-millis>_<3 digits>`
pub fn generate_seller_code() -> String {
    let suffix: u16 = rand::rng().random_range(0..1000);
    format!("SELLER_{}_{suffix:03}", Utc::now().timestamp_millis())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seller_code_shape() {
        let code = generate_seller_code();
        let parts: Vec<&str> = code.split('_').collect();

        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "SELLER");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 3);
        assert!(parts[2].chars().all(|c| c.is_ascii_digit()));
    }
}
