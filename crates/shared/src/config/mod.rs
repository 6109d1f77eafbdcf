mod database;
mod hashing;
mod jwt;
mod mailer;
mod myconfig;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::hashing::Hashing;
pub use self::jwt::{Claims, JwtConfig};
pub use self::mailer::SmtpMailer;
pub use self::myconfig::{AdminSeedConfig, Config, DatabaseConfig, EmailConfig};
