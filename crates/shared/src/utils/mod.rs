mod gracefullshutdown;
mod logs;
mod metrics;
mod seller_code;
mod template;

pub use self::gracefullshutdown::shutdown_signal;
pub use self::logs::init_logger;
pub use self::metrics::{
    Method, Metrics, OperationTimer, Status, SystemMetrics, run_metrics_collector,
};
pub use self::seller_code::generate_seller_code;
pub use self::template::{EmailAction, EmailTemplate, EmailTemplateData, render_email};
