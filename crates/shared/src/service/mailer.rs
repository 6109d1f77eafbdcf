use crate::{
    abstract_trait::{DynEmailService, MailerServiceTrait},
    domain::{
        requests::{EmailRequest, SendMailRequest, TestMailRequest, WelcomeMailRequest},
        responses::{ApiResponse, MailSentResponse},
    },
    errors::ServiceError,
    utils::{EmailTemplateData, Method, Metrics},
};
use async_trait::async_trait;
use prometheus_client::registry::Registry;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

pub struct MailerService {
    email: DynEmailService,
    metrics: Metrics,
}

impl MailerService {
    pub async fn new(email: DynEmailService, registry: Arc<Mutex<Registry>>) -> Self {
        let metrics = Metrics::new();
        metrics.register(&mut *registry.lock().await, "mailer_service", "MailerService");

        Self { email, metrics }
    }

    async fn deliver(
        &self,
        to: &str,
        subject: &str,
        message: String,
    ) -> Result<ApiResponse<MailSentResponse>, ServiceError> {
        self.metrics
            .observe(Method::Post, async {
                let request = EmailRequest {
                    to: to.to_string(),
                    subject: subject.to_string(),
                    data: EmailTemplateData::plain(subject, message),
                };

                self.email.send(&request).await?;
                info!("📧 Mail '{subject}' delivered to {to}");

                Ok(ApiResponse::success(
                    "Email sent successfully",
                    MailSentResponse {
                        success: true,
                        recipient: to.to_string(),
                    },
                ))
            })
            .await
    }
}

#[async_trait]
impl MailerServiceTrait for MailerService {
    async fn send(
        &self,
        req: &SendMailRequest,
    ) -> Result<ApiResponse<MailSentResponse>, ServiceError> {
        self.deliver(&req.email, &req.subject, req.message.clone())
            .await
    }

    async fn send_test(
        &self,
        req: &TestMailRequest,
    ) -> Result<ApiResponse<MailSentResponse>, ServiceError> {
        self.deliver(
            &req.email,
            "Test Email",
            "This is a test email. Your email system is working!".to_string(),
        )
        .await
    }

    async fn send_welcome(
        &self,
        req: &WelcomeMailRequest,
    ) -> Result<ApiResponse<MailSentResponse>, ServiceError> {
        self.deliver(
            &req.email,
            "Welcome to Our Platform!",
            format!(
                "Hello {}! Welcome to our e-commerce platform. Thank you for joining us!",
                req.username
            ),
        )
        .await
    }
}
