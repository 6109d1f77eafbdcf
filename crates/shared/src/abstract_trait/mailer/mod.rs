use crate::{
    domain::{
        requests::{SendMailRequest, TestMailRequest, WelcomeMailRequest},
        responses::{ApiResponse, MailSentResponse},
    },
    errors::ServiceError,
};
use async_trait::async_trait;
use std::sync::Arc;

pub type DynMailerService = Arc<dyn MailerServiceTrait + Send + Sync>;

#[async_trait]
pub trait MailerServiceTrait {
    async fn send(
        &self,
        req: &SendMailRequest,
    ) -> Result<ApiResponse<MailSentResponse>, ServiceError>;
    async fn send_test(
        &self,
        req: &TestMailRequest,
    ) -> Result<ApiResponse<MailSentResponse>, ServiceError>;
    async fn send_welcome(
        &self,
        req: &WelcomeMailRequest,
    ) -> Result<ApiResponse<MailSentResponse>, ServiceError>;
}
