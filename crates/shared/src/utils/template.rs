use askama::{Error, Template};
use serde::{Deserialize, Serialize};
use tracing::error;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailTemplateData {
    pub title: String,
    pub message: String,
    pub action: Option<EmailAction>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailAction {
    pub label: String,
    pub link: String,
}

impl EmailTemplateData {
    pub fn plain(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            action: None,
        }
    }
}

#[derive(Template, Debug)]
#[template(path = "email.html")]
pub struct EmailTemplate<'a> {
    pub title: &'a str,
    pub paragraphs: Vec<&'a str>,
    pub action: Option<&'a EmailAction>,
}

impl<'a> From<&'a EmailTemplateData> for EmailTemplate<'a> {
    fn from(data: &'a EmailTemplateData) -> Self {
        EmailTemplate {
            title: data.title.as_str(),
            paragraphs: data
                .message
                .split("\n\n")
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect(),
            action: data.action.as_ref(),
        }
    }
}

pub fn render_email(data: &EmailTemplateData) -> Result<String, Error> {
    EmailTemplate::from(data).render().inspect_err(|e| {
        error!("❌ Failed to render email template: {}", e);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_is_split_into_paragraphs_and_escaped() {
        let data = EmailTemplateData::plain("Hi", "first <b>line</b>\n\nsecond");
        let html = render_email(&data).unwrap();

        assert!(html.contains("<title>Hi</title>"));
        assert!(html.contains("&#60;b&#62;line&#60;/b&#62;"));
        assert!(!html.contains("<b>"));
        assert!(html.contains("second"));
        assert!(!html.contains("class=\"button\""));
    }

    #[test]
    fn action_renders_button() {
        let data = EmailTemplateData {
            title: "Welcome".into(),
            message: "hello".into(),
            action: Some(EmailAction {
                label: "Open".into(),
                link: "https://shop.example.com".into(),
            }),
        };
        let html = render_email(&data).unwrap();

        assert!(html.contains("shop.example.com"));
        assert!(html.contains(">Open</a>"));
    }
}
