use std::env;

pub const DEFAULT_BASE_URL: &str = "https://hualiassist.lol";

#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(env::var("PDF_ASSISTANT_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = ClientConfig::new("http://localhost:8000/");
        assert_eq!(config.endpoint("/ask"), "http://localhost:8000/ask");
        assert_eq!(config.endpoint("upload_pdf"), "http://localhost:8000/upload_pdf");
    }

    #[test]
    fn default_points_at_hosted_backend() {
        assert_eq!(ClientConfig::default().base_url(), DEFAULT_BASE_URL);
    }
}
