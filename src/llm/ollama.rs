//! Completion via the Ollama chat API.
use async_trait::async_trait;
use ollama_rs::Ollama;
use ollama_rs::generation::chat::ChatMessage;
use ollama_rs::generation::chat::request::ChatMessageRequest;

use super::{LlmClient, LlmError};

#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: Ollama,
    model: String,
}

impl OllamaClient {
    #[must_use]
    pub fn new(base_url: &str, model: String) -> Self {
        let (host, port) = parse_host_port(base_url);
        Self {
            client: Ollama::new(host, port),
            model,
        }
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request = ChatMessageRequest::new(
            self.model.clone(),
            vec![ChatMessage::user(prompt.to_string())],
        );

        let response = self
            .client
            .send_chat_messages(request)
            .await
            .map_err(|e| LlmError::RequestFailed(format!("Ollama chat request failed: {e}")))?;

        Ok(response.message.content)
    }
}

pub(crate) fn parse_host_port(url: &str) -> (String, u16) {
    let url = url.trim_end_matches('/');
    if let Some(colon_pos) = url.rfind(':') {
        let port_str = &url[colon_pos + 1..];
        if let Ok(port) = port_str.parse::<u16>() {
            let host = url[..colon_pos].to_string();
            return (host, port);
        }
    }
    (url.to_string(), 11434)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_host_port_explicit() {
        let (host, port) = parse_host_port("http://ollama:11434");
        assert_eq!(host, "http://ollama");
        assert_eq!(port, 11434);
    }

    #[test]
    fn test_parse_host_port_default() {
        let (host, port) = parse_host_port("http://localhost");
        assert_eq!(host, "http://localhost");
        assert_eq!(port, 11434);
    }

    #[test]
    fn test_parse_host_port_trailing_slash() {
        let (host, port) = parse_host_port("http://localhost:9999/");
        assert_eq!(host, "http://localhost");
        assert_eq!(port, 9999);
    }

    #[test]
    fn test_client_construction() {
        let client = OllamaClient::new("http://localhost:11434", "gpt-oss:20b".into());
        assert_eq!(client.model, "gpt-oss:20b");
    }
}
