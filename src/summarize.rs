use anyhow::{anyhow, Context, Result};

const MODEL_NAME: &str = "gemma3:4b";
const TEMPERATURE: f64 = 0.3;
const DEFAULT_HOST: &str = "http://localhost:11434";

const PROMPT_TEMPLATE: &str = "\
You are an AI data researcher.
Using the text below, extract structured information about AI influencers active on {platform} in 2025.

Output a Markdown table with these columns:
| Name | Platform | Followers | Niche | Engagement | Content Type | Link | Source |

Context:
{context}
";

/// Client for a locally hosted Ollama model.
pub struct OllamaClient {
    host: String,
    client: reqwest::Client,
}

impl OllamaClient {
    pub fn new(host: String) -> Self {
        Self {
            host,
            client: reqwest::Client::new(),
        }
    }

    /// Host comes from OLLAMA_HOST, falling back to the local default.
    pub fn from_env() -> Self {
        let host = std::env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        Self::new(host)
    }

    /// Fill the extraction prompt and ask the model for a Markdown table.
    /// Returns the model's literal response text, unvalidated.
    pub async fn summarize(&self, platform: &str, context: &str) -> Result<String> {
        let prompt = render_prompt(platform, context);

        let body = serde_json::json!({
            "model": MODEL_NAME,
            "prompt": prompt,
            "stream": false,
            "options": {
                "temperature": TEMPERATURE,
            }
        });

        let url = format!("{}/api/generate", self.host);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Ollama request to {} failed", url))?;

        if !response.status().is_success() {
            return Err(anyhow!("Ollama generation failed: {}", response.status()));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .context("Failed to decode Ollama response")?;

        let text = json["response"]
            .as_str()
            .ok_or_else(|| anyhow!("No response field in Ollama output"))?
            .to_string();

        Ok(text)
    }
}

fn render_prompt(platform: &str, context: &str) -> String {
    PROMPT_TEMPLATE
        .replace("{platform}", platform)
        .replace("{context}", context)
}

// ── Tests ──
