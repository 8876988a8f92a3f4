//! The weather agent: one free-text request in, one text reply out.

use std::sync::Arc;

use nowcast_mcp::{McpClient, Result};
use tracing::{debug, warn};

use crate::intent::Intent;
use crate::lexicon::{CityLexicon, KoreanMetroLexicon};
use crate::render;

/// Default city when a request names none.
pub const DEFAULT_CITY: &str = "서울";

/// Dispatches free-text requests to the MCP weather tools.
pub struct WeatherAgent {
    client: Arc<McpClient>,
    lexicon: Arc<dyn CityLexicon>,
    default_city: String,
}

impl WeatherAgent {
    /// Create an agent with the Korean metro lexicon and 서울 as default city.
    pub fn new(client: Arc<McpClient>) -> Self {
        Self {
            client,
            lexicon: Arc::new(KoreanMetroLexicon),
            default_city: DEFAULT_CITY.to_string(),
        }
    }

    /// Replace the city lexicon.
    pub fn with_lexicon(mut self, lexicon: impl CityLexicon + 'static) -> Self {
        self.lexicon = Arc::new(lexicon);
        self
    }

    /// Replace the default city.
    pub fn with_default_city(mut self, city: impl Into<String>) -> Self {
        self.default_city = city.into();
        self
    }

    /// The underlying MCP client.
    pub fn client(&self) -> &McpClient {
        &self.client
    }

    /// The city used when a request names none.
    pub fn default_city(&self) -> &str {
        &self.default_city
    }

    /// Classify a request without dispatching it.
    pub fn classify(&self, text: &str) -> Intent {
        Intent::classify(text, self.lexicon.as_ref(), &self.default_city)
    }

    /// Dispatch a request and render the tool result.
    ///
    /// Client failures are returned, not rendered.
    pub async fn respond(&self, text: &str) -> Result<String> {
        let intent = self.classify(text);
        debug!(?intent, "Dispatching request");

        match intent {
            Intent::Empty => Ok(render::EMPTY_INPUT_PROMPT.to_string()),
            Intent::ListCities => {
                let value = self.client.list_supported_cities().await?;
                Ok(render::render_cities(value))
            }
            Intent::CurrentWeather { city } => {
                let value = self.client.get_now_weather(&city).await?;
                Ok(render::render_weather(value))
            }
        }
    }

    /// Dispatch a request; classified errors are rendered into the reply.
    pub async fn invoke(&self, text: &str) -> String {
        match self.respond(text).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(
                    server = %self.client.name(),
                    kind = %e.kind(),
                    error = %e,
                    "Weather request failed"
                );
                render::render_error(&e)
            }
        }
    }
}
