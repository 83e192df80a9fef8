//! The request/response actions behind the HTTP surface.
//!
//! Every action returns an [`ActionResponse`]. Upstream failures are absorbed
//! into fallback data where a fallback exists; only validation, missing
//! current conditions and unexpected task failures reach `error`.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use shuddh_airquality::{simulate_forecast, AirQualityService, ForecastInput};
use shuddh_core::{
    AdvisoryLocation, AdvisoryResult, AdvisoryUser, AppConfig, Coordinates, Entropy,
};
use shuddh_llm::flows::{self, AdvisoryPrompt, TipsPrompt};
use shuddh_llm::{GeminiClient, LlmError, TextGenerator};
use shuddh_news::NewsAggregator;

use crate::error::{ActionErrorKind, AdvisoryError};
use crate::requests::{
    ChatRequest, HealthForm, HealthReportRequest, NewsRequest, ReverseGeocodeRequest, TipsRequest,
    ValidHealthForm,
};
use crate::response::{
    ActionResponse, ChatReply, CityReply, HealthReportText, NewsDigest, TipsReply,
};

/// Used when the city cannot be geocoded (Hyderabad).
pub const FALLBACK_COORDINATES: Coordinates = Coordinates {
    latitude: 17.3850,
    longitude: 78.4867,
};

pub const FALLBACK_ADVISORY: &str = "The AI Health Advisory service is currently unavailable. Based on the current AQI, consider limiting outdoor activities if you are in a sensitive group. Those with respiratory conditions should be especially careful.";
pub const FALLBACK_CHAT_REPLY: &str =
    "I'm sorry, the Health Assistant is currently unavailable. Please try again later.";
pub const FALLBACK_TIPS: &str = "Could not generate AI-powered tips at the moment. \n\n**General advice:** To improve air quality, consider using public transport, conserving energy at home, and avoiding burning waste.";
pub const FALLBACK_NEWS_SUMMARY: &str = "The AI news summary is currently unavailable. Please browse the articles below for the latest updates.";
pub const REVERSE_GEOCODE_FAILED: &str =
    "Could not automatically determine your city. Please type it manually.";
pub const HEALTH_REPORT_FAILED: &str =
    "Could not read the health report. Please enter your health conditions manually.";

pub struct AdvisoryService {
    air_quality: Arc<AirQualityService>,
    news: NewsAggregator,
    llm: Option<Arc<dyn TextGenerator>>,
    rng_seed: Option<u64>,
}

impl AdvisoryService {
    #[must_use]
    pub fn new(
        air_quality: AirQualityService,
        news: NewsAggregator,
        llm: Option<Arc<dyn TextGenerator>>,
        rng_seed: Option<u64>,
    ) -> Self {
        Self {
            air_quality: Arc::new(air_quality),
            news,
            llm,
            rng_seed,
        }
    }

    /// Wires production clients from `config`. Without a Gemini key every
    /// LLM-backed step takes its fallback path.
    ///
    /// # Errors
    ///
    /// Returns an [`AdvisoryError`] if any HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, AdvisoryError> {
        let llm: Option<Arc<dyn TextGenerator>> = match &config.keys.gemini {
            Some(key) => Some(Arc::new(GeminiClient::new(
                key,
                &config.llm_model,
                config.http_timeout_secs,
            )?)),
            None => None,
        };

        let air_quality = AirQualityService::from_config(config)?;
        let news = NewsAggregator::from_config(config, llm.clone())?;
        Ok(Self::new(air_quality, news, llm, config.rng_seed))
    }

    /// Name and configuration state of every upstream source.
    #[must_use]
    pub fn configured_sources(&self) -> Vec<(&'static str, bool)> {
        let mut sources: Vec<_> = self.air_quality.configured_sources().to_vec();
        sources.extend(self.news.configured_sources());
        sources.push(("gemini", self.llm.is_some()));
        sources
    }

    fn generator(&self) -> Result<&dyn TextGenerator, LlmError> {
        self.llm.as_deref().ok_or(LlmError::NotConfigured)
    }

    /// Validate → geocode → snapshot → (advisory ‖ simulated forecast) → result.
    pub async fn get_health_advisory(&self, form: HealthForm) -> ActionResponse<AdvisoryResult> {
        let form = match form.validate() {
            Ok(form) => form,
            Err(e) => return ActionResponse::from_error(&e),
        };

        match self.advise(form, Utc::now().date_naive()).await {
            Ok(result) => ActionResponse::ok(result),
            Err(e) => {
                tracing::warn!(error = %e, "health advisory failed");
                ActionResponse::from_error(&e)
            }
        }
    }

    async fn advise(
        &self,
        form: ValidHealthForm,
        today: NaiveDate,
    ) -> Result<AdvisoryResult, AdvisoryError> {
        let coords = self.geocode_or_fallback(&form.location).await;
        let mut entropy = Entropy::from_seed(self.rng_seed);

        let air_quality = Arc::clone(&self.air_quality);
        let mut snapshot_entropy = entropy.fork();
        let snapshot = tokio::spawn(async move {
            air_quality
                .snapshot(coords, today, &mut snapshot_entropy)
                .await
        })
        .await
        .map_err(|e| AdvisoryError::TaskFailed(e.to_string()))?;

        let current = snapshot.current.ok_or(AdvisoryError::NoCurrentData)?;

        let prompt = AdvisoryPrompt {
            name: form.name.clone(),
            age: form.age,
            location: form.location.clone(),
            health_conditions: form.conditions_for_prompt(),
            language: form.language.clone(),
            aqi: current.aqi,
            pollutants: current.pollutant_summary(),
        };
        let forecast_input = ForecastInput {
            current_aqi: f64::from(current.aqi),
            weather: current.weather,
            days: ForecastInput::DEFAULT_DAYS,
            history: &snapshot.forecast,
        };
        let mut forecast_entropy = entropy.fork();

        let (advisory, model_forecast) = tokio::join!(self.advisory_or_fallback(&prompt), async {
            simulate_forecast(&forecast_input, today, &mut forecast_entropy).unwrap_or_else(|e| {
                tracing::warn!(error = %e, "forecast simulation failed; returning no predictions");
                Vec::new()
            })
        });

        Ok(AdvisoryResult {
            current,
            forecast: snapshot.forecast,
            model_forecast,
            advisory,
            location: AdvisoryLocation {
                city: form.location,
                lat: coords.latitude,
                lon: coords.longitude,
            },
            user: AdvisoryUser { name: form.name },
        })
    }

    async fn geocode_or_fallback(&self, city: &str) -> Coordinates {
        let result = match self.generator() {
            Ok(generator) => flows::geocode_city(generator, city).await,
            Err(e) => Err(e),
        };
        result.unwrap_or_else(|e| {
            tracing::warn!(city, error = %e, "geocoding failed; using fallback coordinates");
            FALLBACK_COORDINATES
        })
    }

    async fn advisory_or_fallback(&self, prompt: &AdvisoryPrompt) -> String {
        let result = match self.generator() {
            Ok(generator) => flows::generate_health_advisory(generator, prompt).await,
            Err(e) => Err(e),
        };
        result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "advisory generation failed; using fallback text");
            FALLBACK_ADVISORY.to_string()
        })
    }

    pub async fn chat(&self, request: ChatRequest) -> ActionResponse<ChatReply> {
        let result = match self.generator() {
            Ok(generator) => flows::chat(generator, &request.message).await,
            Err(e) => Err(e),
        };
        let response = result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "chat failed; using fallback reply");
            FALLBACK_CHAT_REPLY.to_string()
        });
        ActionResponse::ok(ChatReply { response })
    }

    pub async fn get_pollution_reduction_tips(
        &self,
        request: TipsRequest,
    ) -> ActionResponse<TipsReply> {
        if let Err(e) = request.validate() {
            return ActionResponse::from_error(&e);
        }

        let prompt = TipsPrompt {
            location: request.location,
            aqi: request.aqi,
            pollutants: request.pollutants,
        };
        let result = match self.generator() {
            Ok(generator) => flows::generate_pollution_tips(generator, &prompt).await,
            Err(e) => Err(e),
        };
        let tips = result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "tips generation failed; using general advice");
            FALLBACK_TIPS.to_string()
        });
        ActionResponse::ok(TipsReply { tips })
    }

    pub async fn get_news(&self, request: NewsRequest) -> ActionResponse<NewsDigest> {
        if let Err(e) = request.validate() {
            return ActionResponse::from_error(&e);
        }

        let city = request.city.trim();
        let news_items = self.news.collect(city).await;
        if news_items.is_empty() {
            return ActionResponse::ok(NewsDigest {
                news_items,
                summary: flows::NO_NEWS_SUMMARY.to_string(),
            });
        }

        let result = match self.generator() {
            Ok(generator) => flows::summarize_news(generator, city, &news_items).await,
            Err(e) => Err(e),
        };
        let summary = result.unwrap_or_else(|e| {
            tracing::warn!(city, error = %e, "news summary failed; using fallback text");
            FALLBACK_NEWS_SUMMARY.to_string()
        });
        ActionResponse::ok(NewsDigest {
            news_items,
            summary,
        })
    }

    pub async fn reverse_geocode(
        &self,
        request: ReverseGeocodeRequest,
    ) -> ActionResponse<CityReply> {
        if let Err(e) = request.validate() {
            return ActionResponse::from_error(&e);
        }

        let result = match self.generator() {
            Ok(generator) => {
                flows::reverse_geocode(generator, request.latitude, request.longitude).await
            }
            Err(e) => Err(e),
        };
        match result {
            Ok(city) => ActionResponse::ok(CityReply { city }),
            Err(e) => {
                tracing::warn!(error = %e, "reverse geocoding failed");
                ActionResponse::fail(ActionErrorKind::Upstream, REVERSE_GEOCODE_FAILED)
            }
        }
    }

    pub async fn extract_health_report(
        &self,
        request: HealthReportRequest,
    ) -> ActionResponse<HealthReportText> {
        let result = match self.generator() {
            Ok(generator) => {
                flows::extract_health_report_text(generator, &request.report_data_uri).await
            }
            Err(e) => Err(e),
        };
        match result {
            Ok(extracted_text) => ActionResponse::ok(HealthReportText { extracted_text }),
            Err(LlmError::InvalidInput(detail)) => {
                tracing::warn!(%detail, "health report upload rejected");
                ActionResponse::fail(ActionErrorKind::Validation, HEALTH_REPORT_FAILED)
            }
            Err(e) => {
                tracing::warn!(error = %e, "health report extraction failed");
                ActionResponse::fail(ActionErrorKind::Upstream, HEALTH_REPORT_FAILED)
            }
        }
    }
}
