//! hh.ru vacancies API client.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use vacancy_store::Query;

use crate::config::{SearchSettings, resolve_string, resolve_u32, resolve_u64};

use super::searcher::VacancySearcher;
use super::types::{VacanciesPage, Vacancy};

const DEFAULT_API_BASE_URL: &str = "https://api.hh.ru";
const DEFAULT_USER_AGENT: &str = concat!("vacancy-relay/", env!("CARGO_PKG_VERSION"));
const DEFAULT_PERIOD_DAYS: u32 = 1;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const HH_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Resolved search settings: env (`VACANCY_RELAY_SEARCH_*`) over YAML over defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HhClientConfig {
    /// API base URL, without the `/vacancies` path.
    pub api_base_url: String,
    /// `User-Agent` header; hh.ru rejects requests without one.
    pub user_agent: String,
    /// Recency filter (`period` parameter) in days.
    pub period_days: u32,
    /// Whole-request timeout.
    pub request_timeout: Duration,
}

impl Default for HhClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            period_days: DEFAULT_PERIOD_DAYS,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl HhClientConfig {
    /// Resolve through an arbitrary env lookup.
    pub fn from_lookup<F>(lookup: F, settings: Option<&SearchSettings>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            api_base_url: resolve_string(
                &lookup,
                "VACANCY_RELAY_SEARCH_API_BASE_URL",
                settings.and_then(|s| s.api_base_url.as_deref()),
                &defaults.api_base_url,
            ),
            user_agent: resolve_string(
                &lookup,
                "VACANCY_RELAY_SEARCH_USER_AGENT",
                settings.and_then(|s| s.user_agent.as_deref()),
                &defaults.user_agent,
            ),
            period_days: resolve_u32(
                &lookup,
                "VACANCY_RELAY_SEARCH_PERIOD_DAYS",
                settings.and_then(|s| s.period_days),
                defaults.period_days,
            ),
            request_timeout: Duration::from_secs(resolve_u64(
                &lookup,
                "VACANCY_RELAY_SEARCH_REQUEST_TIMEOUT_SECS",
                settings.and_then(|s| s.request_timeout_secs),
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )),
        }
    }
}

/// [`VacancySearcher`] backed by `GET {api_base_url}/vacancies`.
pub struct HhClient {
    api_base_url: String,
    client: reqwest::Client,
}

impl HhClient {
    /// Build a client; falls back to a default HTTP client if the builder fails.
    pub fn new(config: &HhClientConfig) -> Self {
        let client = match reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(Duration::from_secs(HH_CONNECT_TIMEOUT_SECS))
            .timeout(config.request_timeout)
            .build()
        {
            Ok(client) => client,
            Err(error) => {
                tracing::warn!(
                    error = %error,
                    "Failed to build hh.ru HTTP client; falling back to default client"
                );
                reqwest::Client::new()
            }
        };
        Self {
            api_base_url: config.api_base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn vacancies_url(&self) -> String {
        format!("{}/vacancies", self.api_base_url)
    }
}

/// Query string for one saved query. `experience` is left out for the "any" bucket.
pub(crate) fn search_params(query: &Query, period_days: u32) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("area", query.area.to_string()),
        ("professional_role", query.role.to_string()),
        ("text", query.text.clone()),
        ("period", period_days.to_string()),
    ];
    if let Some(experience) = query.experience.api_id() {
        params.push(("experience", experience.to_string()));
    }
    params
}

#[async_trait]
impl VacancySearcher for HhClient {
    async fn search(&self, query: &Query, period_days: u32) -> anyhow::Result<Vec<Vacancy>> {
        let params = search_params(query, period_days);
        let response = self
            .client
            .get(self.vacancies_url())
            .query(&params)
            .send()
            .await
            .with_context(|| format!("hh.ru vacancies request failed for `{}`", query.canonical()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("hh.ru vacancies HTTP error (status={status}): {body}");
        }

        let page: VacanciesPage = response
            .json()
            .await
            .context("failed to decode hh.ru vacancies response")?;
        tracing::debug!(
            query = %query.canonical(),
            found = page.found,
            items = page.items.len(),
            "hh.ru search completed"
        );
        Ok(page.items)
    }
}
