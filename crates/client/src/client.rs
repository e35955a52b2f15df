use std::time::Instant;

use chrono::Local;
use reqwest::header::USER_AGENT;
use tracing::{debug, info};
use whereis_models::Page;

use crate::error::{Error, Result};
use crate::query::Query;
use crate::trace::TraceSink;

pub const WHEREIS_PATH: &str = "/api/whereis";

/// A single authenticated lookup.
#[derive(Debug, Clone, Copy)]
pub struct Request<'a> {
    pub token: &'a str,
    pub query: &'a Query,
}

/// Source of whereis pages.
#[allow(async_fn_in_trait)]
pub trait WhereisApi {
    async fn fetch(&self, request: &Request<'_>, trace: &mut dyn TraceSink) -> Result<Page>;
}

/// `WhereisApi` over HTTP.
#[derive(Debug, Clone)]
pub struct WhereisClient {
    http: reqwest::Client,
    base_url: String,
    user_agent: String,
}

impl WhereisClient {
    pub fn new(base_url: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url, user_agent)
    }

    pub fn with_http(
        http: reqwest::Client,
        base_url: impl Into<String>,
        user_agent: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            user_agent: user_agent.into(),
        }
    }

    pub fn endpoint(&self) -> String {
        format!("{}{WHEREIS_PATH}", self.base_url.trim_end_matches('/'))
    }
}

impl WhereisApi for WhereisClient {
    async fn fetch(&self, request: &Request<'_>, trace: &mut dyn TraceSink) -> Result<Page> {
        let req = self
            .http
            .get(self.endpoint())
            .query(&request.query.params())
            .bearer_auth(request.token)
            .header(USER_AGENT, &self.user_agent)
            .build()?;

        trace.trace(&format!("{} {}", req.method(), req.url()));
        for (name, value) in req.headers() {
            trace.trace(&format!("Header: {}: {}", name, value.to_str().unwrap_or("<binary>")));
        }
        debug!(url = %req.url(), "sending request");

        let started = Instant::now();
        let resp = match self.http.execute(req).await {
            Ok(resp) => resp,
            Err(e) => {
                trace.trace(&format!("Error: {e}"));
                return Err(e.into());
            }
        };
        let status = resp.status();
        trace.trace(&format!("Status: {status}"));
        trace.trace(&format!("Elapsed: {} ms", started.elapsed().as_millis()));
        trace.trace(&format!("Received: {}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f %:z")));

        // Body is traced for non-2xx responses too.
        let body = resp.text().await;
        match &body {
            Ok(text) => trace.trace(text),
            Err(e) => trace.trace(&format!("Error: {e}")),
        }
        if !status.is_success() {
            return Err(Error::Server { status: status.as_u16() });
        }

        let page = Page::decode(&body?)?;
        info!("Fetched {} of {} records", page.content.len(), page.total_elements);
        Ok(page)
    }
}
