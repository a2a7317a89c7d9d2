//! `CatalogService` over HTTP/JSON using the blocking reqwest client.

use crate::client::CatalogService;
use crate::model::product::{CategoriesResponse, SubcategoriesResponse};
use crate::model::{
    FetchFailure, OrderReceipt, OrderRequest, QueryState, ResultPage, SearchResponse,
};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// HTTP implementation of the catalog service.
#[derive(Clone)]
pub struct HttpCatalog {
    client: Client,
    base_url: String,
    api_token: Option<String>,
}

// The token must never reach the log file.
impl fmt::Debug for HttpCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpCatalog")
            .field("base_url", &self.base_url)
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl HttpCatalog {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:5000/api`).
    pub fn new(
        base_url: &str,
        timeout: Duration,
        api_token: Option<String>,
    ) -> Result<Self, FetchFailure> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchFailure::client(format!("Could not build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// API root without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn get(&self, url: Url) -> RequestBuilder {
        self.client
            .get(url)
            .header(USER_AGENT, concat!("catbrowse/", env!("CARGO_PKG_VERSION")))
            .header(ACCEPT, "application/json")
    }

    fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchFailure> {
        debug!(%url, "GET");
        let response = self.get(url).send().map_err(classify_error)?;
        read_json(response)
    }
}

/// Build the `/product/search` URL for one page of `query`.
///
/// Absent filters are omitted; the term and sort are always sent.
pub fn search_url(base_url: &str, query: &QueryState, page_size: u32) -> Result<Url, FetchFailure> {
    let filters = query.filters();
    let mut params: Vec<(&str, String)> = vec![("q", query.term().to_string())];
    if let Some(category) = &filters.category {
        params.push(("category", category.clone()));
    }
    if let Some(subcategory) = &filters.subcategory {
        params.push(("subcategory", subcategory.clone()));
    }
    if let Some(min) = filters.min_price {
        params.push(("minPrice", min.to_string()));
    }
    if let Some(max) = filters.max_price {
        params.push(("maxPrice", max.to_string()));
    }
    params.push(("sort", query.sort().wire_value().to_string()));
    params.push(("page", query.page().to_string()));
    params.push(("limit", page_size.max(1).to_string()));

    let base = format!("{}/product/search", base_url.trim_end_matches('/'));
    Url::parse_with_params(&base, &params)
        .map_err(|e| FetchFailure::client(format!("Invalid catalog URL {base}: {e}")))
}

fn parse_url(raw: &str) -> Result<Url, FetchFailure> {
    Url::parse(raw).map_err(|e| FetchFailure::client(format!("Invalid catalog URL {raw}: {e}")))
}

// ===== Failure classification =====

/// Error body shape the service uses for rejected requests.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Map a non-success status to a failure kind.
///
/// 408 and 429 are the client-range statuses worth retrying.
pub fn classify_status(status: StatusCode, body: &str) -> FetchFailure {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .ok()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });
    let reason = format!("HTTP {}: {}", status.as_u16(), detail);

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS => {
            FetchFailure::transient(reason)
        }
        s if s.is_client_error() => FetchFailure::client(reason),
        _ => FetchFailure::transient(reason),
    }
}

/// Map a transport error to a failure kind.
pub fn classify_error(err: reqwest::Error) -> FetchFailure {
    if err.is_builder() {
        return FetchFailure::client(format!("Invalid request: {err}"));
    }
    if let Some(status) = err.status() {
        return classify_status(status, "");
    }
    let reason = if err.is_timeout() {
        "Request timed out".to_string()
    } else if err.is_connect() {
        "Could not reach the catalog service".to_string()
    } else if err.is_decode() {
        format!("Unexpected response from the catalog service: {err}")
    } else {
        format!("Network error: {err}")
    };
    FetchFailure::transient(reason)
}

fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, FetchFailure> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(classify_status(status, &body));
    }
    response.json::<T>().map_err(classify_error)
}

// ===== CatalogService =====

impl CatalogService for HttpCatalog {
    fn search(&self, query: &QueryState, page_size: u32) -> Result<ResultPage, FetchFailure> {
        let url = search_url(&self.base_url, query, page_size)?;
        let response: SearchResponse = self.fetch_json(url)?;
        Ok(response.into())
    }

    fn list_categories(&self) -> Result<Vec<String>, FetchFailure> {
        let url = parse_url(&self.endpoint("category"))?;
        let response: CategoriesResponse = self.fetch_json(url)?;
        Ok(response
            .categories
            .into_iter()
            .map(|c| c.category_name)
            .collect())
    }

    fn list_subcategories(&self) -> Result<Vec<String>, FetchFailure> {
        let url = parse_url(&self.endpoint("subcategory"))?;
        let response: SubcategoriesResponse = self.fetch_json(url)?;
        Ok(response.subcategories.into_iter().map(|s| s.name).collect())
    }

    fn create_order(&self, order: &OrderRequest) -> Result<OrderReceipt, FetchFailure> {
        let url = parse_url(&self.endpoint("order/create"))?;
        debug!(%url, "POST");

        let mut request = self
            .client
            .post(url)
            .header(USER_AGENT, concat!("catbrowse/", env!("CARGO_PKG_VERSION")))
            .json(order);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().map_err(classify_error)?;
        let created: OrderCreated = read_json(response)?;
        Ok(OrderReceipt {
            order_id: created.order.and_then(|o| o.id),
        })
    }
}

/// `POST /order/create` response body. Only the id is used.
#[derive(Debug, Deserialize)]
struct OrderCreated {
    #[serde(default)]
    order: Option<CreatedOrder>,
}

#[derive(Debug, Deserialize)]
struct CreatedOrder {
    #[serde(rename = "_id", default)]
    id: Option<String>,
}
