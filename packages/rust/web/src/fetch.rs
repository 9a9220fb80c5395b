//! HTTP page fetcher.

use std::time::Duration;

use reqwest::Client;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use kbforge_shared::{KbForgeError, Result};

/// User-Agent string for page requests.
const USER_AGENT: &str = concat!("kbforge/", env!("CARGO_PKG_VERSION"));

/// Element texts shorter than this many characters are treated as noise
/// (button labels, breadcrumbs) and dropped.
const MIN_ELEMENT_CHARS: usize = 10;

// ---------------------------------------------------------------------------
// PageFetcher
// ---------------------------------------------------------------------------

/// Fetches a web page and extracts its content-bearing element texts.
pub struct PageFetcher {
    client: Client,
    include_headings: bool,
}

impl PageFetcher {
    /// Create a fetcher. `include_headings` adds `h2`/`h3` elements to the
    /// `p`/`li` selection.
    pub fn new(include_headings: bool) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| KbForgeError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            include_headings,
        })
    }

    /// GET `url` and return the page's element texts in document order.
    ///
    /// Non-success status codes are errors; noise elements are already
    /// filtered out of the returned blocks.
    pub async fn fetch_blocks(&self, url: &Url) -> Result<Vec<String>> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| KbForgeError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(KbForgeError::Network(format!("{url}: HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| KbForgeError::Network(format!("{url}: {e}")))?;

        let blocks = extract_blocks(&body, self.include_headings);
        debug!(url = %url, blocks = blocks.len(), "fetched page");
        Ok(blocks)
    }
}

// ---------------------------------------------------------------------------
// Block extraction
// ---------------------------------------------------------------------------

/// Extract content-bearing element texts from an HTML document.
///
/// Selects `p` and `li` elements (plus `h2`/`h3` when `include_headings`),
/// in document order, and drops texts under [`MIN_ELEMENT_CHARS`].
pub fn extract_blocks(html: &str, include_headings: bool) -> Vec<String> {
    let doc = Html::parse_document(html);
    let selector = if include_headings {
        Selector::parse("h2, h3, p, li").unwrap()
    } else {
        Selector::parse("p, li").unwrap()
    };

    doc.select(&selector)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| text.chars().count() >= MIN_ELEMENT_CHARS)
        .collect()
}
