//! Free-text query to exchange symbol resolution.
//!
//! Resolution is best effort: a failed or empty lookup degrades to a
//! heuristic guess and finally to the configured default symbol, never
//! to an error.

use std::sync::Arc;

use serde::Deserialize;

use crate::domain::{Symbol, DEFAULT_MARKET_SUFFIX};
use crate::http_client::{HttpClient, HttpRequest};

/// Configuration for the symbol resolver.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub search_endpoint: String,
    /// Exchange codes tried first when scanning search candidates.
    pub preferred_exchanges: Vec<String>,
    /// Symbol used when nothing about the query can be salvaged.
    pub default_symbol: Symbol,
    pub timeout_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            search_endpoint: String::from("https://query2.finance.yahoo.com/v1/finance/search"),
            preferred_exchanges: vec![String::from("NSI"), String::from("BSE")],
            default_symbol: Symbol::parse("IRB.NS").unwrap_or_else(|_| {
                unreachable!("default symbol literal is valid")
            }),
            timeout_ms: 5_000,
        }
    }
}

/// Outcome of a resolution, with any degradation notes.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub symbol: Symbol,
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    quotes: Vec<SearchQuote>,
}

#[derive(Debug, Deserialize)]
struct SearchQuote {
    symbol: Option<String>,
    exchange: Option<String>,
}

/// Resolves free-text company queries to exchange symbols.
pub struct TickerResolver {
    config: ResolverConfig,
    http: Arc<dyn HttpClient>,
}

impl TickerResolver {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self::with_config(ResolverConfig::default(), http)
    }

    pub fn with_config(config: ResolverConfig, http: Arc<dyn HttpClient>) -> Self {
        Self { config, http }
    }

    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve a query to a symbol. Queries that already look like tickers
    /// skip the network entirely.
    pub async fn resolve(&self, query: &str) -> Resolution {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Resolution {
                symbol: self.config.default_symbol.clone(),
                warnings: vec![String::from("empty query, using default symbol")],
            };
        }

        let mut warnings = Vec::new();
        if looks_like_ticker(trimmed) {
            let symbol = self.heuristic_symbol(trimmed, &mut warnings);
            return Resolution { symbol, warnings };
        }
        match self.search(trimmed).await {
            Ok(Some(symbol)) => Resolution { symbol, warnings },
            Ok(None) => {
                warnings.push(format!("no search results for '{trimmed}', guessing symbol"));
                let symbol = self.heuristic_symbol(trimmed, &mut warnings);
                Resolution { symbol, warnings }
            }
            Err(reason) => {
                warnings.push(format!("symbol search failed ({reason}), guessing symbol"));
                let symbol = self.heuristic_symbol(trimmed, &mut warnings);
                Resolution { symbol, warnings }
            }
        }
    }

    async fn search(&self, query: &str) -> Result<Option<Symbol>, String> {
        let url = format!(
            "{}?q={}",
            self.config.search_endpoint,
            urlencoding::encode(query)
        );
        let request = HttpRequest::get(url).with_timeout_ms(self.config.timeout_ms);

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| e.message().to_owned())?;
        if !response.is_success() {
            return Err(format!("status {}", response.status));
        }

        let parsed: SearchResponse =
            serde_json::from_str(&response.body).map_err(|e| e.to_string())?;

        Ok(self.pick_candidate(&parsed.quotes))
    }

    /// Prefer listings on the configured exchanges, then fall back to the
    /// first parseable candidate.
    fn pick_candidate(&self, quotes: &[SearchQuote]) -> Option<Symbol> {
        let preferred = quotes.iter().find(|quote| {
            let on_exchange = quote
                .exchange
                .as_deref()
                .is_some_and(|code| self.config.preferred_exchanges.iter().any(|p| p == code));
            let suffixed = quote
                .symbol
                .as_deref()
                .and_then(|raw| Symbol::parse(raw).ok())
                .is_some_and(|symbol| symbol.has_market_suffix());
            on_exchange || suffixed
        });

        preferred
            .into_iter()
            .chain(quotes.iter())
            .filter_map(|quote| quote.symbol.as_deref())
            .find_map(|raw| Symbol::parse(raw).ok())
    }

    /// Strip whitespace, uppercase, and append the default exchange suffix.
    /// Unsalvageable input falls back to the default symbol.
    fn heuristic_symbol(&self, query: &str, warnings: &mut Vec<String>) -> Symbol {
        let compact: String = query.chars().filter(|ch| !ch.is_whitespace()).collect();
        let upper = compact.to_ascii_uppercase();

        let candidate = match Symbol::parse(&upper) {
            Ok(symbol) if symbol.has_market_suffix() => return symbol,
            Ok(_) => format!("{upper}{DEFAULT_MARKET_SUFFIX}"),
            Err(_) => {
                warnings.push(format!(
                    "query '{query}' is not a valid symbol, using default"
                ));
                return self.config.default_symbol.clone();
            }
        };

        Symbol::parse(&candidate).unwrap_or_else(|_| self.config.default_symbol.clone())
    }
}

/// Short, mostly-uppercase, whitespace-free input is treated as a ticker.
fn looks_like_ticker(query: &str) -> bool {
    if query.chars().any(char::is_whitespace) {
        return false;
    }
    let total = query.chars().count();
    let upper = query.chars().filter(|ch| ch.is_ascii_uppercase()).count();
    total > 0 && upper * 2 > total
}
