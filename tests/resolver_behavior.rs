//! Behavioral tests for free-text symbol resolution.

use tickcast_tests::*;

#[tokio::test]
async fn ticker_shaped_query_never_touches_the_network() {
    // Given: A resolver whose transport would fail if used.
    let http = Arc::new(
        ScriptedHttpClient::new().with_route("/v1/finance/search", Err(HttpError::new("down"))),
    );
    let resolver = TickerResolver::new(Arc::clone(&http) as Arc<dyn HttpClient>);

    // When: The query already looks like a ticker.
    let resolution = resolver.resolve("INFY").await;

    // Then: The default suffix is appended locally.
    assert_eq!(resolution.symbol.as_str(), "INFY.NS");
    assert_eq!(http.request_count(), 0);
}

#[tokio::test]
async fn search_result_on_preferred_exchange_wins() {
    // Given: A search response listing a US ADR before the NSE listing.
    let body = serde_json::json!({
        "quotes": [
            { "symbol": "TTM", "exchange": "NYQ" },
            { "symbol": "TATAMOTORS.NS", "exchange": "NSI" },
        ]
    })
    .to_string();
    let http = Arc::new(
        ScriptedHttpClient::new().with_route("/v1/finance/search", Ok(HttpResponse::ok(body))),
    );
    let resolver = TickerResolver::new(http as Arc<dyn HttpClient>);

    // When: A lowercase company name is resolved.
    let resolution = resolver.resolve("tata motors").await;

    // Then: The NSE listing is chosen over the first result.
    assert_eq!(resolution.symbol.as_str(), "TATAMOTORS.NS");
    assert!(resolution.warnings.is_empty());
}

#[tokio::test]
async fn first_result_is_used_when_nothing_is_preferred() {
    let body = serde_json::json!({
        "quotes": [
            { "symbol": "TTM", "exchange": "NYQ" },
        ]
    })
    .to_string();
    let http = Arc::new(
        ScriptedHttpClient::new().with_route("/v1/finance/search", Ok(HttpResponse::ok(body))),
    );
    let resolver = TickerResolver::new(http as Arc<dyn HttpClient>);

    let resolution = resolver.resolve("tata motors adr").await;
    assert_eq!(resolution.symbol.as_str(), "TTM");
}

#[tokio::test]
async fn search_outage_falls_back_to_heuristic_guess() {
    // Given: A search endpoint that is down.
    let http = Arc::new(
        ScriptedHttpClient::new()
            .with_route("/v1/finance/search", Err(HttpError::new("timeout"))),
    );
    let resolver = TickerResolver::new(http as Arc<dyn HttpClient>);

    // When: A company name is resolved.
    let resolution = resolver.resolve("tata motors").await;

    // Then: Whitespace is stripped, the name uppercased, and the default
    // suffix appended, with a warning about the degradation.
    assert_eq!(resolution.symbol.as_str(), "TATAMOTORS.NS");
    assert!(resolution
        .warnings
        .iter()
        .any(|warning| warning.contains("search failed")));
}

#[tokio::test]
async fn unsalvageable_query_falls_back_to_default_symbol() {
    let http = Arc::new(
        ScriptedHttpClient::new()
            .with_route("/v1/finance/search", Err(HttpError::new("timeout"))),
    );
    let resolver = TickerResolver::new(http as Arc<dyn HttpClient>);

    // Starts with a digit even after normalization, so no symbol can be
    // formed from it.
    let resolution = resolver.resolve("3 idiots fan club").await;
    assert_eq!(resolution.symbol.as_str(), "IRB.NS");
    assert!(resolution.warnings.len() >= 2);
}
