//! News headline acquisition and sentiment aggregation.
//!
//! Sentiment is a soft input: any transport or feed fault degrades to a
//! neutral mood with a warning instead of failing the pipeline.

mod lexicon;

pub use lexicon::LexiconScorer;

use std::sync::Arc;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::domain::{Headline, MoodScore, Symbol, UtcDateTime};
use crate::http_client::{HttpClient, HttpRequest};

/// Configuration for the news sentiment service.
#[derive(Debug, Clone)]
pub struct SentimentConfig {
    pub feed_endpoint: String,
    /// Appended to the bare ticker to form the feed query.
    pub query_suffix: String,
    /// Locale parameters forwarded verbatim to the feed.
    pub locale_params: String,
    pub timeout_ms: u64,
    /// Most recent headlines considered for the aggregate mood.
    pub max_headlines: usize,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            feed_endpoint: String::from("https://news.google.com/rss/search"),
            query_suffix: String::from("stock india"),
            locale_params: String::from("hl=en-IN&gl=IN&ceid=IN:en"),
            timeout_ms: 5_000,
            max_headlines: 10,
        }
    }
}

/// Aggregated sentiment with the scored headlines behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct SentimentReport {
    pub mood: MoodScore,
    pub headlines: Vec<Headline>,
    pub warnings: Vec<String>,
}

impl SentimentReport {
    fn neutral(warning: String) -> Self {
        Self {
            mood: MoodScore::neutral(),
            headlines: Vec::new(),
            warnings: vec![warning],
        }
    }
}

struct FeedItem {
    title: String,
    pub_date: String,
}

/// Scores recent news headlines for a symbol.
pub struct NewsSentimentService {
    config: SentimentConfig,
    scorer: LexiconScorer,
    http: Arc<dyn HttpClient>,
}

impl NewsSentimentService {
    pub fn new(http: Arc<dyn HttpClient>) -> Self {
        Self::with_config(SentimentConfig::default(), http)
    }

    pub fn with_config(config: SentimentConfig, http: Arc<dyn HttpClient>) -> Self {
        Self {
            config,
            scorer: LexiconScorer::new(),
            http,
        }
    }

    pub fn config(&self) -> &SentimentConfig {
        &self.config
    }

    /// Fetch, parse, and score the symbol's news feed.
    pub async fn score(&self, symbol: &Symbol) -> SentimentReport {
        let query = format!(
            "{} {}",
            symbol.without_market_suffix(),
            self.config.query_suffix
        );
        let url = format!(
            "{}?q={}&{}",
            self.config.feed_endpoint,
            urlencoding::encode(&query),
            self.config.locale_params
        );
        let request = HttpRequest::get(url).with_timeout_ms(self.config.timeout_ms);

        let response = match self.http.execute(request).await {
            Ok(response) if response.is_success() => response,
            Ok(response) => {
                return SentimentReport::neutral(format!(
                    "news feed returned status {}, assuming neutral mood",
                    response.status
                ));
            }
            Err(error) => {
                return SentimentReport::neutral(format!(
                    "news feed unavailable ({error}), assuming neutral mood"
                ));
            }
        };

        let items = match parse_feed(&response.body) {
            Ok(items) => items,
            Err(reason) => {
                return SentimentReport::neutral(format!(
                    "news feed unparseable ({reason}), assuming neutral mood"
                ));
            }
        };

        let mut warnings = Vec::new();
        let mut headlines = Vec::new();
        for item in items.into_iter().take(self.config.max_headlines) {
            // Every titled item counts toward the mood; a bad timestamp
            // only costs the display field.
            let published_at = match UtcDateTime::parse_rfc2822(&item.pub_date) {
                Ok(parsed) => Some(parsed),
                Err(_) => {
                    warnings.push(format!(
                        "headline timestamp unparseable: '{}'",
                        item.pub_date
                    ));
                    None
                }
            };

            let sentiment = self.scorer.score(&item.title);
            match Headline::new(item.title, published_at, sentiment) {
                Ok(headline) => headlines.push(headline),
                Err(error) => warnings.push(format!("skipping headline: {error}")),
            }
        }

        let scores: Vec<f64> = headlines.iter().map(|h| h.sentiment).collect();
        SentimentReport {
            mood: MoodScore::from_headline_scores(&scores),
            headlines,
            warnings,
        }
    }
}

/// Pull `<item>` titles and publish dates out of an RSS document.
fn parse_feed(xml: &str) -> Result<Vec<FeedItem>, String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut items = Vec::new();
    let mut in_item = false;
    let mut field: Option<Field> = None;
    let mut title = String::new();
    let mut pub_date = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => match e.name().as_ref() {
                b"item" => {
                    in_item = true;
                    title.clear();
                    pub_date.clear();
                }
                b"title" if in_item => field = Some(Field::Title),
                b"pubDate" if in_item => field = Some(Field::PubDate),
                _ => {}
            },
            Ok(Event::Text(t)) => {
                if let Some(current) = field {
                    let text = t.unescape().map_err(|e| e.to_string())?;
                    match current {
                        Field::Title => title.push_str(&text),
                        Field::PubDate => pub_date.push_str(&text),
                    }
                }
            }
            Ok(Event::CData(t)) => {
                if let Some(current) = field {
                    let text = String::from_utf8_lossy(&t).into_owned();
                    match current {
                        Field::Title => title.push_str(&text),
                        Field::PubDate => pub_date.push_str(&text),
                    }
                }
            }
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"item" => {
                    in_item = false;
                    if !title.is_empty() && !pub_date.is_empty() {
                        items.push(FeedItem {
                            title: std::mem::take(&mut title),
                            pub_date: std::mem::take(&mut pub_date),
                        });
                    }
                }
                b"title" | b"pubDate" => field = None,
                _ => {}
            },
            Ok(Event::Eof) => {
                if in_item {
                    return Err(String::from("feed truncated inside an item"));
                }
                break;
            }
            Ok(_) => {}
            Err(e) => return Err(e.to_string()),
        }
    }

    Ok(items)
}

#[derive(Clone, Copy)]
enum Field {
    Title,
    PubDate,
}
