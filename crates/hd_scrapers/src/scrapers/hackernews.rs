use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use reqwest::{Client, StatusCode};
use scraper::{ElementRef, Html, Selector};
use url::Url;
use hd_core::{DigestConfig, Error, Result, Story};
use crate::logging::Logger;
use super::{utils, StorySource};

pub const HN_URL: &str = "https://news.ycombinator.com/";

/// One parsed listing page.
#[derive(Debug, Default)]
pub struct ListingPage {
    /// `tr.athing` rows seen, including the ones that failed to parse
    pub rows: usize,
    pub stories: Vec<Story>,
}

struct ListingSelectors {
    row: Selector,
    title_link: Selector,
    age: Selector,
    age_link: Selector,
    score: Selector,
}

impl ListingSelectors {
    fn new() -> Result<Self> {
        Ok(Self {
            row: utils::selector("tr.athing")?,
            title_link: utils::selector("span.titleline > a")?,
            age: utils::selector("span.age")?,
            age_link: utils::selector("a")?,
            score: utils::selector("span.score")?,
        })
    }
}

pub fn parse_listing(html: &str, base: &Url, now: DateTime<Utc>) -> Result<ListingPage> {
    let document = Html::parse_document(html);
    let selectors = ListingSelectors::new()?;
    let mut page = ListingPage::default();

    for row in document.select(&selectors.row) {
        page.rows += 1;
        match parse_row(row, &selectors, base, now) {
            Some(story) => page.stories.push(story),
            None => tracing::debug!("Skipping malformed row {:?}", row.value().attr("id")),
        }
    }

    Ok(page)
}

fn parse_row(row: ElementRef, selectors: &ListingSelectors, base: &Url, now: DateTime<Utc>) -> Option<Story> {
    let id = row.value().attr("id")?.to_string();
    let link = row.select(&selectors.title_link).next()?;
    let title = link.text().collect::<String>().trim().to_string();
    let url = utils::resolve_url(base, link.value().attr("href")?).ok()?;

    // Age and score live in the row right after the title row
    let subtext = row.next_siblings().find_map(ElementRef::wrap)?;
    if subtext.value().name() != "tr" {
        return None;
    }

    let age = subtext.select(&selectors.age).next()?;
    let age_text = utils::extract_text(&age, &selectors.age_link)
        .unwrap_or_else(|| age.text().collect::<String>().trim().to_string());
    let date = match age.value().attr("title").and_then(parse_age_title) {
        Some(date) => date,
        None => parse_relative_age(&age_text, now)?,
    };

    let score = match utils::extract_text(&subtext, &selectors.score) {
        Some(points) => points.split_whitespace().next()?.parse().ok()?,
        None => 0,
    };

    Some(Story {
        id,
        title,
        url,
        score,
        age_text,
        date,
        content: None,
    })
}

/// Parses the `title` attribute of an age span, e.g. `2024-05-01T10:00:00 1714557600`.
pub fn parse_age_title(title: &str) -> Option<DateTime<Utc>> {
    let stamp = title.split_whitespace().next()?;
    if let Ok(date) = DateTime::parse_from_rfc3339(stamp) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(stamp, "%Y-%m-%dT%H:%M:%S")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Turns "3 hours ago" into a timestamp relative to `now`. Unknown formats map to `now`,
/// ages too large to represent give `None`.
pub fn parse_relative_age(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let Some(amount) = text.split_whitespace().next().and_then(|n| n.parse::<i64>().ok()) else {
        return Some(now);
    };

    let elapsed = if text.contains("minute") {
        Duration::try_minutes(amount)?
    } else if text.contains("hour") {
        Duration::try_hours(amount)?
    } else if text.contains("day") {
        Duration::try_days(amount)?
    } else if text.contains("month") {
        Duration::try_days(amount.checked_mul(30)?)?
    } else if text.contains("year") {
        Duration::try_days(amount.checked_mul(365)?)?
    } else {
        return Some(now);
    };

    now.checked_sub_signed(elapsed)
}

/// Oldest date kept when looking back `days` from `now`.
pub fn cutoff_date(days: i64, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
    Duration::try_days(days)
        .and_then(|window| now.checked_sub_signed(window))
        .ok_or_else(|| Error::Config(format!("days out of range: {}", days)))
}

/// True once the newest page ends more than a day past the cutoff.
pub fn reached_cutoff(stories: &[Story], cutoff: DateTime<Utc>) -> bool {
    let Some(limit) = cutoff.checked_sub_signed(Duration::days(1)) else {
        return false;
    };
    stories.last().map_or(false, |last| last.date < limit)
}

#[derive(Debug, Clone)]
pub struct HackerNewsScraper {
    client: Client,
    base_url: Url,
    page_delay: std::time::Duration,
    logger: Logger,
}

impl HackerNewsScraper {
    pub fn new(config: &DigestConfig) -> Result<Self> {
        Self::with_base_url(HN_URL, config)
    }

    pub fn with_base_url(base_url: &str, config: &DigestConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            base_url: utils::parse_url(base_url)?,
            page_delay: config.page_delay,
            logger: Logger::new().with_prefix("[hn]".to_string()),
        })
    }

    pub fn page_url(&self, page: u32) -> String {
        format!("{}news?p={}", self.base_url, page)
    }

    /// `None` when the listing answers with anything but 200.
    async fn fetch_page(&self, page: u32) -> Result<Option<String>> {
        let response = self.client.get(self.page_url(page)).send().await?;
        if response.status() != StatusCode::OK {
            self.logger.warn(&format!("Page {} returned {}", page, response.status()));
            return Ok(None);
        }
        Ok(Some(response.text().await?))
    }
}

#[async_trait]
impl StorySource for HackerNewsScraper {
    fn source(&self) -> &str {
        "Hacker News"
    }

    async fn fetch_stories(&self, days: i64, max_pages: u32) -> Result<Vec<Story>> {
        let cutoff = cutoff_date(days, Utc::now())?;
        let mut stories = Vec::new();

        for page in 1..=max_pages {
            let logger = self.logger.clone().with_prefix(format!("[page {}]", page));
            logger.info("Scraping page...");

            let html = match self.fetch_page(page).await {
                Ok(Some(html)) => html,
                Ok(None) => break,
                Err(e) => {
                    logger.error(&format!("Error fetching page: {}", e));
                    break;
                }
            };

            let mut listing = parse_listing(&html, &self.base_url, Utc::now())?;
            if listing.rows == 0 {
                logger.info("No more stories");
                break;
            }
            logger.debug(&format!("Parsed {}/{} rows", listing.stories.len(), listing.rows));
            stories.append(&mut listing.stories);

            if reached_cutoff(&stories, cutoff) {
                logger.info("Reached articles older than limit.");
                break;
            }

            if page < max_pages {
                tokio::time::sleep(self.page_delay).await;
            }
        }

        stories.retain(|story| story.date >= cutoff);
        Ok(stories)
    }
}
