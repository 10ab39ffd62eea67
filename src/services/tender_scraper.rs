use std::time::Duration;

use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use thirtyfour::{error::WebDriverError, prelude::ElementQueryable, By, WebDriver};
use thiserror::Error;

use crate::{
    configuration::ScraperSettings,
    domain::tender::{find_publication_date, PageRange, TenderRecord, TenderTable},
    services::Droid,
};

pub const TENDER_CARD_SELECTOR: &str = "div.col-12.col-md-12.mb-4";

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("webdriver error: {0}")]
    WebDriver(#[from] WebDriverError),
    #[error("csv export error: {0}")]
    Export(#[from] csv::Error),
}

// Query string mirrors the portal's own listing request, duplicate
// parameters included; only PageNumber varies.
pub fn listing_page_url(page: u32) -> String {
    format!("https://tenders.etimad.sa/Tender/AllTendersForVisitor?&MultipleSearch=&TenderCategory=&ReferenceNumber=&TenderNumber=&agency=&ConditionaBookletRange=&PublishDate=&LastOfferPresentationDate=&LastOfferPresentationDate=&TenderAreasIdString=&TenderTypeId=NaN&TenderSubActivityId=&AgencyCode=&FromLastOfferPresentationDateString=&ToLastOfferPresentationDateString=&SortDirection=DESC&Sort=SubmitionDate&PageSize=24&IsSearch=true&ConditionaBookletRange=&PublishDate=undefined&PageNumber={}", page)
}

#[async_trait]
pub trait ListingPageSource {
    // Ok(None) means the tender cards never appeared within the wait budget.
    async fn fetch_page(&self, page: u32) -> Result<Option<String>, ScrapeError>;
}

pub struct DriverPageSource<'a> {
    driver: &'a WebDriver,
    wait_timeout: Duration,
    poll_interval: Duration,
}

impl<'a> DriverPageSource<'a> {
    pub fn new(driver: &'a WebDriver, wait_timeout: Duration, poll_interval: Duration) -> Self {
        DriverPageSource {
            driver,
            wait_timeout,
            poll_interval,
        }
    }
}

#[async_trait]
impl ListingPageSource for DriverPageSource<'_> {
    async fn fetch_page(&self, page: u32) -> Result<Option<String>, ScrapeError> {
        let url = listing_page_url(page);
        self.driver.goto(&url).await?;

        let cards_present = self
            .driver
            .query(By::Css(TENDER_CARD_SELECTOR))
            .wait(self.wait_timeout, self.poll_interval)
            .exists()
            .await?;
        if !cards_present {
            return Ok(None);
        }

        let html = self.driver.source().await?;
        Ok(Some(html))
    }
}

pub trait ScrapeProgress {
    // Called once per completed page with its 1-based position in the range.
    fn page_done(&mut self, _completed: u32, _total: u32) {}
}

pub struct NullProgress;
impl ScrapeProgress for NullProgress {}

pub struct LogProgress;
impl ScrapeProgress for LogProgress {
    fn page_done(&mut self, completed: u32, total: u32) {
        let percent = completed * 100 / total;
        log::info!("Progress: {}/{} pages ({}%)", completed, total, percent);
    }
}

pub fn parse_listing_page(html: &str) -> Vec<TenderRecord> {
    let card_selector = Selector::parse(TENDER_CARD_SELECTOR).unwrap();
    let type_selector = Selector::parse("span.badge.badge-primary").unwrap();
    let title_selector = Selector::parse("h3").unwrap();
    let authority_wrapper_selector = Selector::parse("div.col-12").unwrap();
    let paragraph_selector = Selector::parse("p").unwrap();

    let document = Html::parse_document(html);

    document
        .select(&card_selector)
        .map(|card| {
            let text = flattened_text(card);

            let tender_type = card
                .select(&type_selector)
                .next()
                .map(flattened_text)
                .unwrap_or_default();
            let title = card
                .select(&title_selector)
                .next()
                .map(flattened_text)
                .unwrap_or_default();
            let authority = card
                .select(&authority_wrapper_selector)
                .next()
                .and_then(|wrapper| wrapper.select(&paragraph_selector).next())
                .map(flattened_text)
                .unwrap_or_default();

            TenderRecord {
                publication_date: find_publication_date(&text),
                tender_type,
                title,
                authority,
            }
        })
        .collect()
}

fn flattened_text(element: ElementRef) -> String {
    element.text().map(str::trim).collect()
}

pub async fn scrape_range<S: ListingPageSource>(
    source: &S,
    range: &PageRange,
    progress: &mut dyn ScrapeProgress,
) -> Result<TenderTable, ScrapeError> {
    let total_pages = range.total_pages();
    let mut records = vec![];
    let mut skipped_pages = vec![];

    for page in range.pages() {
        let html = match source.fetch_page(page).await? {
            Some(html) => html,
            None => {
                log::warn!(
                    "Timeout on page {} (this page probably doesn't have any data)",
                    page
                );
                skipped_pages.push(page);
                continue;
            }
        };

        let mut page_records = parse_listing_page(&html);
        log::info!("Found {} tenders on page {}", page_records.len(), page);
        records.append(&mut page_records);

        progress.page_done(range.position(page), total_pages);
    }

    Ok(TenderTable {
        records,
        skipped_pages,
    })
}

pub async fn scrape_tenders(
    settings: &ScraperSettings,
    range: &PageRange,
    progress: &mut dyn ScrapeProgress,
) -> Result<TenderTable, ScrapeError> {
    let droid = Droid::new(&settings.webdriver_url).await?;
    let source = DriverPageSource::new(
        &droid.driver,
        settings.listing_wait(),
        settings.poll_interval(),
    );

    let result = scrape_range(&source, range, progress).await;

    // The session is closed whether the walk succeeded or not.
    if let Err(e) = droid.quit().await {
        log::error!("Failed to close webdriver session. Error: {:?}", e);
    }

    result
}
