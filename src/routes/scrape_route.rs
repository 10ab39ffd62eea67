use actix_web::{post, web, HttpResponse};
use askama::Template;
use serde::Deserialize;

use crate::{
    configuration::ScraperSettings,
    domain::tender::{PageRange, TenderRecord, TenderTable},
    services::{scrape_tenders, to_csv, LogProgress, ScrapeError},
};

const PREVIEW_ROWS: usize = 5;

#[derive(Deserialize)]
struct ScrapeForm {
    start_page: u32,
    end_page: u32,
}

#[derive(Template)]
#[template(path = "results.html")]
struct ResultsTemplate {
    preview: Vec<TenderRecord>,
    total_tenders: usize,
    skipped_pages: Vec<u32>,
    csv_content: String,
    start_page: u32,
    end_page: u32,
}

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate {
    message: String,
}

#[post("/scrape")]
async fn scrape(
    settings: web::Data<ScraperSettings>,
    form: web::Form<ScrapeForm>,
) -> HttpResponse {
    /*
    1. Open a fresh headless browser session
    2. Walk the requested listing pages, skipping pages that never load
    3. Flatten every card into one CSV artifact
    4. Render a preview page that carries the artifact for download
    */
    let range = PageRange {
        start: form.start_page,
        end: form.end_page,
    };

    match scrape_to_csv(&settings, &range).await {
        Ok((table, csv_content)) => HttpResponse::Ok().body(
            ResultsTemplate {
                preview: preview_rows(&table.records),
                total_tenders: table.records.len(),
                skipped_pages: table.skipped_pages,
                csv_content,
                start_page: range.start,
                end_page: range.end,
            }
            .render()
            .unwrap(),
        ),
        Err(e) => {
            log::error!("Scraping run failed. Error: {:?}", e);
            HttpResponse::Ok().body(
                ErrorTemplate {
                    message: e.to_string(),
                }
                .render()
                .unwrap(),
            )
        }
    }
}

async fn scrape_to_csv(
    settings: &ScraperSettings,
    range: &PageRange,
) -> Result<(TenderTable, String), ScrapeError> {
    let table = scrape_tenders(settings, range, &mut LogProgress).await?;
    let csv_content = to_csv(&table.records)?;

    Ok((table, csv_content))
}

fn preview_rows(records: &[TenderRecord]) -> Vec<TenderRecord> {
    records.iter().take(PREVIEW_ROWS).cloned().collect()
}
