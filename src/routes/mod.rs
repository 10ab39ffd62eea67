pub mod download_route;
pub mod index_route;
pub mod scrape_route;
