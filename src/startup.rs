use std::net::TcpListener;

use actix_files::Files;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    configuration::ScraperSettings,
    routes::{download_route, index_route, scrape_route},
};

// The CSV artifact rides back through the download form, so the
// urlencoded payload limit has to fit a whole export.
const FORM_PAYLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

pub fn run(
    listener: TcpListener,
    scraper_settings: ScraperSettings,
) -> Result<Server, std::io::Error> {
    let scraper_settings = web::Data::new(scraper_settings);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(Files::new("/static", "./templates/static").prefer_utf8(true))
            .service(index_route::index)
            .service(scrape_route::scrape)
            .service(download_route::download)
            .app_data(web::FormConfig::default().limit(FORM_PAYLOAD_LIMIT_BYTES))
            .app_data(scraper_settings.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
