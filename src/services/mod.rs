pub mod csv_export;
pub mod droid;
pub mod tender_scraper;

pub use csv_export::*;
pub use droid::*;
pub use tender_scraper::*;
