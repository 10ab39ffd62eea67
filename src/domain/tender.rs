use std::{ops::RangeInclusive, sync::LazyLock};

use regex::Regex;

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap());

#[derive(Debug, Clone, PartialEq)]
pub struct TenderRecord {
    pub publication_date: String,
    pub tender_type: String,
    pub title: String,
    pub authority: String,
}

#[derive(Debug, PartialEq)]
pub struct TenderTable {
    pub records: Vec<TenderRecord>,
    pub skipped_pages: Vec<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRange {
    pub start: u32,
    pub end: u32,
}

impl PageRange {
    pub fn pages(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    pub fn total_pages(&self) -> u32 {
        if self.start > self.end {
            0
        } else {
            self.end - self.start + 1
        }
    }

    // 1-based position of a page within the range.
    pub fn position(&self, page: u32) -> u32 {
        page - self.start + 1
    }

    pub fn csv_filename(&self) -> String {
        format!("result({}-{}).csv", self.start, self.end)
    }
}

// First 4-2-2 dash-separated date in the card text, or empty when none.
pub fn find_publication_date(text: &str) -> String {
    DATE_PATTERN
        .find(text)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{find_publication_date, PageRange};

    #[test]
    fn find_publication_date_in_flattened_card_text() {
        let text = "Public tenderSupply ContractMinistry XPublished on2024-03-01";
        assert_eq!(find_publication_date(text), "2024-03-01");
    }

    #[test]
    fn find_publication_date_takes_first_match() {
        let text = "Published2024-03-01Closing2024-04-15";
        assert_eq!(find_publication_date(text), "2024-03-01");
    }

    #[test]
    fn find_publication_date_empty_when_absent() {
        assert_eq!(find_publication_date("no dates in this card"), "");
        assert_eq!(find_publication_date("31-12-2024 is the wrong shape"), "");
    }

    #[test]
    fn page_range_counts_inclusive_pages() {
        let range = PageRange { start: 2, end: 5 };

        assert_eq!(range.total_pages(), 4);
        assert_eq!(range.pages().collect::<Vec<u32>>(), vec![2, 3, 4, 5]);
        assert_eq!(range.position(2), 1);
        assert_eq!(range.position(5), 4);
    }

    #[test]
    fn page_range_empty_when_start_after_end() {
        let range = PageRange { start: 5, end: 2 };

        assert_eq!(range.total_pages(), 0);
        assert_eq!(range.pages().count(), 0);
    }

    #[test]
    fn csv_filename_embeds_range() {
        let range = PageRange { start: 2, end: 5 };
        assert_eq!(range.csv_filename(), "result(2-5).csv");

        let single = PageRange { start: 1, end: 1 };
        assert_eq!(single.csv_filename(), "result(1-1).csv");
    }
}
