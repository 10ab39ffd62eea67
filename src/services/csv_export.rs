use crate::domain::tender::TenderRecord;

pub const CSV_HEADER: [&str; 4] = [
    "Date of Publication",
    "Type of Tender",
    "Tender Title",
    "Tendering Authority",
];

pub fn to_csv(records: &[TenderRecord]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record([
            &record.publication_date,
            &record.tender_type,
            &record.title,
            &record.authority,
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
