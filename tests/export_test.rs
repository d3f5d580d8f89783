mod common;

use anyhow::Result;
use common::{RecordingRepository, entry};
use lancamentos::application::EntryService;
use lancamentos::domain::{EntryTemplate, EntryType};
use lancamentos::io::Exporter;
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_export_entries_csv() -> Result<()> {
    let repo = RecordingRepository::new();
    let service = EntryService::new(repo.clone());
    service.save(entry("salary", 1, dec!(100.00), EntryType::Income)).await?;
    service.save(entry("rent", 2, dec!(50.00), EntryType::Expense)).await?;

    let mut buffer = Vec::new();
    let count = Exporter::new(&service)
        .export_entries_csv(&EntryTemplate::for_owner(1), &mut buffer)
        .await?;

    assert_eq!(count, 1);
    let csv = String::from_utf8(buffer)?;
    let lines: Vec<_> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("id,description,month,year,owner_id,amount"));
    assert!(lines[1].starts_with("1,salary,2,2024,1,100.00,"));
    assert!(lines[1].ends_with(",INCOME,PENDING"));

    Ok(())
}

#[tokio::test]
async fn test_export_entries_json() -> Result<()> {
    let repo = RecordingRepository::new();
    let service = EntryService::new(repo.clone());
    service.save(entry("salary", 1, dec!(100.00), EntryType::Income)).await?;
    service.save(entry("rent", 1, dec!(50.00), EntryType::Expense)).await?;

    let mut buffer = Vec::new();
    let count = Exporter::new(&service)
        .export_entries_json(&EntryTemplate::default(), &mut buffer)
        .await?;

    assert_eq!(count, 2);
    let value: serde_json::Value = serde_json::from_slice(&buffer)?;
    assert!(value.is_array());
    assert_eq!(value.as_array().map(Vec::len), Some(2));
    assert_eq!(value[0]["description"], "salary");
    assert_eq!(value[0]["amount"], "100.00");
    assert_eq!(value[1]["entry_type"], "EXPENSE");

    Ok(())
}
