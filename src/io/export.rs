use anyhow::Result;
use std::io::Write;

use crate::application::EntryService;
use crate::domain::EntryTemplate;

/// Exporter for writing search results to files or stdout
pub struct Exporter<'a> {
    service: &'a EntryService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a EntryService) -> Self {
        Self { service }
    }

    /// Export entries matching the template as CSV
    pub async fn export_entries_csv<W: Write>(
        &self,
        template: &EntryTemplate,
        writer: W,
    ) -> Result<usize> {
        let entries = self.service.search(template).await?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "id",
            "description",
            "month",
            "year",
            "owner_id",
            "amount",
            "registration_date",
            "entry_type",
            "status",
        ])?;

        for entry in &entries {
            csv_writer.write_record([
                optional(entry.id),
                entry.description.clone().unwrap_or_default(),
                optional(entry.month),
                optional(entry.year),
                optional(entry.owner),
                optional(entry.amount),
                optional(entry.registration_date),
                optional(entry.entry_type),
                optional(entry.status),
            ])?;
        }

        csv_writer.flush()?;
        Ok(entries.len())
    }

    /// Export entries matching the template as a JSON array
    pub async fn export_entries_json<W: Write>(
        &self,
        template: &EntryTemplate,
        mut writer: W,
    ) -> Result<usize> {
        let entries = self.service.search(template).await?;

        let json = serde_json::to_string_pretty(&entries)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;

        Ok(entries.len())
    }
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
