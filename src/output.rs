use crate::models::{Business, BusinessList, COLUMNS};
use anyhow::{Context, Result};
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write the list as CSV with a header row; absent values become empty fields
pub fn write_csv(list: &BusinessList, path: &Path) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    writer.write_record(COLUMNS)?;
    for business in list.iter() {
        writer.serialize(business)?;
    }
    writer.flush()?;

    Ok(())
}

/// Write the list to a single-sheet workbook; absent values become blank cells
pub fn write_xlsx(list: &BusinessList, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, name) in COLUMNS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *name)?;
    }

    for (idx, business) in list.iter().enumerate() {
        let row = idx as u32 + 1;
        let Business {
            name,
            address,
            website,
            phone_number,
            reviews_count,
            reviews_average,
        } = business;

        worksheet.write_string(row, 0, name)?;
        worksheet.write_string(row, 1, address)?;
        worksheet.write_string(row, 2, website)?;
        worksheet.write_string(row, 3, phone_number)?;
        if let Some(count) = reviews_count {
            worksheet.write_number(row, 4, *count as f64)?;
        }
        if let Some(average) = reviews_average {
            worksheet.write_number(row, 5, *average)?;
        }
    }

    workbook
        .save(path)
        .with_context(|| format!("Failed to save {}", path.display()))?;

    Ok(())
}

impl BusinessList {
    /// Save to `<base>.xlsx` in the working directory, replacing any existing file
    pub fn save_to_excel(&self, base: &str) -> Result<PathBuf> {
        let path = PathBuf::from(format!("{}.xlsx", base));
        write_xlsx(self, &path)?;
        info!("💾 Saved {} businesses to {}", self.len(), path.display());
        Ok(path)
    }

    /// Save to `<base>.csv` in the working directory, replacing any existing file
    pub fn save_to_csv(&self, base: &str) -> Result<PathBuf> {
        let path = PathBuf::from(format!("{}.csv", base));
        write_csv(self, &path)?;
        info!("💾 Saved {} businesses to {}", self.len(), path.display());
        Ok(path)
    }
}
