use crate::domain::model::Listing;
use crate::utils::error::{DeskError, Result};

/// Renders listings as CSV, one column per entry in `columns`, in display
/// order. Unknown column names render empty rather than failing, so an old
/// saved column layout cannot break the export.
pub fn listings_to_csv(items: &[Listing], columns: &[&str]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(columns)?;

    for listing in items {
        let row: Vec<String> = columns
            .iter()
            .map(|column| listing_field(listing, column))
            .collect();
        writer.write_record(&row)?;
    }

    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| DeskError::IoError(e.into_error()))
}

pub fn listing_field(listing: &Listing, column: &str) -> String {
    match column {
        "sku" => listing.sku.clone(),
        "item_id" => listing.item_id.clone().unwrap_or_default(),
        "title" => listing.title.clone(),
        "category_id" => listing.category_id.clone(),
        "price" => format!("{:.2}", listing.price),
        "quantity" => listing.quantity.to_string(),
        "status" => listing.status.clone(),
        "profit" => listing
            .profit
            .map(|p| format!("{:.2}", p))
            .unwrap_or_default(),
        "listed_at" => listing
            .listed_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_default(),
        "updated_at" => listing
            .updated_at
            .map(|t| t.to_rfc3339())
            .unwrap_or_default(),
        _ => String::new(),
    }
}
