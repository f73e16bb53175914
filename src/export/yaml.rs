//! YAML export

use std::io::Write;

use crate::error::{BasketError, BasketResult};
use crate::export::json::FullExport;
use crate::services::Basket;

/// Export the basket to YAML with a short header comment
pub fn export_full_yaml<W: Write>(basket: &Basket, mut writer: W) -> BasketResult<()> {
    let export = FullExport::from_basket(basket);

    writeln!(writer, "# basket export")
        .and_then(|_| writeln!(writer, "# Generated: {}", export.exported_at))
        .and_then(|_| writeln!(writer, "# App Version: {}", export.app_version))
        .and_then(|_| writeln!(writer))
        .map_err(|e| BasketError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| BasketError::Export(e.to_string()))?;

    Ok(())
}
