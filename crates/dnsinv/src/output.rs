//! JSON rendering of the inventory document

use dnsinv_inventory::Inventory;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Render the inventory as JSON indented by four spaces
///
/// # Errors
/// Returns error if serialization fails
pub fn render(inventory: &Inventory) -> eyre::Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    inventory.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}
