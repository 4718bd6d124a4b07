//! Validate the content tree against its schemas

use anyhow::Result;

use crate::Shelf;

/// Load everything; any schema, slug or parse problem surfaces as the error
pub fn run(shelf: &Shelf) -> Result<()> {
    let collection = shelf.load()?;

    println!("✅ {} records valid", collection.len());
    for name in collection.type_names() {
        let total = collection.query(name).include_drafts().count();
        let drafts = total - collection.query(name).count();
        if drafts > 0 {
            println!("  {}: {} ({} drafts)", name, total, drafts);
        } else {
            println!("  {}: {}", name, total);
        }
    }

    Ok(())
}
