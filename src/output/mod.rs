//! Output formatting for CLI results

pub mod json;

use serde::Serialize;

use crate::error::Result;

/// Print a command result wrapped in the JSON envelope
pub fn print_json<T: Serialize + ?Sized>(data: &T) -> Result<()> {
    println!("{}", json::format_json(data)?);
    Ok(())
}
