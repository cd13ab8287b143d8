pub mod print;
pub mod schema;

use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Read the basket text from a file (or stdin with "-")
pub fn read_basket(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().lock().read_to_string(&mut text)?;
        Ok(text)
    } else {
        Ok(fs::read_to_string(path)?)
    }
}
