use kml_source::parse_kml;
use serde_json::to_string_pretty;
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("Usage: kml-dump <file.kml>")?;
    let text = fs::read_to_string(&path)?;

    let kml = parse_kml(&text)?;
    println!("{}", to_string_pretty(&kml)?);

    Ok(())
}
