//! `evtjson fields`: Print the field descriptor list.

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", evtjson_core::fields_json()?);
    Ok(())
}
