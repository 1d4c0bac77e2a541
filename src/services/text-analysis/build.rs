//! Fetches and builds the nlprule English tokenizer binary into `OUT_DIR`

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=build.rs");

    nlprule_build::BinaryBuilder::new(&["en"], std::env::var("OUT_DIR")?)
        .build()?
        .validate()?;

    Ok(())
}
