//! Minimal rendering example: source text in, `snappy.png` out.

use codeshot::{new_studio, ExportOptions, RenderConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Codeshot - Minimal Example\n");

    let code = r#"function greet(name) {
  const message = `Hello, ${name}!`;
  return message;
}"#;

    // Defaults: Night Owl theme, window chrome, line numbers
    let mut studio = new_studio(RenderConfig::default())?;
    studio.set_code(code);

    let artifact = studio.export(&ExportOptions::default())?;
    let name = artifact.file_name();
    std::fs::write(&name, &artifact.bytes)?;
    println!("Wrote {} ({} bytes)", name, artifact.bytes.len());

    Ok(())
}
