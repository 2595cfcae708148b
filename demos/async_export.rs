//! Export through the async facade; rendering happens on a worker thread.

use codeshot::{AsyncStudio, ExportOptions, FileExtension};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let studio = AsyncStudio::new(None).await?;
    studio.set_code("const answer = 6 * 7;").await?;

    // Export PNG and SVG concurrently-driving tasks share one worker
    let artifact = studio
        .export(ExportOptions::default(), Some("snappy.png"))
        .await?;
    println!("png: {} bytes", artifact.bytes.len());

    let svg = studio
        .export(
            ExportOptions {
                extension: FileExtension::Svg,
                ..ExportOptions::default()
            },
            Some("snappy.svg"),
        )
        .await?;
    println!("svg: {} bytes", svg.bytes.len());

    studio.close().await?;
    Ok(())
}
