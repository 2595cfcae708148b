//! Render the same snippet once per builtin theme.

use codeshot::{new_studio, ExportOptions, RenderConfig, Theme};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let code = "let palette = themes.map((t) => t.name);";

    for id in Theme::builtin_ids() {
        let mut config = RenderConfig::default();
        config.theme = Theme::builtin(id);

        let mut studio = new_studio(config)?;
        studio.set_code(code);

        let artifact = studio.export(&ExportOptions::default())?;
        let name = format!("snappy-{id}.png");
        std::fs::write(&name, &artifact.bytes)?;
        println!("Wrote {name}");
    }

    Ok(())
}
