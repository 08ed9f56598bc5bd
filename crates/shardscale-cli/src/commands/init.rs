use std::path::Path;

use anyhow::bail;
use shardscale_core::ConfigFile;

pub const FILE_NAME: &str = "shardscale.toml";

pub fn init(path: &str, stream: &str, force: bool) -> anyhow::Result<()> {
    let output = Path::new(path).join(FILE_NAME);
    if output.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", output.display());
    }

    let scaffold = ConfigFile::scaffold(stream);
    // Never write a scaffold that would fail `validate`.
    scaffold.build_all()?;

    std::fs::write(&output, scaffold.to_toml_string()?)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}
