//! Build script to generate build-time information

use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build date and commit are logged by the CLI on start-up
    EmitBuilder::builder().build_date().git_sha(true).emit()?;

    Ok(())
}
