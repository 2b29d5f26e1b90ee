use std::path::Path;

use colored::Colorize;

pub fn run(
    setup: &Path,
    dir: Option<&Path>,
    name: Option<&str>,
    interval: Option<f64>,
    ext: &str,
) -> Result<(), String> {
    let mut tool = super::open_tool(setup)?;
    tool.load_model(setup)
        .map_err(|e| format!("assembly failed: {e}"))?;
    if tool.model().is_none() {
        return Err("setup file does not name a model".into());
    }

    let out_dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => rw_tool::DirectoryScope::of_file(setup)
            .map_err(|e| e.to_string())?
            .resolve(&tool.config().results_directory),
    };
    let base_name = name.unwrap_or(tool.name()).to_string();

    let written = tool
        .print_results(&base_name, &out_dir, interval, ext)
        .map_err(|e| format!("writing results failed: {e}"))?;

    if written.is_empty() {
        println!("  {}", "No analyses configured. Nothing written.".dimmed());
    }
    for path in &written {
        println!("  {} {}", "wrote".green(), path.display());
    }
    Ok(())
}
