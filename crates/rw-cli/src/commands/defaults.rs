use rw_tool::ToolConfig;

pub fn run() -> Result<(), String> {
    println!("{}", ToolConfig::default().to_json());
    Ok(())
}
