use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use rw_model::Model;

pub fn run(setup: &Path, show_originals: bool) -> Result<(), String> {
    let mut tool = super::open_tool(setup)?;
    let originals = tool
        .load_model_with_originals(setup)
        .map_err(|e| format!("assembly failed: {e}"))?;

    let Some(model) = tool.model() else {
        println!("  No model file configured. Nothing to assemble.");
        return Ok(());
    };

    println!(
        "  {} '{}' {}",
        "Assembled".bold(),
        model.name(),
        format!("(from {})", tool.config().model_file).dimmed()
    );
    println!(
        "  {} coordinates, {} bodies, {} actuators, {} contact forces, {} analyses",
        model.coordinates().len(),
        model.bodies().len(),
        model.actuators().len(),
        model.contacts().len(),
        tool.ledger().len()
    );
    println!();

    print_actuators(model);
    if !model.contacts().is_empty() {
        print_contacts(model);
    }
    if !tool.ledger().is_empty() {
        println!("  {}", "Analyses".bold().underline());
        for (handle, analysis) in tool.ledger().iter() {
            println!("  {}  {}", format!("[{handle}]").dimmed(), analysis.name());
        }
        println!();
    }

    if let Some(originals) = originals.filter(|_| show_originals) {
        println!("  {}", "Original Actuators".bold().underline());
        if originals.actuators.is_empty() {
            println!("  {}", "(none)".dimmed());
        }
        for actuator in &originals.actuators {
            println!("  {}", actuator.name);
        }
        println!();
    }
    Ok(())
}

fn print_actuators(model: &Model) {
    println!("  {}", "Actuators".bold().underline());
    println!();
    if model.actuators().is_empty() {
        println!("  {}", "(none)".dimmed());
        println!();
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Actuator", "Coordinate", "Optimal Force"]);
    for actuator in model.actuators() {
        table.add_row(vec![
            actuator.name.clone(),
            actuator.coordinate.clone(),
            format!("{}", actuator.optimal_force),
        ]);
    }
    println!("{table}");
    println!();
}

fn print_contacts(model: &Model) {
    println!("  {}", "Contact Forces".bold().underline());
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Contact", "Body A", "Body B", "Stiffness", "Damping"]);
    for contact in model.contacts() {
        table.add_row(vec![
            contact.name.clone(),
            contact.body_a.clone(),
            contact.body_b.clone(),
            format!("{}", contact.stiffness),
            format!("{}", contact.damping),
        ]);
    }
    println!("{table}");
    println!();
}
