use clap::{CommandFactory, Parser};
use sheet2geojson::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and exit cleanly
    let Some(command) = args.command else {
        show_help_and_commands();
        process::exit(0);
    };

    match commands::run(command) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("sheet2geojson - Spreadsheet to WGS84 GeoJSON Converter");
    println!("======================================================");
    println!();
    if Args::command().print_help().is_err() {
        println!("Run `sheet2geojson --help` for usage.");
    }
    println!();
    println!("EXAMPLES:");
    println!("    # Convert a local export (CRTM05 by default):");
    println!("    sheet2geojson convert lotes.csv -o lotes.geojson");
    println!();
    println!("    # Convert a published sheet in UTM zone 17N:");
    println!("    sheet2geojson convert https://example.org/export.csv --epsg 32617");
    println!();
    println!("    # Check header and column detection without writing:");
    println!("    sheet2geojson inspect lotes.csv --format json");
}
