//! Example: run the terminal viewer from a JSON config file
//!
//! Usage: cargo run --example from_config -- path/to/viewer.json

use std::env;
use std::fs;
use std::io;

use tentview_core::ViewerConfig;
use tentview_terminal::TerminalApp;

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json>", args[0]);
        eprintln!("\nNo config provided, using the classic preset...");
        let mut app = TerminalApp::new(ViewerConfig::classic())?;
        return app.run();
    }

    let text = fs::read_to_string(&args[1])?;
    let config = ViewerConfig::from_json(&text)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let mut app = TerminalApp::new(config)?;
    app.run()?;

    Ok(())
}
