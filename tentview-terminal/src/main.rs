//! Tentview Terminal Demo - Rotating Tent
//!
//! Usage: tentview-terminal [preset]
//!
//! Controls:
//!   - Mouse drag: rotate the tent
//!   - Space: pause/resume the idle spin
//!   - R: reset the view
//!   - Q/ESC: quit

use std::env;
use std::io;

use tentview_core::ViewerConfig;
use tentview_terminal::TerminalApp;

fn main() -> io::Result<()> {
    let name = env::args().nth(1).unwrap_or_else(|| "classic".to_string());

    let Some(config) = ViewerConfig::preset(&name) else {
        eprintln!(
            "Unknown preset '{}'. Available: {}",
            name,
            ViewerConfig::PRESET_NAMES.join(", ")
        );
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "unknown preset"));
    };

    println!("Tentview Terminal - preset '{}' (press Q to quit)...", name);
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(config)?;
    app.run()?;

    println!("Thanks for taking the tent for a spin!");
    Ok(())
}
