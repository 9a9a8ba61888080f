//! Terminal messages for the CLI commands
//!
//! Status lines go to stdout, problems to stderr. Each line starts with a
//! one-character colored marker.

use console::style;
use gesture_sdk::Gesture;

pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", style("✗").red().bold(), style(message).red());
}

/// Non-fatal problems such as configuration warnings
pub fn print_warning(message: &str) {
    eprintln!("{} {}", style("!").yellow().bold(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

/// `label: url`, with the URL dimmed so it can be copied as-is
pub fn print_link(label: &str, url: &str) {
    println!("{} {}: {}", style("→").cyan(), label, style(url).dim());
}

/// The classifier's current gesture, as shown by `control`
pub fn print_gesture(gesture: Option<&Gesture>) {
    match gesture {
        Some(gesture) => println!(
            "{} Current gesture: {}",
            style("✋").magenta(),
            style(gesture).bold()
        ),
        None => println!("{} Current gesture: {}", style("✋").magenta(), style("none").dim()),
    }
}
