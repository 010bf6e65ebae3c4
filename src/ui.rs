use std::io::IsTerminal;

/// ANSI color codes
pub struct Colors;

impl Colors {
    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";
    pub const BLUE: &'static str = "\x1b[34m";
    pub const PURPLE: &'static str = "\x1b[35m";
    pub const RESET: &'static str = "\x1b[0m";
}

/// Colors are on for an interactive stdout unless turned off explicitly
#[must_use]
pub fn colors_enabled(no_color: bool) -> bool {
    !no_color && std::env::var_os("NO_COLOR").is_none() && std::io::stdout().is_terminal()
}

/// Wrap text in a color, or leave it alone when colors are off
#[must_use]
pub fn paint(text: &str, color: &str, enabled: bool) -> String {
    if enabled {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// OSC 8 terminal hyperlink; terminals without support show just `text`
#[must_use]
pub fn hyperlink(text: &str, href: &str) -> String {
    format!("\x1b]8;;{href}\x1b\\{text}\x1b]8;;\x1b\\")
}

/// Print colored text to stdout
pub fn print_colored(text: &str, color: &str) {
    println!("{}{}{}", color, text, Colors::RESET);
}

/// Print colored text to stderr
pub fn eprint_colored(text: &str, color: &str) {
    eprintln!("{}{}{}", color, text, Colors::RESET);
}

/// Print error message
pub fn print_error(text: &str) {
    eprint_colored(text, Colors::RED);
}

/// Print info message
pub fn print_info(text: &str) {
    print_colored(text, Colors::BLUE);
}

/// Print header message
pub fn print_header(text: &str) {
    print_colored(text, Colors::PURPLE);
}

/// Show a helpful error with suggestions
pub fn show_error_with_help(error: &str, suggestions: &[&str]) {
    print_error(&format!("❌ {error}"));
    eprintln!();
    if !suggestions.is_empty() {
        eprint_colored("💡 Here's how to fix it:", Colors::YELLOW);
        for (i, suggestion) in suggestions.iter().enumerate() {
            eprintln!("   {}. {}", i + 1, suggestion);
        }
        eprintln!();
    }
}
