//! Tokyo Night color helpers.
//!
//! Print through `anstream` so escape codes are stripped when stdout is not
//! a terminal.

pub use anstream::{eprintln as aeprintln, println as aprintln};

pub const RESET: &str = "\x1b[0m";

pub const TKN_RED: &str = "\x1b[38;2;247;118;142m"; // #f7768e
pub const TKN_GREEN: &str = "\x1b[38;2;158;206;106m"; // #9ece6a
pub const TKN_YELLOW: &str = "\x1b[38;2;224;175;104m"; // #e0af68
pub const TKN_BLUE: &str = "\x1b[38;2;122;162;247m"; // #7aa2f7
pub const TKN_CYAN: &str = "\x1b[38;2;125;207;255m"; // #7dcfff

fn paint(color: &str, text: &str) -> String {
    format!("{color}{text}{RESET}")
}

pub fn green(text: &str) -> String {
    paint(TKN_GREEN, text)
}

pub fn red(text: &str) -> String {
    paint(TKN_RED, text)
}

pub fn yellow(text: &str) -> String {
    paint(TKN_YELLOW, text)
}

pub fn blue(text: &str) -> String {
    paint(TKN_BLUE, text)
}

pub fn cyan(text: &str) -> String {
    paint(TKN_CYAN, text)
}
