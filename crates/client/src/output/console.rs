//! Human-readable progress lines on stdout.
//!
//! Printing goes through `anstream`, which strips the escape codes when stdout
//! is not a terminal or `NO_COLOR` is set.

use anstream::println as aprintln;

/// Tokyo Night color palette
pub mod colors {
    pub const RESET: &str = "\x1b[0m";

    pub const TKN_RED: &str = "\x1b[38;2;247;118;142m"; // #f7768e
    pub const TKN_GREEN: &str = "\x1b[38;2;158;206;106m"; // #9ece6a
    pub const TKN_YELLOW: &str = "\x1b[38;2;224;175;104m"; // #e0af68
    pub const TKN_BLUE: &str = "\x1b[38;2;122;162;247m"; // #7aa2f7
    pub const TKN_CYAN: &str = "\x1b[38;2;125;207;255m"; // #7dcfff
}

fn paint(color: &str, text: &str) -> String {
    format!("{}{}{}", color, text, colors::RESET)
}

pub fn p_g(text: &str) -> String {
    paint(colors::TKN_GREEN, text)
}

pub fn p_r(text: &str) -> String {
    paint(colors::TKN_RED, text)
}

pub fn p_y(text: &str) -> String {
    paint(colors::TKN_YELLOW, text)
}

pub fn p_b(text: &str) -> String {
    paint(colors::TKN_BLUE, text)
}

pub fn p_c(text: &str) -> String {
    paint(colors::TKN_CYAN, text)
}

/// Progress printer that can be silenced as a whole.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console {
    silent: bool,
}

impl Console {
    pub fn new(silent: bool) -> Self {
        Self { silent }
    }

    /// A console that prints nothing.
    pub fn silent() -> Self {
        Self { silent: true }
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    /// A section heading.
    pub fn heading(&self, text: &str) {
        if !self.silent {
            aprintln!();
            aprintln!("{}", p_c(text));
        }
    }

    /// A labelled value, e.g. the target being provisioned.
    pub fn field(&self, label: &str, value: &str) {
        if !self.silent {
            aprintln!("{} {}", p_b(label), value);
        }
    }

    /// Start of a unit of work.
    pub fn step(&self, text: &str) {
        if !self.silent {
            aprintln!("{} {}", p_b("→"), text);
        }
    }

    pub fn ok(&self, text: &str) {
        if !self.silent {
            aprintln!("  {} {}", p_g("✓"), text);
        }
    }

    pub fn warn(&self, text: &str) {
        if !self.silent {
            aprintln!("  {} {}", p_y("⚠"), text);
        }
    }

    pub fn fail(&self, text: &str) {
        if !self.silent {
            aprintln!("  {} {}", p_r("✗"), text);
        }
    }

    /// Prints summary lines, coloring the verdict lines.
    pub fn summary(&self, lines: &[String]) {
        if self.silent {
            return;
        }
        aprintln!();
        for line in lines {
            if line.ends_with(": OK") {
                aprintln!("{}", p_g(line));
            } else if line.starts_with("Critical collections failed") || line.starts_with("- ") {
                aprintln!("{}", p_r(line));
            } else if line.starts_with("Missing") || line.starts_with("Non-critical") {
                aprintln!("{}", p_y(line));
            } else {
                aprintln!("{}", line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_wraps_with_reset() {
        assert_eq!(p_g("ok"), format!("{}ok{}", colors::TKN_GREEN, colors::RESET));
    }

    #[test]
    fn test_silent_console() {
        assert!(Console::silent().is_silent());
        assert!(!Console::new(false).is_silent());
    }
}
