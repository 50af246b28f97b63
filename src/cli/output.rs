//! Terminal output for the `init` and `config` commands.

use owo_colors::{OwoColorize, Style};

/// Status line kinds. Each has a colored glyph and a plain-text tag.
#[derive(Clone, Copy)]
enum Mark {
    Ok,
    Info,
    Warn,
    Error,
    Skip,
}

impl Mark {
    fn glyph(self) -> (&'static str, Style) {
        match self {
            Mark::Ok => ("✓", Style::new().green().bold()),
            Mark::Info => ("•", Style::new().blue()),
            Mark::Warn => ("!", Style::new().yellow().bold()),
            Mark::Error => ("✗", Style::new().red().bold()),
            Mark::Skip => ("○", Style::new().yellow()),
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Mark::Ok => "OK",
            Mark::Info => "INFO",
            Mark::Warn => "WARN",
            Mark::Error => "ERROR",
            Mark::Skip => "SKIPPED",
        }
    }
}

/// Prints CLI status lines, with or without ANSI colors.
pub struct Output {
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self { colored: true }
    }

    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Renders `text` styled when colors are on, unchanged otherwise.
    fn paint(&self, text: &str, style: Style) -> String {
        if self.colored {
            text.style(style).to_string()
        } else {
            text.to_string()
        }
    }

    fn line(&self, mark: Mark, text: &str) -> String {
        if self.colored {
            let (glyph, style) = mark.glyph();
            format!("  {} {}", glyph.style(style), text)
        } else {
            format!("  [{}] {}", mark.tag(), text)
        }
    }

    pub fn banner(&self) {
        let title = self.paint("AUTHGATE", Style::new().bright_cyan().bold());
        let version = self.paint(&format!("v{}", env!("CARGO_PKG_VERSION")), Style::new().dimmed());
        println!("\n   {}  JWT Authentication Gateway {}\n", title, version);
    }

    pub fn success(&self, message: &str) {
        println!("{}", self.line(Mark::Ok, &self.paint(message, Style::new().green())));
    }

    pub fn info(&self, message: &str) {
        println!("{}", self.line(Mark::Info, message));
    }

    pub fn warning(&self, message: &str) {
        println!("{}", self.line(Mark::Warn, &self.paint(message, Style::new().yellow())));
    }

    /// Goes to stderr.
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.line(Mark::Error, &self.paint(message, Style::new().red())));
    }

    /// `kind` is a short label such as `config` or `directory`.
    pub fn created(&self, kind: &str, path: &str) {
        let text = format!(
            "{} {}",
            self.paint(kind, Style::new().dimmed()),
            self.paint(path, Style::new().bright_white())
        );
        println!("{}", self.line(Mark::Ok, &text));
    }

    pub fn skipped(&self, path: &str, reason: &str) {
        let text = format!(
            "{} {}",
            self.paint(path, Style::new().dimmed()),
            self.paint(&format!("({})", reason), Style::new().yellow())
        );
        println!("{}", self.line(Mark::Skip, &text));
    }

    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {} ===", title);
        }
    }

    pub fn subheader(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.cyan().bold());
        } else {
            println!("\n  --- {} ---", title);
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        println!(
            "    {}: {}",
            self.paint(key, Style::new().dimmed()),
            self.paint(value, Style::new().bright_white())
        );
    }

    pub fn list_item(&self, item: &str) {
        println!("    - {}", item);
    }

    pub fn hint(&self, message: &str) {
        println!("\n  {}", self.paint(&format!("tip: {}", message), Style::new().dimmed().italic()));
    }

    pub fn command(&self, cmd: &str) {
        println!("     {}", self.paint(&format!("$ {}", cmd), Style::new().bright_cyan()));
    }

    pub fn newline(&self) {
        println!();
    }
}

/// Masks all but the first and last two characters of a secret.
pub fn redact(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 6 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 4), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_default_is_colored() {
        assert!(Output::default().colored);
        assert!(!Output::no_color().colored);
    }

    #[test]
    fn test_plain_lines_carry_tags() {
        let output = Output::no_color();

        assert_eq!(output.line(Mark::Ok, "done"), "  [OK] done");
        assert_eq!(output.line(Mark::Skip, ".env.example"), "  [SKIPPED] .env.example");
        assert_eq!(output.paint("plain", Style::new().red()), "plain");
    }

    #[test]
    fn test_colored_lines_use_glyphs() {
        let output = Output::new();

        let line = output.line(Mark::Error, "boom");
        assert!(line.contains('✗'));
        assert!(line.ends_with("boom"));
        assert!(!line.contains("[ERROR]"));
    }

    #[test]
    fn test_redact() {
        assert_eq!(redact(""), "");
        assert_eq!(redact("abc"), "***");
        assert_eq!(redact("super-secret"), "su********et");
        assert_eq!(redact("üñïçødé-key").chars().count(), "üñïçødé-key".chars().count());
    }

    #[test]
    fn test_output_methods_no_panic() {
        for output in [Output::no_color(), Output::new()] {
            output.banner();
            output.success("ok");
            output.info("info");
            output.warning("warn");
            output.error("error");
            output.created("file", "path/to/file");
            output.skipped("path", "reason");
            output.header("Header");
            output.subheader("Subheader");
            output.kv("key", "value");
            output.list_item("item");
            output.hint("hint");
            output.command("cmd");
            output.newline();
        }
    }
}
