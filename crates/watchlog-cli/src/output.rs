use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

#[derive(Debug, Clone, Copy)]
enum Kind {
    Success,
    Info,
    Warning,
    Error,
}

impl Kind {
    fn as_str(&self) -> &'static str {
        match self {
            Kind::Success => "success",
            Kind::Info => "info",
            Kind::Warning => "warning",
            Kind::Error => "error",
        }
    }
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.emit(Kind::Success, msg.as_ref());
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.emit(Kind::Info, msg.as_ref());
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.emit(Kind::Warning, msg.as_ref());
    }

    /// Errors are shown even in quiet mode
    pub fn error(&self, msg: impl AsRef<str>) {
        self.emit(Kind::Error, msg.as_ref());
    }

    /// Day header of the history list
    pub fn header(&self, label: &str) {
        if self.quiet || !self.is_human() {
            return;
        }
        println!("\n{}", label.bright_cyan().bold());
    }

    /// One history entry; the display key is shown dimmed when requested
    pub fn entry(&self, title: &str, detail: &str, key: Option<&str>) {
        if self.quiet || !self.is_human() {
            return;
        }
        match key {
            Some(key) => println!("  {}  {}  {}", title.bold(), detail, key.dimmed()),
            None => println!("  {}  {}", title.bold(), detail),
        }
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet {
            return;
        }
        self.print_json(data);
    }

    fn emit(&self, kind: Kind, msg: &str) {
        if self.quiet && !matches!(kind, Kind::Error) {
            return;
        }

        match self.format {
            OutputFormat::Human => match kind {
                Kind::Success => println!("{} {}", "✓".green(), msg),
                Kind::Info => println!("{}", msg),
                Kind::Warning => println!("{} {}", "⚠".yellow(), msg),
                Kind::Error => eprintln!("{} {}", "✗".red(), msg),
            },
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({
                    "type": kind.as_str(),
                    "message": msg,
                }));
            }
        }
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::JsonPretty => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
            OutputFormat::Json | OutputFormat::Human => {
                println!("{}", serde_json::to_string(data).unwrap_or_default());
            }
        }
    }
}
