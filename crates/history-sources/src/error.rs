use std::fmt;

#[derive(Debug)]
pub struct SourceError {
    message: String,
}

impl SourceError {
    pub fn new(message: String) -> Self {
        Self { message }
    }

    pub fn io(context: &str, err: std::io::Error) -> Self {
        Self::new(format!("{}: {}", context, err))
    }

    pub fn parse(context: &str, err: serde_json::Error) -> Self {
        Self::new(format!("{}: {}", context, err))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SourceError {}
