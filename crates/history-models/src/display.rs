use crate::calendar::DayBoundary;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Date format used for history headers older than the relative window.
///
/// Serialized as the pattern users pick in settings; the empty pattern means
/// the short default format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DateFormat {
    #[default]
    #[serde(rename = "")]
    Default,
    #[serde(rename = "MM/dd/yy")]
    MonthDayYear,
    #[serde(rename = "dd/MM/yy")]
    DayMonthYear,
    #[serde(rename = "yyyy-MM-dd")]
    Iso,
    #[serde(rename = "dd MMM yyyy")]
    DayMonthNameYear,
    #[serde(rename = "MMM dd, yyyy")]
    MonthNameDayYear,
}

impl DateFormat {
    pub const ALL: [DateFormat; 6] = [
        DateFormat::Default,
        DateFormat::MonthDayYear,
        DateFormat::DayMonthYear,
        DateFormat::Iso,
        DateFormat::DayMonthNameYear,
        DateFormat::MonthNameDayYear,
    ];

    /// chrono `strftime` pattern
    pub fn chrono_pattern(&self) -> &'static str {
        match self {
            DateFormat::Default => "%-m/%-d/%y",
            DateFormat::MonthDayYear => "%m/%d/%y",
            DateFormat::DayMonthYear => "%d/%m/%y",
            DateFormat::Iso => "%Y-%m-%d",
            DateFormat::DayMonthNameYear => "%d %b %Y",
            DateFormat::MonthNameDayYear => "%b %d, %Y",
        }
    }

    /// Pattern as shown to (and typed by) users
    pub fn pattern(&self) -> &'static str {
        match self {
            DateFormat::Default => "",
            DateFormat::MonthDayYear => "MM/dd/yy",
            DateFormat::DayMonthYear => "dd/MM/yy",
            DateFormat::Iso => "yyyy-MM-dd",
            DateFormat::DayMonthNameYear => "dd MMM yyyy",
            DateFormat::MonthNameDayYear => "MMM dd, yyyy",
        }
    }
}

impl FromStr for DateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("default") {
            return Ok(DateFormat::Default);
        }
        if trimmed.eq_ignore_ascii_case("iso") {
            return Ok(DateFormat::Iso);
        }
        DateFormat::ALL
            .iter()
            .find(|format| format.pattern() == trimmed)
            .copied()
            .ok_or_else(|| {
                let known: Vec<&str> = DateFormat::ALL
                    .iter()
                    .skip(1)
                    .map(|f| f.pattern())
                    .collect();
                format!("Invalid date format: {}. Use 'default' or one of: {}", s, known.join(", "))
            })
    }
}

/// Resolved UI flags handed to the presentation shell.
///
/// Built once from the preference store; the shell never reads preferences itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayOptions {
    pub relative_time: bool,
    pub date_format: DateFormat,
    pub day_boundary: DayBoundary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_format() {
        assert_eq!("default".parse::<DateFormat>().unwrap(), DateFormat::Default);
        assert_eq!("".parse::<DateFormat>().unwrap(), DateFormat::Default);
        assert_eq!("dd/MM/yy".parse::<DateFormat>().unwrap(), DateFormat::DayMonthYear);
        assert_eq!("iso".parse::<DateFormat>().unwrap(), DateFormat::Iso);
        assert!("yy.MM".parse::<DateFormat>().is_err());
    }

    #[test]
    fn test_serde_uses_patterns() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            format: DateFormat,
        }

        let json = serde_json::to_string(&Wrapper { format: DateFormat::MonthNameDayYear }).unwrap();
        assert_eq!(json, r#"{"format":"MMM dd, yyyy"}"#);

        let parsed: Wrapper = serde_json::from_str(r#"{"format":""}"#).unwrap();
        assert_eq!(parsed.format, DateFormat::Default);
    }
}
