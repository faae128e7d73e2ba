//! Command-line parsing
//!
//! Parses `dinewise [command] [args]` into a `Command`.

use crate::search::MinRating;

/// Parsed command from the process arguments
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Open the window (no arguments)
    Window,
    /// One-shot search printed to stdout:
    /// `search <location> <preference> [--min-rating N]`
    Search {
        location: String,
        preference: String,
        min_rating: MinRating,
    },
    /// Show help: help, --help, -h
    Help,
    /// Anything unparseable, with the message to show
    Invalid { message: String },
}

impl Command {
    /// Parse arguments, excluding the program name
    pub fn parse(args: &[String]) -> Self {
        let Some(cmd) = args.first() else {
            return Command::Window;
        };

        match cmd.to_lowercase().as_str() {
            "search" | "s" => Self::parse_search(&args[1..]),
            "help" | "--help" | "-h" => Command::Help,
            other => Command::Invalid {
                message: format!("Unknown command: {}. Run 'dinewise help' for usage.", other),
            },
        }
    }

    fn parse_search(args: &[String]) -> Self {
        let mut positional = Vec::new();
        let mut min_rating = MinRating::default();
        let mut iter = args.iter();

        while let Some(arg) = iter.next() {
            let value = if arg == "--min-rating" || arg == "-r" {
                match iter.next() {
                    Some(value) => value.as_str(),
                    None => return Self::usage("--min-rating needs a value"),
                }
            } else if let Some(value) = arg.strip_prefix("--min-rating=") {
                value
            } else {
                positional.push(arg.trim().to_string());
                continue;
            };

            match value.parse::<f32>().ok().and_then(MinRating::from_value) {
                Some(rating) => min_rating = rating,
                None => return Self::usage(&format!("invalid minimum rating '{}' (use 3, 3.5, 4 or 4.5)", value)),
            }
        }

        match positional.as_slice() {
            [location, preference] if !location.is_empty() && !preference.is_empty() => Command::Search {
                location: location.clone(),
                preference: preference.clone(),
                min_rating,
            },
            _ => Self::usage("search needs a location and a preference"),
        }
    }

    fn usage(problem: &str) -> Self {
        Command::Invalid {
            message: format!(
                "{}\nUsage: dinewise search <location> <preference> [--min-rating 3|3.5|4|4.5]",
                problem
            ),
        }
    }

    /// Get help text for all commands
    pub fn help_text() -> &'static str {
        r#"DineWise - maps-grounded restaurant recommendations

Usage: dinewise [command]

Commands:
  (none)                                   Open the DineWise window
  search <location> <preference> [-r N]    Search once and print the picks
  help                                     Show this help message

Options:
  -r, --min-rating N    Minimum rating: 3, 3.5, 4 (default) or 4.5

Environment:
  GEMINI_API_KEY        Gemini API key (API_KEY is accepted too)
  DINEWISE_MODEL        Model name (default gemini-2.5-flash)
  DINEWISE_API_BASE     Gemini API base URL
  DINEWISE_GEOLOCATION_URL
                        IP geolocation endpoint (default http://ip-api.com/json)
  RUST_LOG              Log filter, e.g. dinewise=debug

Tip: a location like "25.0330, 121.5654" is used as exact coordinates."#
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_window() {
        assert_eq!(Command::parse(&[]), Command::Window);
    }

    #[test]
    fn test_parse_search() {
        match Command::parse(&args(&["search", "Taipei", "Cheap Eats"])) {
            Command::Search { location, preference, min_rating } => {
                assert_eq!(location, "Taipei");
                assert_eq!(preference, "Cheap Eats");
                assert_eq!(min_rating, MinRating::Four);
            }
            other => panic!("Expected Search command, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_search_with_rating() {
        let expected = Command::Search {
            location: "25.0330, 121.5654".into(),
            preference: "dumplings".into(),
            min_rating: MinRating::ThreeAndHalf,
        };
        assert_eq!(
            Command::parse(&args(&["search", "25.0330, 121.5654", "--min-rating", "3.5", "dumplings"])),
            expected
        );
        assert_eq!(
            Command::parse(&args(&["search", "--min-rating=3.5", "25.0330, 121.5654", "dumplings"])),
            expected
        );
    }

    #[test]
    fn test_parse_bad_rating() {
        match Command::parse(&args(&["search", "Taipei", "tea", "-r", "5"])) {
            Command::Invalid { message } => assert!(message.contains("invalid minimum rating")),
            other => panic!("Expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_search_missing_preference() {
        assert!(matches!(
            Command::parse(&args(&["search", "Taipei"])),
            Command::Invalid { .. }
        ));
        assert!(matches!(
            Command::parse(&args(&["search", "Taipei", "  "])),
            Command::Invalid { .. }
        ));
    }

    #[test]
    fn test_parse_help_and_unknown() {
        assert_eq!(Command::parse(&args(&["--help"])), Command::Help);
        assert!(matches!(Command::parse(&args(&["open"])), Command::Invalid { .. }));
    }

    #[test]
    fn test_help_lists_environment() {
        let help = Command::help_text();
        for var in [
            "GEMINI_API_KEY",
            "DINEWISE_MODEL",
            "DINEWISE_API_BASE",
            "DINEWISE_GEOLOCATION_URL",
            "RUST_LOG",
        ] {
            assert!(help.contains(var), "help text is missing {}", var);
        }
    }
}
