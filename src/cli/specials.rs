/// What a one-shot argument asks for.
#[derive(Debug, PartialEq, Eq)]
enum Special {
    Help,
    Version,
}

fn recognize(arg: &str) -> Option<Special> {
    if matches!(arg, "help" | "--help" | "-H" | "-h" | "-?") {
        return Some(Special::Help);
    }
    if matches!(arg, "version" | "--version" | "-V" | "-v") {
        return Some(Special::Version);
    }
    None
}

/// Handle special one-shot CLI commands like `--help` or `--version`.
/// Returns true if a special action was handled and the program should exit.
pub fn handle_specials_if_needed() -> bool {
    let mut args = std::env::args();
    let _ = args.next(); // binary name

    let arg = args.next().unwrap_or_default();
    match recognize(&arg) {
        Some(Special::Help) => {
            println!(
                "{}",
                concat!(
                    "market-research: cited answers from fresh news\n\n",
                    "  $ market-research\n",
                    "  > latest news on electric vehicle tariffs\n\n",
                    "Needs ANTHROPIC_API_KEY and TAVILY_API_KEY in the environment or a .env file.\n",
                    "Type quit, exit or q to leave."
                )
            );
            true
        }
        Some(Special::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_help_and_version_spellings() {
        assert_eq!(recognize("--help"), Some(Special::Help));
        assert_eq!(recognize("-h"), Some(Special::Help));
        assert_eq!(recognize("-V"), Some(Special::Version));
        assert_eq!(recognize("version"), Some(Special::Version));
        assert_eq!(recognize(""), None);
        assert_eq!(recognize("oil prices"), None);
    }
}
