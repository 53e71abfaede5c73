use clap::Parser;

/// Browse the most popular movies on The Movie Database.
#[derive(Debug, Parser)]
#[command(name = "popcorn", version)]
pub struct Args {
    /// Display language (two-letter code); defaults to the config, then the system locale.
    #[arg(short, long)]
    pub language: Option<String>,

    /// How many pages to show, scrolling to the end of each loaded page.
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,

    /// Ignore the saved list and load from the first page.
    #[arg(long)]
    pub fresh: bool,

    /// TMDB API key, overriding the config file and TMDB_API_KEY.
    #[arg(long)]
    pub api_key: Option<String>,

    /// Print a poster URL under each movie.
    #[arg(long)]
    pub posters: bool,

    /// Mirror log output to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Write the user config file (built-in defaults when there is none yet)
    /// and exit. Flag and environment overrides are not written.
    #[arg(long)]
    pub init_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["popcorn"]).unwrap();
        assert_eq!(args.pages, 1);
        assert!(args.language.is_none());
        assert!(!args.fresh);
        assert!(!args.init_config);
    }

    #[test]
    fn test_flags() {
        let args =
            Args::try_parse_from(["popcorn", "-l", "ru", "--pages", "3", "--fresh", "--posters"])
                .unwrap();
        assert_eq!(args.language.as_deref(), Some("ru"));
        assert_eq!(args.pages, 3);
        assert!(args.fresh);
        assert!(args.posters);
    }

    #[test]
    fn test_zero_pages_rejected() {
        assert!(Args::try_parse_from(["popcorn", "--pages", "0"]).is_err());
    }
}
