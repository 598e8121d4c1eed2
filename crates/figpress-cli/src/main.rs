mod assemble;

use clap::Parser;
use figpress_codegen::transformer::heading_tag;
use figpress_codegen::HeadingMap;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "figpress")]
#[command(about = "Turn design-tool HTML exports into WordPress page sections")]
#[command(version)]
struct Cli {
    /// Exported HTML file
    #[arg(short, long)]
    input: PathBuf,

    /// Page name; output goes to pages/page-<PAGE>.php and its stylesheet
    #[arg(short, long, required_unless_present = "analyze")]
    page: Option<String>,

    /// Section name, used as the BEM block for generated classes
    #[arg(short, long, required_unless_present = "analyze")]
    section: Option<String>,

    /// Free-form note written above the section
    #[arg(short, long, default_value = "")]
    notes: String,

    /// Project root containing pages/ and assets/
    #[arg(short, long, default_value = ".")]
    base: PathBuf,

    /// Heading map as JSON, e.g. '{"Welcome": "h1"}'
    #[arg(short = 'H', long, default_value = "{}", conflicts_with = "headings_file")]
    headings: String,

    /// Read the heading map JSON from a file
    #[arg(long)]
    headings_file: Option<PathBuf>,

    /// Only list potential titles and button texts; write nothing
    #[arg(short, long)]
    analyze: bool,

    /// Print the analysis as JSON
    #[arg(long, requires = "analyze")]
    json: bool,
}

/// Errors surfaced at the command boundary.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read {}: {source}", .path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot read heading map {}: {source}", .path.display())]
    ReadHeadings {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid heading map JSON: {0}")]
    InvalidHeadings(#[source] serde_json::Error),

    #[error("cannot encode analysis: {0}")]
    Report(#[source] serde_json::Error),

    #[error("cannot write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("missing required argument --{0}")]
    MissingArgument(&'static str),
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let markup = read_source(&cli.input)?;

    if cli.analyze {
        return cmd_analyze(&markup, cli.json);
    }

    let page = cli.page.as_deref().ok_or(CliError::MissingArgument("page"))?;
    let section = cli
        .section
        .as_deref()
        .ok_or(CliError::MissingArgument("section"))?;
    let headings = load_headings(&cli.headings, cli.headings_file.as_deref())?;

    cmd_build(&markup, page, section, &cli.notes, &cli.base, &headings)
}

fn read_source(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}

fn cmd_analyze(markup: &str, json: bool) -> Result<(), CliError> {
    let analysis = figpress_codegen::analyze(markup);

    if json {
        let report = serde_json::to_string_pretty(&analysis).map_err(CliError::Report)?;
        println!("{report}");
        return Ok(());
    }

    println!("Potential titles:");
    for (i, title) in analysis.potential_titles.iter().enumerate() {
        println!("  {}. {title}", i + 1);
    }
    println!("\nButton texts:");
    for text in &analysis.button_texts {
        println!("  - {text}");
    }
    Ok(())
}

fn cmd_build(
    markup: &str,
    page: &str,
    section: &str,
    notes: &str,
    base: &Path,
    headings: &HeadingMap,
) -> Result<(), CliError> {
    let output = figpress_codegen::compile(markup, section, headings);
    log::debug!(
        "section {section}: {} line(s) of markup, {} byte(s) of css",
        output.html.lines().count(),
        output.css.len()
    );

    for outcome in assemble::write_section(base, page, section, notes, &output)? {
        if outcome.created {
            log::info!("Created {}", outcome.path.display());
        } else {
            log::info!("Appended {}", outcome.path.display());
        }
    }
    Ok(())
}

/// Load the heading map from `--headings-file` if given, else from `--headings`.
fn load_headings(inline: &str, file: Option<&Path>) -> Result<HeadingMap, CliError> {
    let json = match file {
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::ReadHeadings {
            path: path.to_path_buf(),
            source,
        })?,
        None => inline.to_string(),
    };
    parse_headings(&json)
}

fn parse_headings(json: &str) -> Result<HeadingMap, CliError> {
    let headings: HeadingMap = serde_json::from_str(json).map_err(CliError::InvalidHeadings)?;

    for (text, tag) in &headings {
        if heading_tag(tag).is_none() {
            log::warn!("heading {text:?} maps to {tag:?}, expected h1-h6; it will be ignored");
        }
    }
    Ok(headings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_arguments() {
        let cli = Cli::try_parse_from([
            "figpress", "-i", "hero.html", "-p", "home", "-s", "hero", "-H", r#"{"Hi":"h1"}"#,
        ])
        .unwrap();
        assert_eq!(cli.page.as_deref(), Some("home"));
        assert_eq!(cli.section.as_deref(), Some("hero"));
        assert_eq!(cli.base, PathBuf::from("."));
        assert_eq!(cli.headings, r#"{"Hi":"h1"}"#);
        assert!(!cli.analyze);
    }

    #[test]
    fn test_page_and_section_required_without_analyze() {
        assert!(Cli::try_parse_from(["figpress", "-i", "hero.html", "-s", "hero"]).is_err());
        assert!(Cli::try_parse_from(["figpress", "-i", "hero.html", "-p", "home"]).is_err());
    }

    #[test]
    fn test_analyze_needs_only_input() {
        let cli = Cli::try_parse_from(["figpress", "-i", "hero.html", "--analyze", "--json"]).unwrap();
        assert!(cli.analyze);
        assert!(cli.json);
        assert!(cli.page.is_none());
    }

    #[test]
    fn test_json_requires_analyze() {
        assert!(Cli::try_parse_from([
            "figpress", "-i", "a.html", "-p", "home", "-s", "hero", "--json"
        ])
        .is_err());
    }

    #[test]
    fn test_headings_and_headings_file_conflict() {
        assert!(Cli::try_parse_from([
            "figpress",
            "-i",
            "a.html",
            "-p",
            "home",
            "-s",
            "hero",
            "-H",
            "{}",
            "--headings-file",
            "h.json",
        ])
        .is_err());
    }

    #[test]
    fn test_parse_headings_keeps_order() {
        let headings = parse_headings(r#"{"Welcome": "h1", "About": "h2", "Team": "h3"}"#).unwrap();
        let texts: Vec<&String> = headings.keys().collect();
        assert_eq!(texts, vec!["Welcome", "About", "Team"]);
        assert_eq!(headings["About"], "h2");
    }

    #[test]
    fn test_parse_headings_invalid_json() {
        let err = parse_headings("{Welcome: h1}").unwrap_err();
        assert!(matches!(err, CliError::InvalidHeadings(_)));
        assert!(err.to_string().starts_with("invalid heading map JSON"));
    }

    #[test]
    fn test_parse_headings_unknown_tag_kept() {
        let headings = parse_headings(r#"{"Hello": "p"}"#).unwrap();
        assert_eq!(headings.len(), 1);
    }

    #[test]
    fn test_load_headings_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("headings.json");
        std::fs::write(&path, r#"{"Pricing": "h2"}"#).unwrap();

        let headings = load_headings("{}", Some(&path)).unwrap();
        assert_eq!(headings["Pricing"], "h2");
    }

    #[test]
    fn test_load_headings_missing_file() {
        let err = load_headings("{}", Some(Path::new("/nonexistent/headings.json"))).unwrap_err();
        assert!(matches!(err, CliError::ReadHeadings { .. }));
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Path::new("/nonexistent/input.html")).unwrap_err();
        assert!(err.to_string().starts_with("cannot read /nonexistent/input.html"));
    }

    #[test]
    fn test_build_writes_page_files() {
        let dir = tempfile::tempdir().unwrap();
        let markup = r#"<div data-layer="Frame" style="background:#fff"><div data-layer="Title">Welcome</div></div>"#;
        let headings = parse_headings(r#"{"Welcome": "h1"}"#).unwrap();

        cmd_build(markup, "home", "hero", "", dir.path(), &headings).unwrap();

        let php = std::fs::read_to_string(dir.path().join("pages/page-home.php")).unwrap();
        assert!(php.contains("<section class=\"hero\">\n<div class=\"hero__wrap\">"));
        assert!(php.contains("<h1 class=\"hero__title-2 hero__title\">"));
        let css = std::fs::read_to_string(dir.path().join("assets/css/pages/page-home.css")).unwrap();
        assert!(css.contains(".hero__wrap {\n    background:#fff;\n}"));
    }
}
