use chrono::Datelike;
use clap::Parser;
use delivery_calc::adapters::{GeminiLeapYears, LeapApiClient};
use delivery_calc::config::{LeapArgs, LeapSourceKind};
use delivery_calc::core::leap::{format_year_rows, LocalLeapYears};
use delivery_calc::domain::ports::LeapYearSource;
use delivery_calc::utils::logger;
use delivery_calc::utils::prompt::prompt_parsed;
use delivery_calc::{CalcError, TomlConfig};
use std::io::{self, BufRead, Write};

const RULE: &str = "----------------------------------------";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = LeapArgs::parse();

    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    let source = match build_source(&args) {
        Ok(source) => source,
        Err(e) => {
            tracing::error!("❌ Could not set up '{:?}' source: {}", args.source, e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };
    tracing::info!("Using {} leap-year source", source.name());

    let mut failures = Vec::new();

    let current_year = chrono::Local::now().year();
    println!("--- Checking the Current Year ({}) ---", source.name());
    if let Err(e) = check_year(source.as_ref(), current_year, true).await {
        failures.push(e);
    }

    let stdin = io::stdin();
    let year = match requested_year(&args, &mut stdin.lock(), &mut io::stdout()) {
        Ok(year) => year,
        Err(e) => {
            tracing::warn!("Year input rejected: {}", e);
            println!("{}", e.user_friendly_message());
            failures.push(e);
            None
        }
    };

    if let Some(year) = year {
        println!("--- Checking Specific Year: {} ({}) ---", year, source.name());
        if let Err(e) = check_year(source.as_ref(), year, false).await {
            failures.push(e);
        }
    }

    if let Some(range) = args.range.as_deref() {
        if let &[start, end] = range {
            println!("--- Checking Range: {} to {} ({}) ---", start, end, source.name());
            if let Err(e) = check_range(source.as_ref(), start, end).await {
                failures.push(e);
            }
        }
    }

    if let Some(worst) = failures.iter().max_by_key(|e| e.severity()) {
        std::process::exit(worst.exit_code());
    }
    Ok(())
}

/// The year to check: `--year` when given, nothing when only `--range` was
/// asked for, otherwise one typed at the prompt.
fn requested_year<R: BufRead, W: Write>(
    args: &LeapArgs,
    input: &mut R,
    output: &mut W,
) -> Result<Option<i32>, CalcError> {
    match (args.year, &args.range) {
        (Some(year), _) => Ok(Some(year)),
        (None, Some(_)) => Ok(None),
        (None, None) => prompt_parsed(input, output, "year", "enter year> ").map(Some),
    }
}

fn build_source(args: &LeapArgs) -> Result<Box<dyn LeapYearSource>, CalcError> {
    if args.source == LeapSourceKind::Local {
        return Ok(Box::new(LocalLeapYears));
    }

    let config = TomlConfig::load(args.config.as_deref())?;
    let source: Box<dyn LeapYearSource> = match args.source {
        LeapSourceKind::Api => Box::new(LeapApiClient::new(config.leap_api, config.retry)?),
        LeapSourceKind::Ai => Box::new(GeminiLeapYears::new(config.gemini, config.retry)?),
        LeapSourceKind::Local => Box::new(LocalLeapYears),
    };
    Ok(source)
}

async fn check_year(
    source: &dyn LeapYearSource,
    year: i32,
    current: bool,
) -> Result<(), CalcError> {
    let outcome = source.is_leap_year(year).await;
    let label = if current {
        format!("The current year ({})", year)
    } else {
        format!("The year {}", year)
    };

    let result = match outcome {
        Ok(is_leap) => {
            let status = if is_leap { "is" } else { "is NOT" };
            println!("{} {} a leap year.", label, status);
            Ok(())
        }
        Err(e) => {
            tracing::warn!("Leap check for {} failed: {}", year, e);
            println!("An error occurred while checking year {}: {}", year, e);
            Err(e)
        }
    };
    println!("{}\n", RULE);
    result
}

async fn check_range(source: &dyn LeapYearSource, start: i32, end: i32) -> Result<(), CalcError> {
    let result = match source.leap_years_between(start, end).await {
        Ok(years) => {
            println!(
                "Found {} leap years between {} and {}.",
                years.len(),
                start,
                end
            );
            if years.is_empty() {
                println!("No leap years found in this range.");
            } else {
                println!("Leap Years:");
                println!("{}\n", format_year_rows(&years));
            }
            Ok(())
        }
        Err(e) => {
            tracing::warn!("Range check {}..={} failed: {}", start, end, e);
            println!("An error occurred while checking the range: {}", e);
            Err(e)
        }
    };
    println!("{}\n", RULE);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt_year(argv: &[&str], typed: &str) -> (Result<Option<i32>, CalcError>, String) {
        let args = LeapArgs::parse_from(argv);
        let mut input = Cursor::new(typed.as_bytes().to_vec());
        let mut output = Vec::new();
        let year = requested_year(&args, &mut input, &mut output);
        (year, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_year_is_prompted_when_not_given() {
        let (year, output) = prompt_year(&["leap-year"], "1900\n");
        assert_eq!(year.unwrap(), Some(1900));
        assert_eq!(output, "enter year> ");
    }

    #[test]
    fn test_year_argument_skips_prompt() {
        let (year, output) = prompt_year(&["leap-year", "--year", "2024"], "");
        assert_eq!(year.unwrap(), Some(2024));
        assert!(output.is_empty());
    }

    #[test]
    fn test_range_only_skips_prompt() {
        let (year, output) = prompt_year(&["leap-year", "--range", "2000", "2010"], "");
        assert_eq!(year.unwrap(), None);
        assert!(output.is_empty());
    }

    #[test]
    fn test_typed_year_must_be_a_number() {
        let (year, _) = prompt_year(&["leap-year"], "next year\n");
        match year {
            Err(CalcError::InvalidInput { field, .. }) => assert_eq!(field, "year"),
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }
}
