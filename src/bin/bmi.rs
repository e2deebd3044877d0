use clap::Parser;
use delivery_calc::config::BmiArgs;
use delivery_calc::core::bmi;
use delivery_calc::utils::logger;
use delivery_calc::utils::prompt::prompt_parsed;
use delivery_calc::CalcError;
use std::io::{self, BufRead, Write};

fn main() {
    let args = BmiArgs::parse();

    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    if let Err(e) = run(&args, &mut input, &mut output) {
        tracing::error!("❌ BMI calculation failed: {}", e);
        eprintln!("🚨 {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }
}

fn run<R: BufRead, W: Write>(args: &BmiArgs, input: &mut R, output: &mut W) -> Result<(), CalcError> {
    let height = match args.height {
        Some(height) => height,
        None => prompt_parsed(input, output, "height_cm", "Enter your height in cm: ")?,
    };
    let weight = match args.weight {
        Some(weight) => weight,
        None => prompt_parsed(input, output, "weight_kg", "Enter your weight in kg: ")?,
    };

    let reading = bmi::reading(height, weight)?;
    tracing::debug!("BMI {:.2} for {}cm / {}kg", reading.value, height, weight);

    writeln!(output, "Your BMI is {:.1}", reading.value)?;
    writeln!(output, "You are {}.", reading.category)?;
    Ok(())
}
