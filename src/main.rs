use clap::Parser;
use delivery_calc::adapters::IpGeolocationClient;
use delivery_calc::core::location::resolve_location;
use delivery_calc::domain::model::{validate_cart_value, validate_customer_id};
use delivery_calc::utils::logger;
use delivery_calc::utils::prompt::{prompt_line, prompt_parsed};
use delivery_calc::{CalcError, CliConfig, DeliveryFeeEvaluator, PricingRequest, TomlConfig};
use std::io::{self, BufRead, Write};

const RULE: &str = "---------------------------------------------";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliConfig::parse();

    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting delivery-fee calculator");
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    let config = match TomlConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code());
        }
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    if let Err(e) = run(&args, &config, &mut input, &mut output).await {
        tracing::error!(
            "❌ Delivery calculation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("\n🚨 {} Please run again.", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn run<R: BufRead, W: Write>(
    args: &CliConfig,
    config: &TomlConfig,
    input: &mut R,
    output: &mut W,
) -> Result<(), CalcError> {
    writeln!(output, "🛒 E-Commerce Delivery Calculator Service 🚚")?;
    writeln!(output, "{}", RULE)?;

    let customer_id: i64 = match args.customer_id {
        Some(id) => id,
        None => prompt_parsed(input, output, "customer_id", "Enter Customer ID (integer): ")?,
    };
    validate_customer_id(customer_id)?;

    let cart_value: f64 = match args.cart_value {
        Some(value) => value,
        None => prompt_parsed(input, output, "cart_value", "Enter Cart Value (e.g., 850.50): ")?,
    };
    validate_cart_value(cart_value)?;

    let location = match &args.location {
        Some(location) => location.clone(),
        None if args.geolocate => geolocate(config).await,
        None => prompt_line(
            input,
            output,
            "Enter Location (e.g., India, Remote, Outside India): ",
        )?,
    };

    let evaluator = DeliveryFeeEvaluator::new(config.pricing.clone());
    let request = PricingRequest::new(customer_id, cart_value, location);
    let result = evaluator.evaluate(&request)?;
    let breakdown = &result.breakdown;

    if breakdown.prime_override {
        writeln!(
            output,
            "\n✅ Customer ID {} is a prime number! Delivery is FREE.",
            request.customer_id
        )?;
    }
    if breakdown.surcharge > 0.0 {
        writeln!(
            output,
            "⚠️ Location '{}' is remote/outside India. A surcharge of +{} will be added.",
            request.location, breakdown.surcharge
        )?;
    }

    tracing::info!(
        "Fee for customer {}: tier={} base={} surcharge={} total={}",
        request.customer_id,
        breakdown.tier,
        breakdown.base_charge,
        breakdown.surcharge,
        result.fee
    );

    writeln!(output, "{}", RULE)?;
    writeln!(output, "✨ FINAL DELIVERY CALCULATION ✨")?;
    writeln!(output, "Customer ID: {}", request.customer_id)?;
    writeln!(output, "Cart Value:  {:.2}", request.cart_value)?;
    writeln!(output, "Location:    {}", request.location)?;
    writeln!(output, "{}", RULE)?;

    if result.is_free() {
        writeln!(output, "TOTAL DELIVERY CHARGE: FREE!")?;
    } else {
        writeln!(output, "TOTAL DELIVERY CHARGE: {:.2} rupees", result.fee)?;
    }
    writeln!(output, "{}", RULE)?;

    Ok(())
}

async fn geolocate(config: &TomlConfig) -> String {
    let fallback = &config.geolocation.fallback_location;
    match IpGeolocationClient::new(config.geolocation.clone()) {
        Ok(client) => resolve_location(&client, fallback).await,
        Err(e) => {
            tracing::warn!("⚠️ Geolocation client unavailable ({}), defaulting to '{}'", e, fallback);
            fallback.clone()
        }
    }
}
