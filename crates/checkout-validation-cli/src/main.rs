use anyhow::{Context, Result};
use checkout_validation_core::{
    CardNetwork, FieldError, FormConfiguration, FormData, InputElementType, ValidationConfig,
    ValidationResult, ValidationService,
};
use clap::{Parser, Subcommand};
use colored::*;
use serde_json::json;
use std::fs;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "checkout-validate")]
#[command(about = "Validate payment form fields from the command line", long_about = None)]
struct Args {
    /// Path to config file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a single field value
    Field {
        /// Field type, e.g. card_number, cvv, postal_code
        #[arg(long = "type")]
        field_type: String,

        /// Value to validate; omit to check the missing-value path
        #[arg(long)]
        value: Option<String>,

        /// Card network for CVV checks (VISA, AMEX, ...)
        #[arg(long)]
        network: Option<String>,

        /// Billing country for postal code checks
        #[arg(long)]
        country: Option<String>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Validate a form read from a JSON file
    Form {
        /// JSON object of field values
        path: String,

        /// Also validate billing address fields
        #[arg(long)]
        billing: bool,

        /// Output format
        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Run the service self-test
    Health {
        /// Output format
        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Time the hot-path validations
    Bench {
        #[arg(long, default_value_t = 1000)]
        iterations: usize,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let config = ValidationConfig::load(args.config.as_deref())?;
    let service = ValidationService::from_config(&config);

    let passed = match args.command {
        Commands::Field {
            field_type,
            value,
            network,
            country,
            format,
        } => field_command(&service, &field_type, value, network, country, &format)?,
        Commands::Form {
            path,
            billing,
            format,
        } => form_command(&service, &path, billing, &format)?,
        Commands::Health { format } => health_command(&service, &format)?,
        Commands::Bench { iterations } => bench_command(&service, iterations),
    };

    if !passed {
        std::process::exit(1);
    }
    Ok(())
}

fn field_command(
    service: &ValidationService,
    field_type: &str,
    value: Option<String>,
    network: Option<String>,
    country: Option<String>,
    format: &str,
) -> Result<bool> {
    // unrecognized names go through the fail-closed path
    let field = InputElementType::from_str(field_type).unwrap_or(InputElementType::Unknown);
    let network = match network {
        Some(raw) => Some(
            CardNetwork::from_str(&raw).context(format!("Unknown card network: {}", raw))?,
        ),
        None => None,
    };

    let result = match (field, value.as_deref()) {
        (InputElementType::Cvv, Some(cvv)) => service.validate_cvv(cvv, network),
        (InputElementType::PostalCode, Some(code)) => {
            service.validate_postal_code(code, country.as_deref())
        }
        (field, value) => service.validate_field(field, value),
    };

    if format == "json" {
        let output = json!({
            "field": field,
            "valid": result.is_valid(),
            "error_code": result.error_code(),
            "message": result.error_message(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        output_field_human(field, &result);
    }

    Ok(result.is_valid())
}

fn output_field_human(field: InputElementType, result: &ValidationResult) {
    match result.error() {
        None => println!("{} {}", "[VALID]".green().bold(), field),
        Some(error) => {
            println!("{} {} {}", "[INVALID]".red().bold(), field, error.code);
            println!("  → {}", error.message);
        }
    }
}

fn form_command(
    service: &ValidationService,
    path: &str,
    billing: bool,
    format: &str,
) -> Result<bool> {
    let content =
        fs::read_to_string(path).context(format!("Failed to read form file: {}", path))?;
    let form = FormData::from_json(&content)
        .context(format!("Failed to parse form file: {}", path))?;

    let configuration = if billing {
        FormConfiguration::card_only().with_billing_address()
    } else {
        FormConfiguration::card_only()
    };

    let errors = service.validate_form_data(&form, &configuration);

    if format == "json" {
        let output = json!({
            "summary": {
                "fields": configuration.field_types().len(),
                "errors": errors.len(),
            },
            "errors": errors,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        output_form_human(&errors, configuration.field_types().len());
    }

    Ok(errors.is_empty())
}

fn output_form_human(errors: &[FieldError], field_count: usize) {
    for error in errors {
        println!(
            "{} {} {}",
            "[INVALID]".red().bold(),
            error.field_type,
            error.error_code
        );
        println!("  → {}", error.message);
    }

    let summary = if errors.is_empty() {
        format!("All {} fields valid!", field_count).green().bold()
    } else {
        format!(
            "Found {} invalid {} out of {}",
            errors.len(),
            if errors.len() == 1 { "field" } else { "fields" },
            field_count
        )
        .red()
        .bold()
    };
    println!("{}", summary);
}

fn health_command(service: &ValidationService, format: &str) -> Result<bool> {
    let report = service.perform_health_check();

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        let status = if report.is_healthy {
            "[HEALTHY]".green().bold()
        } else {
            "[UNHEALTHY]".red().bold()
        };
        println!("{}", status);
        println!("{}", report.summary());
    }

    Ok(report.is_healthy)
}

fn bench_command(service: &ValidationService, iterations: usize) -> bool {
    let benchmark = service.benchmark_validation_performance(iterations);
    println!("{}", benchmark.summary());
    println!();
    println!("{}", service.cache().metrics().performance_summary());
    true
}
