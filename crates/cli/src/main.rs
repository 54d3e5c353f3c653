use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use malignet_core::{
    constants::{DEFAULT_MOCK_DELAY_MS, DEFAULT_REQUEST_TIMEOUT_SECS},
    AssessmentError, CoreConfig, PatientForm, ProviderKind, Submission, SubmissionState,
    SummaryBackend,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "malignet")]
#[command(about = "MaligNet patient risk assessment CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit patient data and print the risk summary
    Assess {
        #[command(flatten)]
        patient: PatientArgs,
        /// Where the summary comes from
        #[arg(long, value_enum, default_value_t = ProviderArg::Local)]
        provider: ProviderArg,
        /// Artificial delay for the mock provider, in milliseconds
        #[arg(long, default_value_t = DEFAULT_MOCK_DELAY_MS)]
        delay_ms: u64,
        /// Base URL of the summary backend (http provider)
        #[arg(long)]
        url: Option<String>,
        /// Backend request timeout, in seconds
        #[arg(long, default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
        timeout_secs: u64,
    },
    /// Check patient data without submitting it
    Validate {
        #[command(flatten)]
        patient: PatientArgs,
    },
}

/// Form fields; defaults match the web form's initial values.
#[derive(Args)]
struct PatientArgs {
    /// Protein 1 value (max 6 characters)
    #[arg(long, default_value = "")]
    protein1: String,
    /// Protein 2 value (max 6 characters)
    #[arg(long, default_value = "")]
    protein2: String,
    /// Protein 3 value (max 6 characters)
    #[arg(long, default_value = "")]
    protein3: String,
    /// Protein 4 value (max 6 characters)
    #[arg(long, default_value = "")]
    protein4: String,
    /// HER2 status: Positive or Negative
    #[arg(long, default_value = "Positive")]
    her2: String,
    /// ER status: Positive or Negative
    #[arg(long, default_value = "Positive")]
    er: String,
    /// PR status: Positive or Negative
    #[arg(long, default_value = "Positive")]
    pr: String,
    /// Gender: Male, Female or Other
    #[arg(long, default_value = "Male")]
    gender: String,
    /// Age in whole years (0-120)
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    age: f64,
}

impl From<PatientArgs> for PatientForm {
    fn from(args: PatientArgs) -> Self {
        PatientForm {
            protein1: args.protein1,
            protein2: args.protein2,
            protein3: args.protein3,
            protein4: args.protein4,
            her2_status: args.her2,
            er_status: args.er,
            pr_status: args.pr,
            gender: args.gender,
            age: args.age,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ProviderArg {
    Local,
    Mock,
    Http,
}

impl From<ProviderArg> for ProviderKind {
    fn from(arg: ProviderArg) -> Self {
        match arg {
            ProviderArg::Local => ProviderKind::Local,
            ProviderArg::Mock => ProviderKind::MockDelay,
            ProviderArg::Http => ProviderKind::Http,
        }
    }
}

fn print_validation_errors(err: &AssessmentError) {
    match err {
        AssessmentError::Validation(errors) => {
            for e in errors.iter() {
                eprintln!("{}: {}", e.field, e.message);
            }
        }
        other => eprintln!("Error: {}", other),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("malignet_core=warn".parse()?)
                .add_directive("malignet=warn".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Assess {
            patient,
            provider,
            delay_ms,
            url,
            timeout_secs,
        }) => {
            let cfg = CoreConfig::new(
                provider.into(),
                Duration::from_millis(delay_ms),
                url,
                Duration::from_secs(timeout_secs),
            )?;
            let form = PatientForm::from(patient);
            let mut submission = Submission::new(SummaryBackend::from_config(&cfg)?);

            // Validate up front so that an invalid form never shows the busy message.
            if let Err(errors) = form.validate() {
                print_validation_errors(&AssessmentError::Validation(errors));
                return Ok(ExitCode::from(2));
            }

            println!("Processing...");
            match submission.submit(&form).await {
                Ok(SubmissionState::Succeeded(message)) => println!("{}", message),
                Ok(SubmissionState::Failed(message)) => {
                    tracing::warn!(provider = ?cfg.provider(), "assessment failed");
                    eprintln!("{}", message);
                    return Ok(ExitCode::FAILURE);
                }
                Ok(state) => anyhow::bail!("submission ended in unexpected state {:?}", state),
                Err(e) => {
                    print_validation_errors(&e);
                    return Ok(ExitCode::from(2));
                }
            }
        }
        Some(Commands::Validate { patient }) => match PatientForm::from(patient).validate() {
            Ok(_) => println!("Patient data is valid"),
            Err(errors) => {
                print_validation_errors(&AssessmentError::Validation(errors));
                return Ok(ExitCode::from(2));
            }
        },
        None => {
            println!("Use 'malignet --help' for commands");
        }
    }

    Ok(ExitCode::SUCCESS)
}
