//! Hack X-Ray CLI - analyze a money hack from stdin.
//!
//! Reads the hack text from standard input, runs the full analysis flow
//! against the configured model backend, and prints the validated lab
//! report as pretty JSON.
//!
//! ```text
//! echo "open bank accounts for the sign-up bonuses" | xray --country US
//! ```

use std::io::Read;
use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use hack_xray::adapters::events::InMemoryEventRecorder;
use hack_xray::adapters::generator::{
    GeminiConfig, GeminiGenerator, MockReportGenerator, OpenAIConfig, OpenAIGenerator,
};
use hack_xray::adapters::repository::InMemoryReportRepository;
use hack_xray::application::{RunXRayCommand, RunXRayHandler};
use hack_xray::config::{AppConfig, Backend};
use hack_xray::domain::pipeline::{ReportPipeline, SafetyScreener};
use hack_xray::ports::ReportGenerator;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), String> {
    let args = parse_args()?;

    let config = AppConfig::load().map_err(|e| e.to_string())?;
    config.validate().map_err(|e| e.to_string())?;

    let mut hack_text = String::new();
    std::io::stdin()
        .read_to_string(&mut hack_text)
        .map_err(|e| format!("failed to read hack text from stdin: {e}"))?;
    let hack_text = hack_text.trim().to_owned();
    if hack_text.is_empty() {
        return Err("no hack text on stdin".to_owned());
    }

    let generator = build_generator(&config)?;
    let screener = SafetyScreener::with_additional_phrases(config.safety.extra_phrases());

    let handler = RunXRayHandler::new(
        generator,
        Arc::new(InMemoryReportRepository::new()),
        Arc::new(InMemoryEventRecorder::new()),
    )
    .with_pipeline(ReportPipeline::with_screener(screener));

    let mut command = RunXRayCommand::new(hack_text);
    if let Some(country) = args.country {
        command = command.with_country(country);
    }
    if let Some(link) = args.link {
        command = command.with_source_link(link);
    }

    let result = handler.handle(command).await.map_err(|e| e.to_string())?;

    let json = serde_json::to_string_pretty(&result.report)
        .map_err(|e| format!("failed to render report: {e}"))?;
    println!("{json}");
    Ok(())
}

fn build_generator(config: &AppConfig) -> Result<Arc<dyn ReportGenerator>, String> {
    let backend = config.generation.backend().map_err(|e| e.to_string())?;

    let generator: Arc<dyn ReportGenerator> = match backend {
        Backend::Mock => Arc::new(MockReportGenerator::new()),
        Backend::Gemini => {
            let key = config.generation.gemini_api_key.clone().unwrap_or_default();
            let mut gemini = GeminiConfig::new(key)
                .with_timeout(config.generation.timeout())
                .with_max_retries(config.generation.max_retries);
            if let Some(model) = &config.generation.model {
                gemini = gemini.with_model(model);
            }
            Arc::new(GeminiGenerator::new(gemini).map_err(|e| e.to_string())?)
        }
        Backend::OpenAI => {
            let key = config.generation.openai_api_key.clone().unwrap_or_default();
            let mut openai = OpenAIConfig::new(key)
                .with_timeout(config.generation.timeout())
                .with_max_retries(config.generation.max_retries);
            if let Some(model) = &config.generation.model {
                openai = openai.with_model(model);
            }
            Arc::new(OpenAIGenerator::new(openai).map_err(|e| e.to_string())?)
        }
    };

    let info = generator.generator_info();
    tracing::info!(backend = %info.name, model = %info.model, "selected generation backend");
    Ok(generator)
}

struct Args {
    country: Option<String>,
    link: Option<String>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        country: None,
        link: None,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--country" => {
                args.country = Some(iter.next().ok_or("--country needs a value")?);
            }
            "--link" => {
                args.link = Some(iter.next().ok_or("--link needs a value")?);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }
    Ok(args)
}
