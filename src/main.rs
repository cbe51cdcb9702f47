// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::path::PathBuf;
use topic2slides::output::{deliver, DeliveryTarget, OutputPlan, OutputReport};
use topic2slides::{
    generate_deck, AccessToken, AppConfig, AppError, CommandLineInput, DeckRenderer,
    GeneratedDeck, GoogleSlidesRenderer, PresentationService, RunMode, Topic,
};

/// Sets up logging configuration.
fn setup_logging(verbose: bool, serving: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else if serving {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("topic2slides.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose || serving {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    // Deck JSON goes to stdout, so console logging uses stderr.
    let console_appender = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)
        .with_context(|| format!("cannot open log file {}", log_file_path.display()))?;

    let config = Config::builder()
        .appender(Appender::builder().build("console", Box::new(console_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("console")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Drafts a deck, delivers its JSON and optionally renders it.
async fn execute_generate(
    config: &AppConfig,
    topic: &Topic,
    output_file: Option<PathBuf>,
    access_token: Option<&AccessToken>,
) -> Result<(), AppError> {
    let pipeline = TopicToSlides::new(config);

    let generated = pipeline.draft(topic).await?;
    let report = pipeline.deliver_deck(&generated, output_file)?;
    pipeline.report_completion(&generated, &report);

    if let Some(token) = access_token {
        let rendered = GoogleSlidesRenderer::with_base_url(config.slides_base_url.as_base())?
            .render(&generated.deck, token)
            .await?;
        eprintln!(
            "✓ Created '{}' with {} slides: {}",
            rendered.presentation_title, rendered.total_slides, rendered.url
        );
    }

    Ok(())
}

/// Orchestrates drafting and local delivery of a deck.
struct TopicToSlides<'a> {
    config: &'a AppConfig,
}

impl<'a> TopicToSlides<'a> {
    fn new(config: &'a AppConfig) -> Self {
        Self { config }
    }

    async fn draft(&self, topic: &Topic) -> Result<GeneratedDeck, AppError> {
        generate_deck(topic, self.config).await
    }

    /// Writes the deck JSON to the configured file or stdout.
    fn deliver_deck(
        &self,
        generated: &GeneratedDeck,
        output_file: Option<PathBuf>,
    ) -> Result<OutputReport, AppError> {
        let json = serde_json::to_string_pretty(&generated.deck)?;
        let report = deliver(OutputPlan::for_content(json, output_file))?;

        if !report.is_success() {
            return Err(AppError::DeliveryFailed {
                failures: report.failures(),
            });
        }

        Ok(report)
    }

    /// Reports deck diagnostics and delivery confirmations on stderr.
    fn report_completion(&self, generated: &GeneratedDeck, report: &OutputReport) {
        let bounds = self.config.generation.bounds;

        for warning in &generated.warnings {
            eprintln!("⚠️  {}", warning);
        }
        if !generated.skipped.is_empty() {
            eprintln!(
                "⚠️  Dropped {} malformed slide(s) from the model output.",
                generated.skipped.len()
            );
        }

        eprintln!(
            "📄 Drafted '{}' with {} slides (expected {}).",
            generated.deck.presentation_title,
            generated.deck.len(),
            bounds
        );

        for completed in &report.completed {
            if let DeliveryTarget::WriteFile { path, .. } = &completed.operation {
                eprintln!("✓ Deck saved to {}", path.display());
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    let serving = matches!(cli.command, topic2slides::config::Command::Serve { .. });
    setup_logging(cli.verbose, serving).context("failed to initialize logging")?;

    let config = AppConfig::resolve(cli).context("invalid configuration")?;

    match &config.mode {
        RunMode::Generate {
            topic,
            output_file,
            access_token,
        } => {
            execute_generate(&config, topic, output_file.clone(), access_token.as_ref()).await?;
        }
        RunMode::Serve {
            bind,
            allowed_origin,
        } => {
            let service = PresentationService::from_config(&config)?;
            topic2slides::service::serve(service, bind, allowed_origin)
                .await
                .with_context(|| format!("server on {} stopped", bind))?;
        }
    }

    Ok(())
}
