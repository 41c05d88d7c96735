use clap::Parser;
use fruit_etl::core::batch::{batch_file_name, partition};
use fruit_etl::core::species::{self, extract_common_names};
use fruit_etl::core::{ConfigProvider, SpeciesRecord};
use fruit_etl::utils::error::ErrorSeverity;
use fruit_etl::utils::{logger, validation::Validate};
use fruit_etl::{
    BatchWriter, CliConfig, EtlEngine, EtlError, FruitPipeline, GeminiClient,
    InformationRetriever, LocalStorage, LogFormat, Result, RunReport, TomlConfig,
};

#[tokio::main]
async fn main() {
    // 先載入 .env，讓 clap 的 env 參數也讀得到 GOOGLE_API_KEY
    let dotenv_path = dotenvy::dotenv().ok();
    let cli = CliConfig::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting fruit-etl");
    if let Some(path) = dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let outcome = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            match TomlConfig::from_file(path) {
                Ok(config) => execute(&config, cli.dry_run).await,
                Err(e) => Err(e),
            }
        }
        None => execute(&cli, cli.dry_run).await,
    };

    match outcome {
        Ok(Some(report)) => {
            println!(
                "✅ Research finished: {} fruits saved in {} batch files",
                report.items_succeeded,
                report.batches_written.len()
            );
            for path in &report.batches_written {
                println!("📁 {}", path);
            }
        }
        Ok(None) => {}
        Err(e) => {
            tracing::error!(
                "❌ Run aborted: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(exit_code(&e));
        }
    }
}

/// Startup is fail-fast: configuration, model client and species file must all be usable
/// before the first model call.
async fn execute<C: ConfigProvider + Validate>(config: &C, dry_run: bool) -> Result<Option<RunReport>> {
    config.validate()?;
    let model = GeminiClient::from_config(config)?;
    tracing::debug!("Model endpoint: {}", model.endpoint());

    let species = species::load(config.species_file())?;

    if dry_run {
        tracing::info!("🔍 DRY RUN MODE - No model calls or files will be made");
        perform_dry_run(config, &species);
        return Ok(None);
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let pipeline = FruitPipeline::new(
        species,
        InformationRetriever::new(model, config.include_references()),
        BatchWriter::new(storage, config.file_pattern()),
        config.batch_size(),
    );

    EtlEngine::new(pipeline).run().await.map(Some)
}

fn perform_dry_run<C: ConfigProvider>(config: &C, species: &[SpeciesRecord]) {
    let plan = plan_batches(config, species);
    let name_count: usize = plan.iter().map(|(_, names)| names.len()).sum();

    println!(
        "{} species, {} common names, {} batches",
        species.len(),
        name_count,
        plan.len()
    );
    for (file_name, names) in &plan {
        println!("  {} -> {}", file_name, names.join(", "));
    }
}

/// Batch file name and the common names it would hold, in run order.
fn plan_batches<C: ConfigProvider>(config: &C, species: &[SpeciesRecord]) -> Vec<(String, Vec<String>)> {
    let names = extract_common_names(species);
    partition(&names, config.batch_size())
        .into_iter()
        .enumerate()
        .map(|(i, group)| (batch_file_name(config.file_pattern(), i + 1), group.to_vec()))
        .collect()
}

fn exit_code(e: &EtlError) -> i32 {
    match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}
