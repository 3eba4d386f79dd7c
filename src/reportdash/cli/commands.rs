use super::args::{Cli, Commands, FilterArgs};
use super::print::{print_config, print_full_record, print_messages, print_records};
use async_trait::async_trait;
use directories::ProjectDirs;
use reportdash::api::DashboardApi;
use reportdash::assist::openai::OpenAiGenerator;
use reportdash::assist::{
    AssistOutcome, AssistPipeline, GenerationError, GenerationKind, TextGenerator,
};
use reportdash::commands::config::ConfigAction;
use reportdash::config::DashConfig;
use reportdash::error::{ReportError, Result};
use reportdash::model::{Category, Priority};
use reportdash::store::seed::{FixtureSeed, JsonFileSeed, SeedSource};
use reportdash::store::RecordStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

const HOME_ENV: &str = "REPORTDASH_HOME";

/// The configured generator, or the reason there is none.
///
/// Listing and viewing work without an API key; only the assist commands
/// need one, and they check [`ConfiguredGenerator::ensure_ready`] first.
struct ConfiguredGenerator(std::result::Result<OpenAiGenerator, GenerationError>);

impl ConfiguredGenerator {
    fn ensure_ready(&self) -> Result<()> {
        match &self.0 {
            Ok(_) => Ok(()),
            Err(e) => Err(ReportError::Api(e.to_string())),
        }
    }
}

#[async_trait]
impl TextGenerator for ConfiguredGenerator {
    async fn generate(
        &self,
        kind: GenerationKind,
        system_framing: &str,
        user_input: &str,
    ) -> std::result::Result<String, GenerationError> {
        match &self.0 {
            Ok(generator) => generator.generate(kind, system_framing, user_input).await,
            Err(e) => Err(e.clone()),
        }
    }
}

struct AppContext {
    api: DashboardApi<ConfiguredGenerator>,
    config_dir: PathBuf,
}

pub async fn run(cli: Cli) -> Result<()> {
    let mut ctx = init_context()?;

    match cli.command {
        Some(Commands::List { filters }) => handle_list(&mut ctx, filters),
        Some(Commands::View { id }) => handle_view(&ctx, &id),
        Some(Commands::Move { from, to, filters }) => handle_move(&mut ctx, from, to, filters),
        Some(Commands::Draft {
            prompt,
            specialty,
            save,
            title,
            patient_name,
            patient_id,
            priority,
        }) => {
            let prompt = prompt.join(" ");
            let details = save.then(|| SaveDetails {
                title: title.unwrap_or_default(),
                patient_name: patient_name.unwrap_or_default(),
                patient_id: patient_id.unwrap_or_default(),
                priority,
            });
            handle_draft(&mut ctx, &prompt, specialty, details).await
        }
        Some(Commands::Summarize { id }) => handle_summarize(&ctx, &id).await,
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&mut ctx, FilterArgs::default()),
    }
}

fn config_dir() -> Result<PathBuf> {
    if let Ok(home) = std::env::var(HOME_ENV) {
        if !home.trim().is_empty() {
            return Ok(PathBuf::from(home));
        }
    }
    ProjectDirs::from("com", "reportdash", "reportdash")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| ReportError::Config("could not determine config dir".into()))
}

fn init_context() -> Result<AppContext> {
    let config_dir = config_dir()?;
    let config = DashConfig::load(&config_dir)?;
    debug!(dir = %config_dir.display(), "loaded config");

    let generator = ConfiguredGenerator(OpenAiGenerator::from_env(config.assist.clone()));
    let mut pipeline = AssistPipeline::new(Arc::new(generator));
    if let Some(limit) = config.assist.timeout() {
        pipeline = pipeline.with_timeout(limit);
    }

    let mut api = DashboardApi::new(RecordStore::new(), pipeline);
    let seed: Box<dyn SeedSource> = match &config.seed_file {
        Some(path) => Box::new(JsonFileSeed::new(path)),
        None => Box::new(FixtureSeed),
    };
    api.seed(seed.as_ref())?;

    Ok(AppContext { api, config_dir })
}

fn apply_filters(ctx: &mut AppContext, filters: FilterArgs) {
    if let Some(term) = filters.search {
        ctx.api.set_search_term(&term);
    }
    if let Some(category) = filters.category {
        ctx.api.set_category_filter(category);
    }
    if let Some(status) = filters.status {
        ctx.api.set_status_filter(status);
    }
}

fn handle_list(ctx: &mut AppContext, filters: FilterArgs) -> Result<()> {
    apply_filters(ctx, filters);
    let result = ctx.api.list()?;
    print_records(&result.listed_records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, id: &str) -> Result<()> {
    let result = ctx.api.view_report(id)?;
    for record in &result.affected_records {
        print_full_record(record);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_move(ctx: &mut AppContext, from: usize, to: usize, filters: FilterArgs) -> Result<()> {
    let (Some(from), Some(to)) = (from.checked_sub(1), to.checked_sub(1)) else {
        return Err(ReportError::Validation("positions start at 1".into()));
    };
    apply_filters(ctx, filters);

    let result = ctx.api.move_in_view(from, to)?;
    print_messages(&result.messages);
    let listed = ctx.api.list()?;
    print_records(&listed.listed_records);
    Ok(())
}

struct SaveDetails {
    title: String,
    patient_name: String,
    patient_id: String,
    priority: Option<Priority>,
}

async fn handle_draft(
    ctx: &mut AppContext,
    prompt: &str,
    specialty: Option<Category>,
    save: Option<SaveDetails>,
) -> Result<()> {
    ctx.api.pipeline().generator().ensure_ready()?;

    let outcome = match specialty {
        Some(category) => ctx.api.specialized_draft(prompt, category).await,
        None => ctx.api.draft(prompt).await,
    };
    let text = expect_text(outcome, "prompt is empty")?;

    let Some(details) = save else {
        println!("{}", text);
        return Ok(());
    };

    let mut form = ctx.api.start_from_draft(&text);
    form.title = details.title;
    form.patient_name = details.patient_name;
    form.patient_id = details.patient_id;
    if let Some(category) = specialty {
        form.category = category;
    }
    if let Some(priority) = details.priority {
        form.priority = priority;
    }

    let result = ctx.api.save(&form)?;
    for record in &result.affected_records {
        print_full_record(record);
    }
    print_messages(&result.messages);
    Ok(())
}

async fn handle_summarize(ctx: &AppContext, id: &str) -> Result<()> {
    // Resolve the id before checking the key, so a typo reports NotFound.
    ctx.api.view_report(id)?;
    ctx.api.pipeline().generator().ensure_ready()?;

    let outcome = ctx.api.summarize(id).await?;
    let text = expect_text(outcome, "report has no content to summarize")?;
    println!("{}", text);
    Ok(())
}

fn expect_text(outcome: AssistOutcome, skipped: &str) -> Result<String> {
    match outcome {
        AssistOutcome::Completed(text) => Ok(text),
        AssistOutcome::Skipped => Err(ReportError::Validation(skipped.to_string())),
        AssistOutcome::Failed(message) => Err(ReportError::Api(message)),
        AssistOutcome::Superseded => Err(ReportError::Api("request was superseded".into())),
    }
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };

    let result = reportdash::commands::config::run(&ctx.config_dir, action.clone())?;
    if let (ConfigAction::ShowAll, Some(config)) = (action, &result.config) {
        print_config(config);
    }
    print_messages(&result.messages);
    Ok(())
}
