use chrono::Utc;
use crate::analysis::{generate_analysis, PromptLoader};
use crate::cli::commands::AnalyzeArgs;
use crate::cli::{apply_llm_overrides, load_config};
use crate::errors::{PlanixError, RetryConfig};
use crate::llm;
use crate::models::{Platform, Project, ProjectDraft, RiskLevel};
use crate::reporting::render_text;

const LOCAL_OWNER: &str = "local";

fn draft_from_args(args: &AnalyzeArgs) -> Result<ProjectDraft, PlanixError> {
    let draft = ProjectDraft {
        name: args.name.clone(),
        description: args.description.clone(),
        platform: Platform::parse(&args.platform)?,
        tech_stack: args.tech_stack.clone(),
        scale: args.scale.clone(),
        budget: args.budget,
        risk_level: RiskLevel::parse(&args.risk_level)?,
    };
    draft.validate()?;
    Ok(draft)
}

/// Headless run: build a transient project, generate, print. Nothing is stored.
pub async fn handle_analyze(args: AnalyzeArgs) -> Result<(), PlanixError> {
    let mut config = load_config(args.config.as_deref()).await?;
    apply_llm_overrides(&mut config, &args.llm);
    let llm_config = config.llm();

    let draft = draft_from_args(&args)?;
    let now = Utc::now();
    let project = Project::from_draft(&uuid::Uuid::new_v4().to_string(), LOCAL_OWNER, draft, now);

    let provider = llm::resolve_provider(&llm_config).await?;
    let prompts = PromptLoader::new(llm_config.prompts_dir.clone().map(Into::into));
    let retry = RetryConfig { max_retries: llm_config.max_retries(), ..RetryConfig::default() };

    let id = uuid::Uuid::new_v4().to_string();
    let generated = generate_analysis(provider.as_ref(), &prompts, &retry, &project, &id, now).await;

    if args.json {
        let out = serde_json::json!({
            "project": project,
            "analysis": generated.analysis,
            "score": generated.score,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{}", render_text(&generated.analysis, &project.name));
        println!();
        println!(
            "Rule score: {}  AI adjustment: {}  Final: {} ({})",
            generated.score.rule_score,
            generated.score.ai_adjustment,
            generated.score.security_score,
            generated.score.risk_category,
        );
    }
    Ok(())
}
