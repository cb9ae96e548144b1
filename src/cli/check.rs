use crate::cli::CheckArgs;
use crate::github::{CommentTarget, GithubAnnotator};
use crate::parser;
use crate::report::{self, Annotate};
use anyhow::Context;
use tracing::{error, info};

pub async fn execute(args: CheckArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.result)
        .with_context(|| format!("Failed to read result file {:?}", args.result))?;

    let parsed = match parser::parse_result(&raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            error!("Failed to parse policy result: {e}");
            std::process::exit(1);
        }
    };

    let annotator = if args.dry_run {
        info!("DRY RUN - comments will be logged, not posted");
        None
    } else {
        CommentTarget::from_env().map(GithubAnnotator::new)
    };
    let annotator: Option<&dyn Annotate> = annotator.as_ref().map(|a| a as &dyn Annotate);

    let outcome = report::report(&parsed, annotator).await?;

    if outcome.is_failure() {
        std::process::exit(1);
    }

    Ok(())
}
