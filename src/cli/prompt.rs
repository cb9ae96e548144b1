use crate::cli::PromptArgs;
use crate::prompt;

pub fn execute(args: PromptArgs) -> anyhow::Result<()> {
    prompt::build_prompt(&args.template, &args.diff, &args.output)?;
    Ok(())
}
