use crate::error::PromptError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Render the policy prompt: expand the template's concatenation markers,
/// append the diff wrapped in a ```diff fence, and write the result.
pub fn build_prompt(template: &Path, diff: &Path, output: &Path) -> Result<(), PromptError> {
    let rendered = render_template(template)?;
    let diff_contents = read_file(diff)?;

    let prompt = format!(
        "{}\n\nGit diff to review:\n```diff\n{}\n```\n",
        rendered.trim_end(),
        diff_contents.trim_end()
    );

    if let Some(dir) = output.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(output, prompt)?;
    info!("Wrote rendered policy prompt to {}.", output.display());

    Ok(())
}

/// Expand every `{{ concatenate all *.md in <dir> }}` marker in the
/// template. Directories are resolved relative to the template file.
/// Markers that are not concatenation instructions pass through
/// verbatim; an unclosed marker is left as-is.
fn render_template(template_path: &Path) -> Result<String, PromptError> {
    let template = read_file(template_path)?;
    let template_dir = template_path.parent().unwrap_or(Path::new("."));

    let mut out = String::with_capacity(template.len());
    let mut rest = template.as_str();

    while let Some(open) = rest.find("{{") {
        let Some(close) = rest[open..].find("}}") else {
            break;
        };

        let inner = rest[open + 2..open + close].trim();
        let Some(instruction) = inner.strip_prefix("concatenate all ") else {
            out.push_str(&rest[..open + 2]);
            rest = &rest[open + 2..];
            continue;
        };

        out.push_str(&rest[..open]);
        out.push_str(&concatenate_sections(instruction.trim(), template_dir)?);
        rest = &rest[open + close + 2..];
    }
    out.push_str(rest);

    Ok(out)
}

/// Concatenate the sorted `*.md` files of the directory named by an
/// instruction of the form `*.md in <dir>`, separated by blank lines.
fn concatenate_sections(instruction: &str, template_dir: &Path) -> Result<String, PromptError> {
    let Some(dir) = instruction.strip_prefix("*.md in ") else {
        return Err(PromptError::UnsupportedInstruction(instruction.to_string()));
    };

    let target_dir = template_dir.join(dir.trim());
    let entries = fs::read_dir(&target_dir).map_err(|source| PromptError::ReadDir {
        path: target_dir.clone(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    files.sort();

    let mut contents = Vec::with_capacity(files.len());
    for file in &files {
        contents.push(read_file(file)?.trim().to_string());
    }

    Ok(contents.join("\n\n"))
}

fn read_file(path: &Path) -> Result<String, PromptError> {
    fs::read_to_string(path).map_err(|source| PromptError::ReadFile {
        path: path.to_path_buf(),
        source,
    })
}
