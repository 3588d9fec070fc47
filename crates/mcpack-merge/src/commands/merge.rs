use camino::{Utf8Path, Utf8PathBuf};
use colored::Colorize;
use glob::Pattern;
use mcpack_merge::archive::zip_output_tree;
use mcpack_merge::{discover_packs, MergeOptions, MergeStats, Merger, PackInfo};
use miette::{IntoDiagnostic, Result};

use crate::errors::CliError;
use crate::println_pad;

pub struct MergePacksArgs {
    pub packs: Vec<String>,
    pub output: String,
    pub dry_run: bool,
    pub clean: bool,
    pub summary: bool,
    pub exclude: Vec<String>,
    pub pack_format: Option<i64>,
    pub description: Option<String>,
    pub zip: bool,
}

pub fn merge_packs(args: MergePacksArgs) -> Result<()> {
    let cwd = current_dir()?;

    let pack_paths: Vec<Utf8PathBuf> = if args.packs.is_empty() {
        discover_packs(&cwd, None).into_diagnostic()?
    } else {
        args.packs.iter().map(|raw| resolve(&cwd, raw)).collect()
    };

    let missing: Vec<Utf8PathBuf> = pack_paths
        .iter()
        .filter(|path| !path.exists())
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(CliError::PackPathsMissing { paths: missing }.into());
    }
    if pack_paths.is_empty() {
        return Err(CliError::NoPacksDetected.into());
    }

    let packs: Vec<PackInfo> = pack_paths.iter().map(|path| PackInfo::load(path)).collect();

    println_pad!(
        "{}",
        "📦 Merging packs with priority (lowest -> highest):"
            .bright_blue()
            .bold()
    );
    for (i, pack) in packs.iter().enumerate() {
        let format = pack
            .pack_format
            .map_or_else(|| "?".to_string(), |v| v.to_string());
        println_pad!(
            "  {}. {} {}",
            i + 1,
            pack.name.bright_cyan().bold(),
            format!("(pack_format={format})").dimmed()
        );
    }

    let exclude_patterns = args
        .exclude
        .iter()
        .map(|raw| {
            Pattern::new(raw).map_err(|source| CliError::InvalidExcludePattern {
                pattern: raw.clone(),
                source,
            })
        })
        .collect::<std::result::Result<Vec<Pattern>, CliError>>()?;

    let out_dir = resolve(&cwd, &args.output);
    let options = MergeOptions {
        dry_run: args.dry_run,
        clean: args.clean,
        exclude_patterns,
        pack_format_override: args.pack_format,
        description_override: args.description,
    };

    let mut merger = Merger::new(packs, out_dir.clone(), options);
    merger.run().into_diagnostic()?;
    let stats = merger.stats();

    if args.summary {
        print_summary(&stats);
    }

    if args.zip && !args.dry_run {
        let zip_path = Utf8PathBuf::from(format!("{out_dir}.zip"));
        if zip_path.exists() {
            std::fs::remove_file(&zip_path).map_err(CliError::from)?;
        }
        println_pad!(
            "{} {}",
            "🗜️ Creating zip:".bright_yellow(),
            zip_path.as_str().bright_white().bold()
        );
        zip_output_tree(&out_dir, &zip_path).into_diagnostic()?;
    }

    if stats.errors > 0 {
        println_pad!(
            "{}",
            format!("⚠️ Merge finished with {} errors", stats.errors)
                .bright_yellow()
                .bold()
        );
    } else {
        println_pad!("{}", "✅ Merge complete!".bright_green().bold());
    }

    Ok(())
}

fn print_summary(stats: &MergeStats) {
    println_pad!("{}", "Summary:".bright_magenta().bold());
    println_pad!("  Copied:      {}", stats.copied);
    println_pad!("  Overwritten: {}", stats.overwritten);
    println_pad!("  Merged JSON: {}", stats.merged_json);
    println_pad!("  Skipped:     {}", stats.skipped);
    println_pad!("  Errors:      {}", stats.errors);
}

fn resolve(cwd: &Utf8Path, raw: &str) -> Utf8PathBuf {
    let path = Utf8PathBuf::from(raw);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}

fn current_dir() -> Result<Utf8PathBuf> {
    let cwd = std::env::current_dir().map_err(CliError::from)?;
    Utf8PathBuf::from_path_buf(cwd)
        .map_err(|path| miette::miette!("Non-UTF-8 working directory: {}", path.display()))
}
