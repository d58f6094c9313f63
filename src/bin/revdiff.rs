//! revdiff -- diff revisions of a file.
//!
//! Usage: revdiff [--from N] [--to N] [--json] [--annotate] [--config <path>] <rev0> <rev1>...
//!
//! Every positional file is one revision, in order. Prints the diff between
//! `--from` (default 0) and `--to` (default: latest revision).

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use revdiff::{DiffOptions, VersionedFile};
use tracing::info;

#[derive(Default)]
struct Args {
    from: Option<i64>,
    to: Option<i64>,
    json: bool,
    annotate: bool,
    config: Option<PathBuf>,
    files: Vec<PathBuf>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--from" => args.from = Some(revision_arg(&arg, iter.next())?),
            "--to" => args.to = Some(revision_arg(&arg, iter.next())?),
            "--json" => args.json = true,
            "--annotate" => args.annotate = true,
            "--config" => {
                let path = iter.next().context("--config needs a path")?;
                args.config = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => bail!("unknown flag {flag}"),
            _ => args.files.push(PathBuf::from(&arg)),
        }
    }
    if args.files.is_empty() {
        bail!("usage: revdiff [--from N] [--to N] [--json] [--annotate] [--config <path>] <rev0> <rev1>...");
    }
    Ok(args)
}

fn revision_arg(flag: &str, value: Option<String>) -> Result<i64> {
    let value = value.with_context(|| format!("{flag} needs a revision number"))?;
    value
        .parse()
        .with_context(|| format!("{flag}: not a revision number: {value}"))
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_options(path: Option<&Path>) -> Result<DiffOptions> {
    match path {
        Some(path) => DiffOptions::from_toml_str(&read(path)?)
            .with_context(|| format!("bad config in {}", path.display())),
        None => Ok(DiffOptions::default()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    let options = load_options(args.config.as_deref())?;

    let (first, rest) = args
        .files
        .split_first()
        .context("at least one revision is required")?;
    let name = first
        .file_name()
        .map_or_else(|| first.display().to_string(), |n| n.to_string_lossy().into_owned());

    let mut file = VersionedFile::from_text(name, &read(first)?)?;
    for path in rest {
        file.add_revision_text(&read(path)?)
            .with_context(|| format!("failed to add revision {}", path.display()))?;
    }
    info!(file = file.name(), revisions = file.revisions_count(), "loaded revisions");

    let latest = i64::try_from(file.revisions_count() - 1)?;
    let to = args.to.unwrap_or(latest);

    if args.annotate {
        print!("{}", file.revision(to)?);
        return Ok(());
    }

    let diff = file.diff_with(args.from.unwrap_or(0), to, &options)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&diff)?);
    } else {
        print!("{diff}");
    }
    Ok(())
}
