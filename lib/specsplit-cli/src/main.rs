#![allow(missing_docs)]
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use specsplit_core::{
    CollisionPolicy, DEFAULT_STRIP_PREFIX, ReferencePolicy, SplitConfig, TagTranslator, split_file,
};

const DEFAULT_INPUT: &str = "./api/ksef-openapi.yaml";
const DEFAULT_OUTPUT: &str = "openapi";
const DEFAULT_LOG_FILTER: &str = "specsplit_core=info";

const HELP: &str = "\
Split an OpenAPI document into one file per schema and per path item

USAGE:
  specsplit [OPTIONS]

OPTIONS:
  -i, --input <FILE>        Input document [default: ./api/ksef-openapi.yaml]
  -o, --output <DIR>        Output directory [default: openapi]
      --strip-prefix <N>    Leading path segments ignored for file names [default: 2]
      --tags <FILE>         YAML mapping of extra tag translations
      --no-tags             Keep tags untranslated
      --lenient-refs        Keep references to missing schemas instead of failing
      --allow-overwrite     Let colliding file names overwrite each other
  -h, --help                Print this help
";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(
            std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
        ))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let Some(args) = AppArgs::parse(pico_args::Arguments::from_env())? else {
        print_help();
        return Ok(());
    };

    let config = args.config()?;
    let root = split_file(&args.input, &args.output, config)
        .with_context(|| format!("splitting '{}'", args.input.display()))?;

    print_done(&root);
    Ok(())
}

/// Uses `directives` (the `RUST_LOG` value) when set and valid, else the default filter.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

#[allow(clippy::print_stdout)]
fn print_help() {
    print!("{HELP}");
}

#[allow(clippy::print_stdout)]
fn print_done(root: &Path) {
    println!("Split OpenAPI written to: {}", root.display());
}

#[derive(Debug, PartialEq, Eq)]
struct AppArgs {
    input: PathBuf,
    output: PathBuf,
    strip_prefix: usize,
    tags: Option<PathBuf>,
    no_tags: bool,
    lenient_refs: bool,
    allow_overwrite: bool,
}

impl AppArgs {
    /// Returns `None` when help was requested.
    fn parse(mut pargs: pico_args::Arguments) -> Result<Option<Self>> {
        if pargs.contains(["-h", "--help"]) {
            return Ok(None);
        }

        let input = pargs
            .opt_value_from_os_str(["-i", "--input"], parse_path)
            .context("parsing input argument")?;

        let output = pargs
            .opt_value_from_os_str(["-o", "--output"], parse_path)
            .context("parsing output argument")?;

        let strip_prefix = pargs
            .opt_value_from_str("--strip-prefix")
            .context("parsing strip-prefix argument")?;

        let tags = pargs
            .opt_value_from_os_str("--tags", parse_path)
            .context("parsing tags argument")?;

        let result = Self {
            input: input.unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            output: output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            strip_prefix: strip_prefix.unwrap_or(DEFAULT_STRIP_PREFIX),
            tags,
            no_tags: pargs.contains("--no-tags"),
            lenient_refs: pargs.contains("--lenient-refs"),
            allow_overwrite: pargs.contains("--allow-overwrite"),
        };

        let remaining = pargs.finish();
        if !remaining.is_empty() {
            warn!(?remaining, "Warning: unused arguments left");
        }
        Ok(Some(result))
    }

    fn config(&self) -> Result<SplitConfig> {
        let mut tags = if self.no_tags {
            TagTranslator::empty()
        } else {
            TagTranslator::default()
        };
        if let Some(path) = &self.tags {
            tags = tags.load_overrides(path)?;
        }

        let references = if self.lenient_refs {
            ReferencePolicy::Lenient
        } else {
            ReferencePolicy::Strict
        };
        let collisions = if self.allow_overwrite {
            CollisionPolicy::Overwrite
        } else {
            CollisionPolicy::Fail
        };

        Ok(SplitConfig::default()
            .with_strip_prefix(self.strip_prefix)
            .with_tags(tags)
            .with_references(references)
            .with_collisions(collisions))
    }
}

fn parse_path(value: &OsStr) -> Result<PathBuf, String> {
    Ok(PathBuf::from(value))
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::*;

    fn args(values: &[&str]) -> pico_args::Arguments {
        pico_args::Arguments::from_vec(values.iter().map(OsString::from).collect())
    }

    #[test]
    fn should_use_defaults() -> Result<()> {
        let parsed = AppArgs::parse(args(&[]))?.context("should not be help")?;

        assert_eq!(
            parsed,
            AppArgs {
                input: PathBuf::from(DEFAULT_INPUT),
                output: PathBuf::from(DEFAULT_OUTPUT),
                strip_prefix: 2,
                tags: None,
                no_tags: false,
                lenient_refs: false,
                allow_overwrite: false,
            }
        );
        Ok(())
    }

    #[test]
    fn should_parse_all_options() -> Result<()> {
        let parsed = AppArgs::parse(args(&[
            "-i",
            "spec.yaml",
            "--output",
            "out",
            "--strip-prefix",
            "1",
            "--tags",
            "tags.yaml",
            "--no-tags",
            "--lenient-refs",
            "--allow-overwrite",
        ]))?
        .context("should not be help")?;

        assert_eq!(parsed.input, PathBuf::from("spec.yaml"));
        assert_eq!(parsed.output, PathBuf::from("out"));
        assert_eq!(parsed.strip_prefix, 1);
        assert_eq!(parsed.tags, Some(PathBuf::from("tags.yaml")));
        assert!(parsed.no_tags && parsed.lenient_refs && parsed.allow_overwrite);
        Ok(())
    }

    #[test]
    fn should_detect_help() -> Result<()> {
        assert!(AppArgs::parse(args(&["--help"]))?.is_none());
        assert!(AppArgs::parse(args(&["-h"]))?.is_none());
        Ok(())
    }

    #[test]
    fn should_reject_invalid_prefix() {
        assert!(AppArgs::parse(args(&["--strip-prefix", "two"])).is_err());
    }

    #[test]
    fn should_build_config_from_flags() -> Result<()> {
        let parsed = AppArgs::parse(args(&["--no-tags", "--lenient-refs", "--allow-overwrite"]))?
            .context("should not be help")?;

        let config = parsed.config()?;

        assert!(config.tags.is_empty());
        assert_eq!(config.references, ReferencePolicy::Lenient);
        assert_eq!(config.collisions, CollisionPolicy::Overwrite);
        assert_eq!(config.strip_prefix, DEFAULT_STRIP_PREFIX);
        Ok(())
    }

    #[test]
    fn should_keep_rust_log_directives() {
        let filter = log_filter(Some("specsplit_core=debug")).to_string();

        assert!(filter.contains("specsplit_core=debug"), "got {filter}");
        assert!(!filter.contains("specsplit_core=info"), "got {filter}");
    }

    #[test]
    fn should_default_log_filter_without_rust_log() {
        for directives in [None, Some(""), Some("   ")] {
            let filter = log_filter(directives).to_string();

            assert_eq!(filter, DEFAULT_LOG_FILTER);
        }
    }
}
