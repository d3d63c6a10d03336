use std::error::Error;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use clap::{Args, ValueEnum};
use podnits_core::{CheckContext, CheckOptions, Config, NitsError, Report};
use podnits_exports::report_undocumented;
use podnits_lint::Linter;
use podnits_page::{enumerate_pages, Page};
use tracing::{debug, info};

/// Rendering of the finished report on stdout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One finding per line.
    #[default]
    Text,
    /// The whole report as canonical JSON.
    Json,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Print per-page structural and consistency nits.
    #[arg(short = 'n', long)]
    pub nits: bool,
    /// Also require mandatory sections and run the external checker (implies -n).
    #[arg(short = 's', long)]
    pub strict: bool,
    /// List exported symbols that no page documents.
    #[arg(short = 'u', long)]
    pub undocumented: bool,
    /// Project root; overrides the configured one.
    #[arg(long)]
    pub root: Option<PathBuf>,
    /// YAML file describing the project layout.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    /// Pages to check instead of the configured page glob.
    #[arg(value_name = "PAGE")]
    pub pages: Vec<PathBuf>,
}

impl CheckArgs {
    pub fn options(&self) -> CheckOptions {
        CheckOptions::new(self.nits, self.strict, self.undocumented)
    }

    fn load_config(&self) -> Result<Config, NitsError> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(root) = &self.root {
            config.root = root.clone();
        }
        Ok(config)
    }
}

pub fn run(args: &CheckArgs) -> Result<(), Box<dyn Error>> {
    let config = args.load_config()?;
    let options = args.options();
    let mut report = Report::new();
    let outcome = check(&config, &options, &args.pages, &mut report);
    // Findings gathered before a fatal error are still printed.
    emit(&report, args.format)?;
    outcome?;
    Ok(())
}

/// Runs the enabled checks, appending findings to `report`.
///
/// Coverage runs before the per-page nits.
pub fn check(
    config: &Config,
    options: &CheckOptions,
    pages: &[PathBuf],
    report: &mut Report,
) -> Result<(), NitsError> {
    let mut context = CheckContext::new();
    if options.report_undocumented {
        report_undocumented(config, &mut context, report)?;
    }
    if options.report_style_nits {
        let linter = Linter::from_config(config, options)?;
        let pages = if pages.is_empty() {
            enumerate_pages(&config.root, &config.page_glob)?
        } else {
            pages.to_vec()
        };
        info!(pages = pages.len(), strict = linter.is_strict(), "checking pages");
        for path in &pages {
            lint_one(&linter, path, &mut context, report)?;
        }
    }
    Ok(())
}

fn lint_one(
    linter: &Linter,
    path: &Path,
    context: &mut CheckContext,
    report: &mut Report,
) -> Result<(), NitsError> {
    let page = Page::load(path)?;
    let found = linter.lint(&page, context);
    debug!(page = %path.display(), findings = found.len(), "page checked");
    report.extend(found);
    Ok(())
}

fn emit(report: &Report, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => {
            for line in report.render_lines() {
                writeln!(out, "{line}")?;
            }
        }
        OutputFormat::Json => {
            let json = report.to_json_bytes().map_err(|err| Box::new(err) as Box<dyn Error>)?;
            out.write_all(&json)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
