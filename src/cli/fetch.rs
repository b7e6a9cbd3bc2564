use release_index::config::Config;
use release_index::core::IndexResult;
use release_index::di::ServiceContainer;
use release_index::index::{write_index, IndexFormat};
use std::path::PathBuf;

/// Command-line overrides for a fetch run
#[derive(Debug, Default)]
pub struct FetchOptions {
    pub url: Option<String>,
    pub output: Option<PathBuf>,
    pub format: Option<IndexFormat>,
    pub page_size: Option<usize>,
    pub config: Option<PathBuf>,
}

impl FetchOptions {
    /// Layer the flags over the loaded config
    fn apply(self, config: &mut Config) {
        if let Some(url) = self.url {
            config.api_url = url;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(format) = self.format {
            config.format = format;
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
    }

    /// Resolve the effective config: defaults, file, env, then flags.
    /// Validated only after the flags are applied.
    fn resolve(self) -> IndexResult<Config> {
        let mut config = Config::load_unvalidated(self.config.as_deref())?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }
}

pub async fn run(options: FetchOptions) -> IndexResult<()> {
    let config = options.resolve()?;

    println!("Fetching releases from {}...", config.api_url);

    let container = ServiceContainer::new(config.clone())?;
    let (catalog, summary) = container
        .aggregator()?
        .fetch_all_with_summary(&config.api_url)
        .await?;

    write_index(&config.output, &catalog, config.format)?;

    println!(
        "✓ Wrote {} releases ({} pages) to {}",
        summary.records,
        summary.pages,
        config.output.display()
    );
    if summary.duplicates_dropped > 0 {
        println!(
            "  ({} release(s) repeated across page boundaries were skipped)",
            summary.duplicates_dropped
        );
    }

    Ok(())
}
