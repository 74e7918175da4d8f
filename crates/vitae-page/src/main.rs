//! vitae - Main Entry Point
//!
//! Renders one locale's resume data to a static HTML page through the
//! worker pool.

use std::path::PathBuf;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use vitae_page::sections::build_resume;
use vitae_page::{
    default_registry, render_batch, EchoTranslator, LocaleStore, PageError, RenderProgram,
};
use vitae_pool::WorkerPool;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Err(error) = run() {
        tracing::error!(%error, "page render failed");
        std::process::exit(1);
    }
}

fn run() -> Result<(), PageError> {
    let mut args = std::env::args().skip(1);
    let locales_dir = args.next().unwrap_or_else(|| "locales".to_string());
    let locale = args.next().unwrap_or_else(|| "en".to_string());
    let output = PathBuf::from(args.next().unwrap_or_else(|| "index.html".to_string()));

    tracing::info!(%locale, %locales_dir, output = %output.display(), "rendering resume");

    let mut store = LocaleStore::new(&locales_dir);
    let data = store.load(&locale)?;

    let registry = default_registry();
    let blocks = build_resume(&data, &EchoTranslator, &registry);

    let size = std::thread::available_parallelism()
        .map(|parallelism| parallelism.get())
        .unwrap_or(4);
    let mut pool = WorkerPool::new(size, Arc::new(RenderProgram))?;
    let rendered = render_batch(&blocks, &pool);
    pool.terminate();

    let body = match rendered {
        Ok(parts) => format!("<main>\n{}\n</main>", parts.join("\n")),
        Err(PageError::BatchFailed) => {
            tracing::error!("every block failed, rendering a single error block");
            r#"<main><div class="render-error" style="color: red">[Error rendering page]</div></main>"#
                .to_string()
        }
        Err(error) => return Err(error),
    };

    let page = page_shell(&locale, &body);
    std::fs::write(&output, page).map_err(|source| PageError::Output {
        path: output.clone(),
        source,
    })?;

    tracing::info!(output = %output.display(), "page written");
    Ok(())
}

fn page_shell(lang: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"{lang}\">\n<head>\n<meta charset=\"utf-8\" />\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n\
         <title>Resume</title>\n</head>\n<body>\n{body}\n</body>\n</html>\n"
    )
}
