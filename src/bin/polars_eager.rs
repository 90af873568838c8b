use framebench::config::harness_config;
use framebench::engine::EngineKind;
use framebench::observability::{init_tracing, LogFormat};
use framebench::report::run_report;
use miette::Result;
use tracing::Level;

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

fn main() -> Result<()> {
    init_tracing(Level::WARN, LogFormat::Text);

    let config = harness_config(EngineKind::Eager)?;
    run_report(&config, &mut std::io::stdout().lock())?;
    Ok(())
}
