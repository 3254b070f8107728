use clap::Parser;

use checkref::Opts;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let opts = Opts::parse();
    let stdout = std::io::stdout();
    checkref::run(&opts, &mut stdout.lock())?;
    Ok(())
}
