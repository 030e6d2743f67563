use anyhow::Result;
use lockgraph::cli::LockgraphCli;

fn main() {
    if let Err(e) = real_main() {
        eprintln!("lockgraph error: {:#}", e);
        std::process::exit(1);
    }
}

fn real_main() -> Result<()> {
    let cli = LockgraphCli::parse();
    cli.run()
}
