use rangepick::Cli;

fn main() -> anyhow::Result<()> {
    Cli::run()
}
