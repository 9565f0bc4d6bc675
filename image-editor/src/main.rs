use clap::Parser;
use image_editor::cli;

fn main() -> anyhow::Result<()> {
    image_editor::init_logger();

    let args = cli::Args::parse();
    cli::run(args)
}
