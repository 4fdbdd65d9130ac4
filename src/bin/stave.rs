fn main() -> anyhow::Result<()> {
    stave_core::cli::run_cli()
}
