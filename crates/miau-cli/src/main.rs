fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();
    miau_cli::run()
}
