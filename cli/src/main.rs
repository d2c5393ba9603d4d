fn main() -> anyhow::Result<()> {
    genip_cli::main()
}
