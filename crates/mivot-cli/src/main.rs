use mivot_cli::MivotCli;

fn main() -> anyhow::Result<()> {
    MivotCli::new().parse_and_run()
}
