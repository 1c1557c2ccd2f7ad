use spartan_diagnostics::Result;

#[tokio::main(flavor = "multi_thread")]
pub async fn main() -> Result<()> {
    spartan_cli::run_cli().await
}
