//! Cards service entry point.

use bank_provisioning::{config::ServiceKind, server};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    server::run(ServiceKind::Cards).await
}
