//! Walk through the common calls.
//!
//! Needs `LETO_TENANT_ID` and `LETO_SERVICE_TOKEN`. Point `LETO_BASE_URL` at
//! a local mock server (`cargo run -p mock-server`) to try it offline:
//!
//! ```sh
//! LETO_TENANT_ID=tenant-1 LETO_SERVICE_TOKEN=token-1 \
//! LETO_BASE_URL=http://127.0.0.1:3000 cargo run -p leto-core --example basic_usage
//! ```

use leto_core::{DomainListQuery, LetoClient, LetoError, TldListQuery};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    if let Err(err) = run().await {
        match err.api() {
            Some(api) => eprintln!("LETO API error {} (HTTP {}): {}", api.code, api.status, api.message),
            None => eprintln!("error: {err}"),
        }
        std::process::exit(1);
    }
}

async fn run() -> Result<(), LetoError> {
    let client = LetoClient::from_env()?;

    let account = client.account.get_status().await?;
    println!(
        "account {} is {:?}, balance {} {}",
        account.tenant_id, account.status, account.balance.amount, account.balance.currency
    );

    let tlds = client
        .tlds
        .list(Some(&TldListQuery {
            page: Some(1),
            size: Some(10),
        }))
        .await?;
    for tld in &tlds.data {
        println!(
            ".{:<6} registration {} {}, {}-{} nameservers",
            tld.tld,
            tld.prices.registration,
            tld.currency,
            tld.rules.nameservers.min,
            tld.rules.nameservers.max
        );
    }

    let check = client.domains.check("example.kr").await?;
    match check.price {
        Some(price) if check.available => println!("{} is available for {price}", check.domain),
        _ => println!("{} available: {}", check.domain, check.available),
    }

    let domains = client
        .domains
        .list(Some(&DomainListQuery {
            page: Some(1),
            size: Some(10),
            ..Default::default()
        }))
        .await?;
    if let Some(pagination) = domains.pagination {
        println!(
            "{} domains, page {} of {}",
            pagination.total, pagination.page, pagination.total_pages
        );
    }
    for domain in &domains.data {
        let nameservers = client.domains.get_nameservers(&domain.domain_name).await?;
        let locks = client.domains.get_locks(&domain.domain_name).await?;
        println!(
            "{} ({:?}) expires {}, ns {:?}, transfer lock {}",
            domain.domain_name, domain.status, domain.expires_at.date, nameservers, locks.transfer_lock
        );
    }

    Ok(())
}
