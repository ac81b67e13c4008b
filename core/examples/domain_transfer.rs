//! Transfer a domain in: verify the auth code, create a contact, start the
//! transfer and poll it.
//!
//! ```sh
//! LETO_TENANT_ID=tenant-1 LETO_SERVICE_TOKEN=token-1 \
//! LETO_BASE_URL=http://127.0.0.1:3000 \
//! cargo run -p leto-core --example domain_transfer -- transfer-me.com ABC-123
//! ```

use std::time::Duration;

use leto_core::{
    ContactAddress, ContactAddressDetail, ContactCreateRequest, ContactName, DomainContactIds,
    LetoClient, LetoError, TransferAuthCodeVerifyRequest, TransferInitiateRequest, TransferStatus,
};
use tracing_subscriber::EnvFilter;

const POLL_INTERVAL: Duration = Duration::from_secs(2);
const MAX_POLLS: u32 = 10;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    let domain = args.next().unwrap_or_else(|| "example.com".to_string());
    let auth_code = args.next().unwrap_or_else(|| "your-auth-code-here".to_string());

    if let Err(err) = run(&domain, &auth_code).await {
        match err.api() {
            Some(api) => eprintln!("LETO API error {} (HTTP {}): {}", api.code, api.status, api.message),
            None => eprintln!("error: {err}"),
        }
        std::process::exit(1);
    }
}

fn contact() -> ContactCreateRequest {
    ContactCreateRequest {
        name: ContactName {
            national: "홍길동".to_string(),
            international: "Hong Gil Dong".to_string(),
        },
        email: "hong@example.com".to_string(),
        phone: "+82-2-1234-5678".to_string(),
        mobile: "+82-10-1234-5678".to_string(),
        fax: None,
        address: ContactAddress {
            postal_code: "06234".to_string(),
            national: ContactAddressDetail {
                state: "서울특별시".to_string(),
                city: "강남구".to_string(),
                street: "테헤란로 128".to_string(),
                detail: None,
            },
            international: ContactAddressDetail {
                state: "Seoul".to_string(),
                city: "Gangnam-gu".to_string(),
                street: "128 Teheran-ro".to_string(),
                detail: None,
            },
        },
        country: "KR".to_string(),
        additional_contact_data: None,
        description: None,
    }
}

async fn run(domain: &str, auth_code: &str) -> Result<(), LetoError> {
    let client = LetoClient::from_env()?;

    let verified = client
        .transfers
        .verify_auth_code(&TransferAuthCodeVerifyRequest {
            domain: domain.to_string(),
            auth_code: auth_code.to_string(),
        })
        .await?;
    if !verified.valid {
        println!("auth code for {domain} is invalid");
        return Ok(());
    }
    println!(
        "auth code ok, current registrar {}",
        verified.registrar.as_deref().unwrap_or("unknown")
    );

    let contact = client.contacts.create(&contact()).await?;
    let contact_id = contact.uuid.unwrap_or_default();
    println!("contact created: {contact_id}");

    let transfer = client
        .transfers
        .initiate(&TransferInitiateRequest {
            domain: domain.to_string(),
            auth_code: auth_code.to_string(),
            period: Some(1),
            nameservers: Some(vec!["ns1.example.com".to_string(), "ns2.example.com".to_string()]),
            contact: Some(DomainContactIds {
                registrant: contact_id.clone(),
                administrative: contact_id,
                technical: None,
                billing: None,
            }),
        })
        .await?;
    println!("transfer {} started ({:?})", transfer.transfer_id, transfer.status);

    for _ in 0..MAX_POLLS {
        let current = client.transfers.get(&transfer.transfer_id).await?;
        println!("status: {:?} (updated {})", current.status, current.updated_date.date);
        if current.status.is_terminal() {
            if current.status == TransferStatus::Completed {
                println!("transfer completed");
            } else {
                println!("transfer ended as {:?}", current.status);
            }
            return Ok(());
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
    println!("still in progress; check later with id {}", transfer.transfer_id);
    Ok(())
}
