//! Account, contact, transfer, TLD and transaction handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::body;
use crate::model::{
    ContactIds, InitiateTransfer, PageQuery, Timestamp, TransactionQuery, Transfer, VerifyAuthCode,
};
use crate::reply::{created, ok, paged, Failure, Reply};
use crate::store::{new_id, Db, CURRENCY, REGISTRAR, REJECTED_AUTH_CODE};

const LOSING_REGISTRAR: &str = "Other Registrar";

pub async fn account_status(State(db): State<Db>) -> Reply {
    let store = db.read().await;
    ok(json!({
        "tenantId": store.tenant_id,
        "status": "ACTIVE",
        "createdAt": "2024-01-01T00:00:00Z",
        "expiresAt": null,
        "balance": {"amount": format!("{:.2}", store.balance), "currency": CURRENCY},
    }))
}

pub async fn create_contact(
    State(db): State<Db>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Reply {
    let mut contact = body(payload)?;
    let Some(fields) = contact.as_object_mut() else {
        return Err(Failure::bad_request("INVALID_CONTACT", "Contact must be an object"));
    };
    for required in ["name", "email", "phone", "mobile", "address", "country"] {
        if !fields.contains_key(required) {
            return Err(Failure::bad_request(
                "INVALID_CONTACT",
                format!("Missing field: {required}"),
            ));
        }
    }

    let mut store = db.write().await;
    let now = serde_json::to_value(Timestamp::now()).unwrap_or(Value::Null);
    fields.insert("uuid".to_string(), json!(new_id()));
    fields.insert("tenantId".to_string(), json!(store.tenant_id));
    fields.insert("createdAt".to_string(), now.clone());
    fields.insert("updatedAt".to_string(), now);
    store.contacts.push(contact.clone());
    created(contact)
}

pub async fn list_contacts(State(db): State<Db>, Query(query): Query<PageQuery>) -> Reply {
    let store = db.read().await;
    paged(store.contacts.clone(), query.page, query.size)
}

pub async fn verify_auth_code(
    State(db): State<Db>,
    payload: Result<Json<VerifyAuthCode>, JsonRejection>,
) -> Reply {
    let input = body(payload)?;
    let store = db.read().await;
    let valid = store.foreign.contains(&input.domain)
        && !input.auth_code.is_empty()
        && input.auth_code != REJECTED_AUTH_CODE;
    let mut result = json!({"valid": valid, "domain": input.domain});
    if valid {
        result["registrar"] = json!(LOSING_REGISTRAR);
        result["expiresAt"] = json!(Timestamp::years_from_now(1));
    }
    ok(result)
}

pub async fn initiate_transfer(
    State(db): State<Db>,
    payload: Result<Json<InitiateTransfer>, JsonRejection>,
) -> Reply {
    let input = body(payload)?;
    let mut store = db.write().await;

    if store.domains.contains_key(&input.domain) {
        return Err(Failure::new(
            StatusCode::CONFLICT,
            "DOMAIN_ALREADY_OWNED",
            format!("Domain is already registered here: {}", input.domain),
        ));
    }
    if !store.foreign.contains(&input.domain) {
        return Err(Failure::not_found(
            "DOMAIN_NOT_FOUND",
            format!("Domain is not registered: {}", input.domain),
        ));
    }
    if input.auth_code.is_empty() || input.auth_code == REJECTED_AUTH_CODE {
        return Err(Failure::bad_request("INVALID_AUTH_CODE", "Auth code mismatch"));
    }
    let tld = store
        .tld_for(&input.domain)
        .ok_or_else(|| {
            Failure::bad_request("TLD_NOT_SUPPORTED", format!("TLD not supported: {}", input.domain))
        })?
        .clone();
    let period = input.period.unwrap_or(tld.rules.transfer.min);
    if !tld.rules.transfer.contains(period) {
        return Err(Failure::bad_request("INVALID_PERIOD", "Transfer period out of range"));
    }

    let price = tld.prices.transfer * f64::from(period);
    let balance = store.balance;
    let transaction_id = store.charge("transfer", &input.domain, price).ok_or_else(|| {
        Failure::new(StatusCode::PAYMENT_REQUIRED, "INSUFFICIENT_BALANCE", "Not enough balance")
            .with_data(json!({"required": format!("{price:.2}"), "balance": format!("{balance:.2}")}))
    })?;

    let transfer = Transfer {
        transfer_id: new_id(),
        transaction_id,
        status: "pending".to_string(),
        direction: "in".to_string(),
        domain_name: input.domain,
        from_registrar: LOSING_REGISTRAR.to_string(),
        to_registrar: REGISTRAR.to_string(),
        nameservers: input.nameservers.unwrap_or_default(),
        created_date: Timestamp::now(),
        updated_date: Timestamp::now(),
        expired_date: Timestamp::years_from_now(period),
        period,
        contact: input.contact,
    };
    tracing::info!(domain = %transfer.domain_name, id = %transfer.transfer_id, "transfer initiated");
    store.transfers.push(transfer.clone());
    created(transfer)
}

/// Each read moves a transfer one step: pending, in_progress, completed.
/// On completion the domain joins the tenant's portfolio.
pub async fn get_transfer(State(db): State<Db>, Path(transfer_id): Path<String>) -> Reply {
    let mut store = db.write().await;
    let index = store
        .transfers
        .iter()
        .position(|t| t.transfer_id == transfer_id)
        .ok_or_else(|| {
            Failure::not_found("TRANSFER_NOT_FOUND", format!("Transfer not found: {transfer_id}"))
        })?;

    let snapshot = store.transfers[index].clone();
    let next = match snapshot.status.as_str() {
        "pending" => "in_progress",
        "in_progress" => "completed",
        other => other,
    };
    if next == "completed" && snapshot.status != "completed" {
        let contact = snapshot.contact.clone().unwrap_or(ContactIds {
            registrant: String::new(),
            administrative: String::new(),
            technical: None,
            billing: None,
        });
        let domain = store.new_domain(
            &snapshot.domain_name,
            snapshot.period,
            snapshot.nameservers.clone(),
            contact,
        );
        store.foreign.remove(&snapshot.domain_name);
        store.domains.insert(snapshot.domain_name.clone(), domain);
        tracing::info!(domain = %snapshot.domain_name, "transfer completed");
    }

    let transfer = &mut store.transfers[index];
    transfer.status = next.to_string();
    transfer.updated_date = Timestamp::now();
    ok(&*transfer)
}

pub async fn list_transfers(State(db): State<Db>, Query(query): Query<PageQuery>) -> Reply {
    let store = db.read().await;
    paged(store.transfers.clone(), query.page, query.size)
}

pub async fn list_tlds(State(db): State<Db>, Query(query): Query<PageQuery>) -> Reply {
    let store = db.read().await;
    if query.page.is_none() && query.size.is_none() {
        return ok(&store.tlds);
    }
    paged(store.tlds.clone(), query.page, query.size)
}

pub async fn get_tld(State(db): State<Db>, Path(tld): Path<String>) -> Reply {
    let store = db.read().await;
    let found = store
        .tlds
        .iter()
        .find(|t| t.tld == tld)
        .ok_or_else(|| Failure::not_found("TLD_NOT_FOUND", format!("TLD not supported: {tld}")))?;
    ok(found)
}

pub async fn list_transactions(
    State(db): State<Db>,
    Query(query): Query<TransactionQuery>,
) -> Reply {
    let store = db.read().await;
    let is_match = |value: &str, filter: &Option<String>| filter.as_deref().map_or(true, |f| f == value);
    let transactions: Vec<_> = store
        .transactions
        .iter()
        .filter(|t| is_match(&t.kind, &query.kind) && is_match(&t.status, &query.status))
        .filter(|t| query.start_date.as_deref().map_or(true, |d| t.created_at.date.as_str() >= d))
        .filter(|t| query.end_date.as_deref().map_or(true, |d| t.created_at.date.as_str() <= d))
        .cloned()
        .collect();
    paged(transactions, query.page, query.size)
}
