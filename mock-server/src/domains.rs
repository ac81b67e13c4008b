//! `/api/v1/domains/...` handlers.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::model::{
    CheckQuery, ContactIds, Domain, DomainQuery, DsData, Nameservers, Period, RegisterDomain,
    Renewal, Timestamp,
};
use crate::reply::{created, ok, paged, Failure, Reply};
use crate::store::{new_auth_code, new_id, Db, Store, CURRENCY, REGISTRAR};
use crate::body;

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferLock {
    transfer_lock: bool,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferAutoReject {
    transfer_auto_reject: bool,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLock {
    update_lock: bool,
}

fn lookup<'a>(store: &'a Store, domain: &str) -> Result<&'a Domain, Failure> {
    store
        .domains
        .get(domain)
        .ok_or_else(|| Failure::not_found("DOMAIN_NOT_FOUND", format!("Domain not found: {domain}")))
}

fn lookup_mut<'a>(store: &'a mut Store, domain: &str) -> Result<&'a mut Domain, Failure> {
    store
        .domains
        .get_mut(domain)
        .ok_or_else(|| Failure::not_found("DOMAIN_NOT_FOUND", format!("Domain not found: {domain}")))
}

/// Like [`lookup_mut`] but refuses domains under update lock.
fn lookup_unlocked<'a>(store: &'a mut Store, domain: &str) -> Result<&'a mut Domain, Failure> {
    let record = lookup_mut(store, domain)?;
    if record.update_lock {
        return Err(Failure::new(
            StatusCode::LOCKED,
            "DOMAIN_UPDATE_LOCKED",
            format!("Domain is update-locked: {domain}"),
        ));
    }
    Ok(record)
}

fn unsupported_tld(domain: &str) -> Failure {
    Failure::bad_request("TLD_NOT_SUPPORTED", format!("TLD not supported: {domain}"))
}

fn check_contacts(store: &Store, contact: &ContactIds) -> Result<(), Failure> {
    match contact.all().find(|id| !store.contact_exists(id)) {
        Some(missing) => Err(Failure::bad_request(
            "CONTACT_NOT_FOUND",
            format!("Contact not found: {missing}"),
        )),
        None => Ok(()),
    }
}

fn check_nameservers(store: &Store, domain: &str, nameservers: &[String]) -> Result<(), Failure> {
    let tld = store.tld_for(domain).ok_or_else(|| unsupported_tld(domain))?;
    let range = tld.rules.nameservers;
    if !range.contains(nameservers.len() as u32) {
        return Err(Failure::bad_request(
            "INVALID_NAMESERVERS",
            format!("Between {} and {} nameservers are required", range.min, range.max),
        ));
    }
    Ok(())
}

fn insufficient_balance(required: f64, balance: f64) -> Failure {
    Failure::new(
        StatusCode::PAYMENT_REQUIRED,
        "INSUFFICIENT_BALANCE",
        "Not enough balance",
    )
    .with_data(json!({"required": format!("{required:.2}"), "balance": format!("{balance:.2}")}))
}

pub async fn check(State(db): State<Db>, Query(query): Query<CheckQuery>) -> Reply {
    let store = db.read().await;
    let tld = store
        .tld_for(&query.domain)
        .ok_or_else(|| unsupported_tld(&query.domain))?;
    let available =
        !store.domains.contains_key(&query.domain) && !store.foreign.contains(&query.domain);
    ok(json!({
        "domain": query.domain,
        "available": available,
        "price": tld.prices.registration,
        "currency": tld.currency,
    }))
}

pub async fn register(
    State(db): State<Db>,
    payload: Result<Json<RegisterDomain>, JsonRejection>,
) -> Reply {
    let input = body(payload)?;
    let mut store = db.write().await;

    let tld = store
        .tld_for(&input.domain)
        .ok_or_else(|| unsupported_tld(&input.domain))?
        .clone();
    if store.domains.contains_key(&input.domain) || store.foreign.contains(&input.domain) {
        return Err(Failure::new(
            StatusCode::CONFLICT,
            "DOMAIN_ALREADY_EXISTS",
            format!("Domain is not available: {}", input.domain),
        ));
    }
    if !tld.rules.registration.contains(input.period) {
        return Err(Failure::bad_request(
            "INVALID_PERIOD",
            format!("Registration period must be {}-{} years", tld.rules.registration.min, tld.rules.registration.max),
        ));
    }
    check_nameservers(&store, &input.domain, &input.nameservers)?;
    check_contacts(&store, &input.contact)?;

    let price = tld.prices.registration * f64::from(input.period);
    let balance = store.balance;
    store
        .charge("registration", &input.domain, price)
        .ok_or_else(|| insufficient_balance(price, balance))?;

    let domain = store.new_domain(&input.domain, input.period, input.nameservers, input.contact);
    tracing::info!(domain = %domain.domain_name, period = input.period, "domain registered");
    store.domains.insert(domain.domain_name.clone(), domain.clone());
    created(domain)
}

pub async fn list(State(db): State<Db>, Query(query): Query<DomainQuery>) -> Reply {
    let store = db.read().await;
    let domains: Vec<&Domain> = store
        .domains
        .values()
        .filter(|d| query.status.as_ref().map_or(true, |s| &d.status == s))
        .filter(|d| query.search.as_ref().map_or(true, |s| d.domain_name.contains(s.as_str())))
        .collect();
    paged(domains, query.page, query.size)
}

pub async fn get(State(db): State<Db>, Path(domain): Path<String>) -> Reply {
    let store = db.read().await;
    ok(lookup(&store, &domain)?)
}

pub async fn delete(State(db): State<Db>, Path(domain): Path<String>) -> Reply {
    let mut store = db.write().await;
    lookup(&store, &domain)?;
    let deletable = store
        .tld_for(&domain)
        .is_some_and(|tld| tld.features.supports_deletion);
    if !deletable {
        return Err(Failure::bad_request(
            "DELETE_NOT_SUPPORTED",
            format!("TLD does not support deletion: {domain}"),
        ));
    }
    store.domains.remove(&domain);
    store.dnssec.remove(&domain);
    tracing::info!(%domain, "domain deleted");
    ok(json!(null))
}

pub async fn whois(State(db): State<Db>, Path(domain): Path<String>) -> Reply {
    let store = db.read().await;
    let record = lookup(&store, &domain)?;
    let mut status = vec!["ok".to_string()];
    if record.transfer_lock {
        status.push("clientTransferProhibited".to_string());
    }
    if record.update_lock {
        status.push("clientUpdateProhibited".to_string());
    }
    let dnssec = if store.dnssec.get(&domain).is_some_and(|ds| !ds.is_empty()) {
        "signedDelegation"
    } else {
        "unsigned"
    };
    ok(json!({
        "domainName": record.domain_name,
        "registrar": REGISTRAR,
        "registrant": record.contact_id.registrant,
        "createdDate": record.created_at.date,
        "expiresDate": record.expires_at.date,
        "updatedDate": record.updated_at.date,
        "status": status,
        "nameservers": record.nameservers,
        "dnssec": dnssec,
    }))
}

pub async fn locks(State(db): State<Db>, Path(domain): Path<String>) -> Reply {
    let store = db.read().await;
    let record = lookup(&store, &domain)?;
    ok(json!({
        "transferLock": record.transfer_lock,
        "transferAutoReject": record.transfer_auto_reject,
        "updateLock": record.update_lock,
    }))
}

pub async fn get_transfer_lock(State(db): State<Db>, Path(domain): Path<String>) -> Reply {
    let store = db.read().await;
    let transfer_lock = lookup(&store, &domain)?.transfer_lock;
    ok(TransferLock { transfer_lock })
}

pub async fn set_transfer_lock(
    State(db): State<Db>,
    Path(domain): Path<String>,
    payload: Result<Json<TransferLock>, JsonRejection>,
) -> Reply {
    let input = body(payload)?;
    let mut store = db.write().await;
    let record = lookup_mut(&mut store, &domain)?;
    record.transfer_lock = input.transfer_lock;
    ok(input)
}

pub async fn get_transfer_auto_reject(State(db): State<Db>, Path(domain): Path<String>) -> Reply {
    let store = db.read().await;
    let transfer_auto_reject = lookup(&store, &domain)?.transfer_auto_reject;
    ok(TransferAutoReject {
        transfer_auto_reject,
    })
}

pub async fn set_transfer_auto_reject(
    State(db): State<Db>,
    Path(domain): Path<String>,
    payload: Result<Json<TransferAutoReject>, JsonRejection>,
) -> Reply {
    let input = body(payload)?;
    let mut store = db.write().await;
    let record = lookup_mut(&mut store, &domain)?;
    record.transfer_auto_reject = input.transfer_auto_reject;
    ok(input)
}

pub async fn get_update_lock(State(db): State<Db>, Path(domain): Path<String>) -> Reply {
    let store = db.read().await;
    let update_lock = lookup(&store, &domain)?.update_lock;
    ok(UpdateLock { update_lock })
}

pub async fn set_update_lock(
    State(db): State<Db>,
    Path(domain): Path<String>,
    payload: Result<Json<UpdateLock>, JsonRejection>,
) -> Reply {
    let input = body(payload)?;
    let mut store = db.write().await;
    let record = lookup_mut(&mut store, &domain)?;
    record.update_lock = input.update_lock;
    ok(input)
}

pub async fn get_auth_code(State(db): State<Db>, Path(domain): Path<String>) -> Reply {
    let store = db.read().await;
    ok(&lookup(&store, &domain)?.authcode)
}

pub async fn change_auth_code(State(db): State<Db>, Path(domain): Path<String>) -> Reply {
    let mut store = db.write().await;
    let record = lookup_mut(&mut store, &domain)?;
    record.authcode = new_auth_code();
    record.updated_at = Timestamp::now();
    ok(&record.authcode)
}

pub async fn get_nameservers(State(db): State<Db>, Path(domain): Path<String>) -> Reply {
    let store = db.read().await;
    ok(json!({"nameservers": lookup(&store, &domain)?.nameservers}))
}

pub async fn update_nameservers(
    State(db): State<Db>,
    Path(domain): Path<String>,
    payload: Result<Json<Nameservers>, JsonRejection>,
) -> Reply {
    let input = body(payload)?;
    let mut store = db.write().await;
    lookup(&store, &domain)?;
    check_nameservers(&store, &domain, &input.nameservers)?;
    let record = lookup_unlocked(&mut store, &domain)?;
    record.nameservers = input.nameservers;
    record.updated_at = Timestamp::now();
    ok(json!({"nameservers": record.nameservers}))
}

pub async fn get_contact(State(db): State<Db>, Path(domain): Path<String>) -> Reply {
    let store = db.read().await;
    ok(&lookup(&store, &domain)?.contact_id)
}

pub async fn update_contact(
    State(db): State<Db>,
    Path(domain): Path<String>,
    payload: Result<Json<ContactIds>, JsonRejection>,
) -> Reply {
    let input = body(payload)?;
    let mut store = db.write().await;
    check_contacts(&store, &input)?;
    let record = lookup_unlocked(&mut store, &domain)?;
    record.contact_id = input;
    record.updated_at = Timestamp::now();
    ok(&record.contact_id)
}

pub async fn renew(
    State(db): State<Db>,
    Path(domain): Path<String>,
    payload: Result<Json<Period>, JsonRejection>,
) -> Reply {
    let input = body(payload)?;
    let mut store = db.write().await;
    lookup(&store, &domain)?;
    let tld = store
        .tld_for(&domain)
        .ok_or_else(|| unsupported_tld(&domain))?
        .clone();
    if !tld.rules.renewal.contains(input.period) {
        return Err(Failure::bad_request(
            "INVALID_PERIOD",
            format!("Renewal period must be {}-{} years", tld.rules.renewal.min, tld.rules.renewal.max),
        ));
    }

    let price = tld.prices.renewal * f64::from(input.period);
    let balance = store.balance;
    store
        .charge("renewal", &domain, price)
        .ok_or_else(|| insufficient_balance(price, balance))?;

    let record = lookup_mut(&mut store, &domain)?;
    record.expires_at = record.expires_at.extended(input.period);
    let renewal = Renewal {
        renewal_id: new_id(),
        domain_name: domain.clone(),
        period: input.period,
        price,
        currency: CURRENCY.to_string(),
        status: "completed".to_string(),
        created_at: Timestamp::now(),
        expires_at: record.expires_at.clone(),
    };
    store.renewals.push(renewal.clone());
    tracing::info!(%domain, period = input.period, "domain renewed");
    ok(renewal)
}

pub async fn renewal_history(State(db): State<Db>, Path(domain): Path<String>) -> Reply {
    let store = db.read().await;
    lookup(&store, &domain)?;
    let history: Vec<&Renewal> = store
        .renewals
        .iter()
        .filter(|r| r.domain_name == domain)
        .collect();
    ok(history)
}

/// Cancel a renewal and refund it.
pub async fn cancel_renewal(
    State(db): State<Db>,
    Path((domain, renewal_id)): Path<(String, String)>,
) -> Reply {
    let mut store = db.write().await;
    lookup(&store, &domain)?;
    let renewal = store
        .renewals
        .iter_mut()
        .find(|r| r.domain_name == domain && r.renewal_id == renewal_id && r.status == "completed")
        .ok_or_else(|| {
            Failure::not_found("RENEWAL_NOT_FOUND", format!("Renewal not found: {renewal_id}"))
        })?;
    renewal.status = "cancelled".to_string();
    let refund = renewal.price;
    store.balance += refund;
    ok(json!(null))
}

fn check_dnssec(domain: &str) -> Result<(), Failure> {
    if domain.ends_with(".kr") {
        Ok(())
    } else {
        Err(Failure::bad_request(
            "DNSSEC_NOT_SUPPORTED",
            format!("DNSSEC is only available for .kr domains: {domain}"),
        ))
    }
}

pub async fn get_dnssec(State(db): State<Db>, Path(domain): Path<String>) -> Reply {
    let store = db.read().await;
    lookup(&store, &domain)?;
    check_dnssec(&domain)?;
    let ds_data = store.dnssec.get(&domain).cloned().unwrap_or_default();
    ok(DsData { ds_data })
}

pub async fn configure_dnssec(
    State(db): State<Db>,
    Path(domain): Path<String>,
    payload: Result<Json<DsData>, JsonRejection>,
) -> Reply {
    let input = body(payload)?;
    let mut store = db.write().await;
    lookup(&store, &domain)?;
    check_dnssec(&domain)?;
    store.dnssec.insert(domain, input.ds_data.clone());
    ok(input)
}
