use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use expat_desk::api::Client;
use expat_desk::property;
use expat_desk::property::api::PropertyApi;
use expat_desk::property::model::{Features, Location, PropertyDraft, PropertyFilter, PropertyType};
use expat_desk::property::service::PropertyService;
use expat_desk::tax;
use expat_desk::tax::api::TaxApi;
use expat_desk::tax::model::{TaxFilter, TaxStatus};
use expat_desk::tax::service::TaxService;
use expat_desk::ticket;
use expat_desk::ticket::api::TicketApi;
use expat_desk::ticket::model::{MessageKind, TicketFilter, TicketStatus};
use expat_desk::ticket::service::TicketService;
use expat_desk::user;
use expat_desk::user::model::Role;
use expat_desk::visa;
use expat_desk::visa::api::VisaApi;
use expat_desk::visa::model::{VisaDraft, VisaFilter, VisaStatus, VisaType};
use expat_desk::visa::service::VisaService;

mod fixture;

/// One in-memory collection behind every route; entities are raw JSON and
/// each handler mimics the backend envelope.
#[derive(Clone, Default)]
struct Collection {
    entities: Arc<Mutex<Vec<Value>>>,
    hits: Arc<AtomicUsize>,
}

impl Collection {
    fn seeded(entities: Vec<Value>) -> Self {
        Self {
            entities: Arc::new(Mutex::new(entities)),
            hits: Arc::default(),
        }
    }

    fn listing(&self) -> Value {
        self.hits.fetch_add(1, Ordering::SeqCst);
        let entities = self.entities.lock().unwrap().clone();
        fixture::ok(json!({
            "items": entities,
            "total": entities.len(),
            "totalPages": 1,
        }))
    }

    fn replace(&self, id: &str, entity: Value) {
        self.hits.fetch_add(1, Ordering::SeqCst);
        let mut entities = self.entities.lock().unwrap();
        if let Some(slot) = entities.iter_mut().find(|e| e["id"] == json!(id)) {
            *slot = entity;
        }
    }

    fn get(&self, id: &str) -> Option<Value> {
        let entities = self.entities.lock().unwrap();
        entities.iter().find(|e| e["id"] == json!(id)).cloned()
    }
}

// ---- property ----

fn property_router(collection: Collection) -> Router {
    async fn list(State(c): State<Collection>) -> Json<Value> {
        Json(c.listing())
    }

    async fn create(State(c): State<Collection>, Json(body): Json<Value>) -> Json<Value> {
        c.hits.fetch_add(1, Ordering::SeqCst);
        let mut created = fixture::property_json("p9", "owner", None);
        created["title"] = body["title"].clone();
        c.entities.lock().unwrap().push(created.clone());
        Json(fixture::ok(json!({"property": created})))
    }

    async fn update(
        State(c): State<Collection>,
        Path(id): Path<String>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let mut updated = c.get(&id).unwrap();
        updated["title"] = body["title"].clone();
        c.replace(&id, updated.clone());
        Json(fixture::ok(json!({"property": updated})))
    }

    async fn remove(State(c): State<Collection>, Path(id): Path<String>) -> Json<Value> {
        c.hits.fetch_add(1, Ordering::SeqCst);
        c.entities.lock().unwrap().retain(|e| e["id"] != json!(id));
        Json(fixture::ok(json!({"message": "deleted"})))
    }

    Router::new()
        .route("/api/real-estate", get(list).post(create))
        .route("/api/real-estate/{id}", put(update).delete(remove))
        .with_state(collection)
}

fn property_draft(title: &str) -> PropertyDraft {
    PropertyDraft {
        title: title.to_owned(),
        description: String::new(),
        kind: PropertyType::Apartment,
        price: 265_000.0,
        location: Location {
            address: "12 rue Sainte-Catherine".to_owned(),
            city: "Bordeaux".to_owned(),
            postal_code: "33000".to_owned(),
            lat: None,
            lng: None,
        },
        features: Features {
            bedrooms: 3,
            bathrooms: 1,
            area: 72.5,
            furnished: false,
        },
    }
}

#[tokio::test]
async fn property_crud_round_trip() {
    let collection = Collection::seeded(vec![fixture::property_json("p1", "owner", Some("agent"))]);
    let base_url = fixture::serve(property_router(collection.clone())).await;
    let service = PropertyService::new(PropertyApi::new(Client::new(base_url)));

    let listing = service.load_page(1, PropertyFilter::default()).await.unwrap();
    assert_eq!(listing.items.len(), 1);

    let created = service.create(&property_draft("Loft quai Richelieu")).await.unwrap();
    assert_eq!(created.title, "Loft quai Richelieu");
    assert_eq!(service.state().listing.items.len(), 2);

    let owner = fixture::user("owner", Role::User);
    let updated = service
        .update(&owner, &property::Id("p1".into()), &property_draft("Renamed"))
        .await
        .unwrap();
    assert_eq!(updated.title, "Renamed");

    let admin = fixture::user("root", Role::Admin);
    service.delete(&admin, &property::Id("p1".into())).await.unwrap();
    assert!(!service.state().listing.items.iter().any(|p| p.id.0 == "p1"));
}

#[tokio::test]
async fn property_edit_denied_locally_for_strangers() {
    let collection = Collection::seeded(vec![fixture::property_json("p1", "owner", None)]);
    let base_url = fixture::serve(property_router(collection.clone())).await;
    let service = PropertyService::new(PropertyApi::new(Client::new(base_url)));

    service.load_page(1, PropertyFilter::default()).await.unwrap();
    let hits_before = collection.hits.load(Ordering::SeqCst);

    let stranger = fixture::user("someone", Role::User);
    let result = service
        .update(&stranger, &property::Id("p1".into()), &property_draft("Hijacked"))
        .await;

    assert!(matches!(result, Err(property::Error::Forbidden)));
    // the rejected mutation never left the process
    assert_eq!(collection.hits.load(Ordering::SeqCst), hits_before);
}

// ---- tax ----

fn tax_router(collection: Collection) -> Router {
    async fn list(State(c): State<Collection>) -> Json<Value> {
        Json(c.listing())
    }

    async fn change_status(
        State(c): State<Collection>,
        Path(id): Path<String>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let mut updated = c.get(&id).unwrap();
        updated["status"] = body["status"].clone();
        c.replace(&id, updated.clone());
        Json(fixture::ok(json!({"taxCase": updated})))
    }

    Router::new()
        .route("/api/tax", get(list))
        .route("/api/tax/{id}/status", put(change_status))
        .with_state(collection)
}

#[tokio::test]
async fn tax_status_change_is_gated_and_server_confirmed() {
    let collection = Collection::seeded(vec![fixture::tax_json("t1", "client", Some("pro"), "PENDING")]);
    let base_url = fixture::serve(tax_router(collection.clone())).await;
    let service = TaxService::new(TaxApi::new(Client::new(base_url)));

    service.load_page(1, TaxFilter::default()).await.unwrap();
    let id = tax::Id("t1".into());

    // the gate offers the full enumeration to staff, nothing to the client
    let support = fixture::user("support", Role::Support);
    assert_eq!(
        service.selectable_statuses(&id, &support),
        TaxStatus::ALL.as_slice()
    );
    let client_user = fixture::user("client", Role::User);
    assert!(service.selectable_statuses(&id, &client_user).is_empty());

    let hits_before = collection.hits.load(Ordering::SeqCst);
    let denied = service
        .change_status(&client_user, &id, TaxStatus::Completed)
        .await;
    assert!(matches!(denied, Err(tax::Error::Forbidden)));
    assert_eq!(collection.hits.load(Ordering::SeqCst), hits_before);

    let updated = service
        .change_status(&support, &id, TaxStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(updated.status, TaxStatus::InProgress);
    assert_eq!(
        service.state().listing.items[0].status,
        TaxStatus::InProgress
    );
}

// ---- visa ----

fn visa_router(collection: Collection) -> Router {
    async fn list(State(c): State<Collection>) -> Json<Value> {
        Json(c.listing())
    }

    async fn update(
        State(c): State<Collection>,
        Path(id): Path<String>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let mut updated = c.get(&id).unwrap();
        if let Some(status) = body.get("status") {
            updated["status"] = status.clone();
        }
        updated["destination"] = body["destination"].clone();
        c.replace(&id, updated.clone());
        Json(fixture::ok(json!({"visaApplication": updated})))
    }

    Router::new()
        .route("/api/visa", get(list))
        .route("/api/visa/{id}", put(update))
        .with_state(collection)
}

fn visa_draft(destination: &str, status: Option<VisaStatus>) -> VisaDraft {
    VisaDraft {
        kind: VisaType::Work,
        destination: destination.to_owned(),
        passport: expat_desk::visa::model::PassportDetails {
            number: "X1234567".to_owned(),
            nationality: "Brazilian".to_owned(),
            expiry_date: chrono::NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
        },
        entry: expat_desk::visa::model::EntryDetails {
            entry_date: chrono::NaiveDate::from_ymd_opt(2026, 9, 1).unwrap(),
            exit_date: None,
            purpose: "employment".to_owned(),
        },
        status,
    }
}

#[tokio::test]
async fn visa_applicant_window_closes_after_processing() {
    let collection = Collection::seeded(vec![fixture::visa_json("v1", "ana", None, "SUBMITTED")]);
    let base_url = fixture::serve(visa_router(collection.clone())).await;
    let service = VisaService::new(VisaApi::new(Client::new(base_url)));

    service.load_page(1, VisaFilter::default()).await.unwrap();
    let id = visa::Id("v1".into());
    let applicant = fixture::user("ana", Role::User);

    // while SUBMITTED the applicant may still touch the application
    let updated = service
        .update(&applicant, &id, &visa_draft("France", None))
        .await
        .unwrap();
    assert_eq!(updated.status, VisaStatus::Submitted);

    // staff move it to PROCESSING through the same update endpoint
    let admin = fixture::user("root", Role::Admin);
    let processing = service
        .update(&admin, &id, &visa_draft("France", Some(VisaStatus::Processing)))
        .await
        .unwrap();
    assert_eq!(processing.status, VisaStatus::Processing);

    // same applicant, no re-fetch: the local state alone closes the window
    let denied = service.update(&applicant, &id, &visa_draft("Spain", None)).await;
    assert!(matches!(denied, Err(visa::Error::Forbidden)));
    let denied_delete = service.delete(&applicant, &id).await;
    assert!(matches!(denied_delete, Err(visa::Error::Forbidden)));
}

// ---- users ----

async fn users_route(
    axum::extract::Query(params): axum::extract::Query<std::collections::HashMap<String, String>>,
) -> Json<Value> {
    let agents = vec![fixture::user_json("garcia"), fixture::user_json("lemoine")];
    let everyone = vec![fixture::user_json("ana")];
    let users = match params.get("role").map(String::as_str) {
        Some("agent") => agents,
        _ => everyone,
    };
    Json(fixture::ok(json!({"users": users})))
}

#[tokio::test]
async fn users_can_be_filtered_by_role() {
    let router = Router::new().route("/api/users", get(users_route));
    let base_url = fixture::serve(router).await;
    let api = expat_desk::user::api::UserApi::new(Client::new(base_url));

    let agents = api.find_all(Some(Role::Agent)).await.unwrap();
    assert_eq!(agents.len(), 2);
    assert_eq!(agents[0].id.0, "garcia");

    let everyone = api.find_all(None).await.unwrap();
    assert_eq!(everyone.len(), 1);
}

// ---- ticket ----

fn ticket_router(collection: Collection) -> Router {
    async fn list(State(c): State<Collection>) -> Json<Value> {
        Json(c.listing())
    }

    async fn add_message(
        State(c): State<Collection>,
        Path(id): Path<String>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let mut updated = c.get(&id).unwrap();
        updated["messages"].as_array_mut().unwrap().push(json!({
            "sender": "creator",
            "content": body["content"],
            "attachments": body["attachments"],
            "kind": "user",
            "timestamp": "2025-05-21T09:00:00Z",
        }));
        c.replace(&id, updated.clone());
        Json(fixture::ok(json!({"ticket": updated})))
    }

    async fn change_status(
        State(c): State<Collection>,
        Path(id): Path<String>,
        Json(body): Json<Value>,
    ) -> Json<Value> {
        let mut updated = c.get(&id).unwrap();
        updated["status"] = body["status"].clone();
        // the backend records the transition as a system thread entry
        updated["messages"].as_array_mut().unwrap().push(json!({
            "sender": "creator",
            "content": "Status changed",
            "kind": "system",
            "timestamp": "2025-05-21T09:05:00Z",
        }));
        c.replace(&id, updated.clone());
        Json(fixture::ok(json!({"ticket": updated})))
    }

    Router::new()
        .route("/api/tickets", get(list))
        .route("/api/tickets/{id}/messages", post(add_message))
        .route("/api/tickets/{id}/status", put(change_status))
        .with_state(collection)
}

#[tokio::test]
async fn ticket_thread_and_self_close() {
    let collection = Collection::seeded(vec![fixture::ticket_json("tk1", "creator", None, "OPEN")]);
    let base_url = fixture::serve(ticket_router(collection.clone())).await;
    let service = TicketService::new(TicketApi::new(Client::new(base_url)));

    service.load_page(1, TicketFilter::default()).await.unwrap();
    let id = ticket::Id("tk1".into());

    let with_reply = service
        .add_message(&id, "It fails on PDF files only", &[])
        .await
        .unwrap();
    assert_eq!(with_reply.messages.len(), 1);
    assert_eq!(with_reply.messages[0].kind, MessageKind::User);

    // the creator may close their own ticket
    let creator = fixture::user("creator", Role::User);
    let closed = service
        .change_status(&creator, &id, TicketStatus::Closed)
        .await
        .unwrap();
    assert_eq!(closed.status, TicketStatus::Closed);
    assert_eq!(closed.messages.last().unwrap().kind, MessageKind::System);

    // but a bystander may not even ask
    let stranger = fixture::user("someone", Role::User);
    let hits_before = collection.hits.load(Ordering::SeqCst);
    let denied = service
        .change_status(&stranger, &id, TicketStatus::Open)
        .await;
    assert!(matches!(denied, Err(ticket::Error::Forbidden)));
    assert_eq!(collection.hits.load(Ordering::SeqCst), hits_before);

    // assignment stays with admin/support
    let agent = fixture::user("garcia", Role::Agent);
    let denied_assign = service.assign(&agent, &id, &user::Id("garcia".into())).await;
    assert!(matches!(denied_assign, Err(ticket::Error::Forbidden)));
}
