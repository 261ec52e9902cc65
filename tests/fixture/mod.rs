#![allow(dead_code)]

use axum::Router;
use serde_json::{Value, json};

use expat_desk::user;
use expat_desk::user::model::{Role, User};

/// Serves the router on an ephemeral port and returns the base URL the
/// client under test should point at.
pub async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn user(id: &str, role: Role) -> User {
    User {
        id: user::Id(id.to_owned()),
        username: id.to_owned(),
        email: format!("{id}@example.com"),
        avatar: None,
        phone: None,
        role,
        is_admin: false,
    }
}

pub fn user_json(id: &str) -> Value {
    json!({
        "id": id,
        "username": id,
        "email": format!("{id}@example.com"),
        "role": "user",
    })
}

pub fn message_json(
    id: &str,
    sender: &str,
    recipient: &str,
    content: &str,
    created_at: &str,
    is_read: bool,
) -> Value {
    json!({
        "id": id,
        "sender": user_json(sender),
        "recipient": user_json(recipient),
        "content": content,
        "attachments": [],
        "isRead": is_read,
        "created_at": created_at,
    })
}

pub fn property_json(id: &str, owner: &str, agent: Option<&str>) -> Value {
    let mut property = json!({
        "id": id,
        "title": "T3 rue Sainte-Catherine",
        "description": "",
        "type": "apartment",
        "price": 265000.0,
        "location": {
            "address": "12 rue Sainte-Catherine",
            "city": "Bordeaux",
            "postalCode": "33000",
        },
        "features": {
            "bedrooms": 3,
            "bathrooms": 1,
            "area": 72.5,
            "furnished": false,
        },
        "images": [],
        "owner": owner,
        "created_at": "2025-02-10T08:30:00Z",
    });
    if let Some(agent) = agent {
        property["agent"] = json!(agent);
    }
    property
}

pub fn tax_json(id: &str, client: &str, professional: Option<&str>, status: &str) -> Value {
    let mut case = json!({
        "id": id,
        "type": "INCOME_TAX",
        "fiscalYear": 2024,
        "status": status,
        "client": client,
        "documents": [],
        "fiscal": {
            "totalIncome": 48000.0,
            "totalDeductions": 3200.0,
            "taxDue": 6900.0,
        },
        "created_at": "2025-03-01T09:00:00Z",
    });
    if let Some(professional) = professional {
        case["taxProfessional"] = json!(professional);
    }
    case
}

pub fn visa_json(id: &str, applicant: &str, agent: Option<&str>, status: &str) -> Value {
    let mut application = json!({
        "id": id,
        "type": "WORK",
        "destination": "France",
        "status": status,
        "applicant": applicant,
        "passport": {
            "number": "X1234567",
            "nationality": "Brazilian",
            "expiryDate": "2030-01-01",
        },
        "entry": {
            "entryDate": "2026-09-01",
            "purpose": "employment",
        },
        "documents": [],
        "images": [],
        "created_at": "2025-04-12T14:00:00Z",
    });
    if let Some(agent) = agent {
        application["agent"] = json!(agent);
    }
    application
}

pub fn ticket_json(id: &str, creator: &str, assigned: Option<&str>, status: &str) -> Value {
    let mut ticket = json!({
        "id": id,
        "subject": "Cannot upload documents",
        "description": "Upload button does nothing",
        "category": "TECHNICAL",
        "priority": "HIGH",
        "status": status,
        "user": creator,
        "messages": [],
        "created_at": "2025-05-20T11:00:00Z",
    });
    if let Some(assigned) = assigned {
        ticket["assignedTo"] = json!(assigned);
    }
    ticket
}

pub fn ok(payload: Value) -> Value {
    let mut envelope = json!({"success": true});
    if let (Some(envelope), Some(payload)) = (envelope.as_object_mut(), payload.as_object()) {
        for (k, v) in payload {
            envelope.insert(k.clone(), v.clone());
        }
    }
    envelope
}

pub fn rejected(message: &str, errors: &[&str]) -> Value {
    json!({"success": false, "message": message, "errors": errors})
}
