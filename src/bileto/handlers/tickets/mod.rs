//! Support ticket operations: create, list, fetch by id.

pub mod storage;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use self::storage::{get_ticket_by_id, insert_ticket, list_all_tickets, Ticket};
use super::auth::types::ResponseResult;

// Fields default to empty so absent keys fail validation the same way
// empty strings do.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct TicketRequest {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: String,
}

impl TicketRequest {
    fn has_required_fields(&self) -> bool {
        !self.subject.is_empty() && !self.description.is_empty() && !self.priority.is_empty()
    }
}

#[utoipa::path(
    post,
    path = "/tickets",
    request_body = TicketRequest,
    responses(
        (status = 201, description = "Ticket created", body = ResponseResult),
        (status = 400, description = "Missing fields", body = ResponseResult),
    ),
    tag = "tickets"
)]
pub async fn create_ticket(
    pool: Extension<PgPool>,
    payload: Option<Json<TicketRequest>>,
) -> Response {
    let Some(Json(request)) = payload else {
        warn!(category = "ticket", "Missing required fields");
        return (
            StatusCode::BAD_REQUEST,
            Json(ResponseResult::failed("All fields are required")),
        )
            .into_response();
    };

    // All three fields are required before anything is persisted.
    if !request.has_required_fields() {
        warn!(category = "ticket", "Missing required fields");
        return (
            StatusCode::BAD_REQUEST,
            Json(ResponseResult::failed("All fields are required")),
        )
            .into_response();
    }

    match insert_ticket(
        &pool,
        &request.subject,
        &request.description,
        &request.priority,
    )
    .await
    {
        Ok(ticket) => {
            info!(
                category = "ticket",
                id = %ticket.id,
                subject = %ticket.subject,
                "Ticket created successfully"
            );
            (
                StatusCode::CREATED,
                Json(ResponseResult::ok("Ticket created successfully")),
            )
                .into_response()
        }
        Err(err) => {
            error!(category = "ticket", error = ?err, "Error creating ticket");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ResponseResult::failed(
                    "An error occurred while creating the ticket",
                )),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/tickets",
    responses(
        (status = 200, description = "All tickets, newest first", body = [Ticket]),
    ),
    tag = "tickets"
)]
pub async fn list_tickets(pool: Extension<PgPool>) -> Response {
    match list_all_tickets(&pool).await {
        Ok(tickets) => (StatusCode::OK, Json(tickets)).into_response(),
        Err(err) => {
            error!(category = "ticket", error = ?err, "Error listing tickets");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/tickets/{id}",
    params(
        ("id" = String, Path, description = "Ticket id")
    ),
    responses(
        (status = 200, description = "The ticket", body = Ticket),
        (status = 404, description = "No such ticket"),
    ),
    tag = "tickets"
)]
pub async fn get_ticket(pool: Extension<PgPool>, Path(id): Path<String>) -> Response {
    let Ok(ticket_id) = id.parse::<Uuid>() else {
        return (StatusCode::BAD_REQUEST, "Invalid ticket id".to_string()).into_response();
    };

    match get_ticket_by_id(&pool, ticket_id).await {
        Ok(Some(ticket)) => (StatusCode::OK, Json(ticket)).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, "Ticket not found".to_string()).into_response(),
        Err(err) => {
            error!(category = "ticket", error = ?err, "Error fetching ticket");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
