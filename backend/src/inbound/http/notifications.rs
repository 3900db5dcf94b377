//! Notification inbox handlers.
//!
//! ```text
//! GET /api/get-notifications?limit=20&unreadOnly=true
//! PUT /api/read-notification {"notificationId":"<uuid>"}
//! PUT /api/read-all-notifications
//! ```

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{INBOX_MAX_LIMIT, InboxLimit, NotificationView};
use crate::inbound::http::ApiResult;
use crate::inbound::http::cache_control::private_no_cache_header;
use crate::inbound::http::schemas::{ErrorSchema, NotificationViewSchema};
use crate::inbound::http::session::AuthenticatedUser;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, invalid_field_error, parse_uuid};

const LIMIT: FieldName = FieldName::new("limit");
const NOTIFICATION_ID: FieldName = FieldName::new("notificationId");

/// Query parameters for `GET /api/get-notifications`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct InboxParams {
    /// Number of notifications to return, 1 to 100. Defaults to 20.
    pub limit: Option<u32>,
    /// Only return unread notifications.
    #[serde(default)]
    pub unread_only: bool,
}

/// Inbox listing.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InboxResponse {
    #[schema(value_type = Vec<NotificationViewSchema>)]
    pub notifications: Vec<NotificationView>,
    /// Unread notifications across the whole inbox.
    pub unread_count: u64,
}

/// Request body for `PUT /api/read-notification`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReadNotificationRequest {
    #[schema(value_type = String, format = Uuid)]
    pub notification_id: Option<String>,
}

/// Count of notifications marked read.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadAllResponse {
    pub updated: u64,
}

/// List the viewer's notifications, newest first.
#[utoipa::path(
    get,
    path = "/api/get-notifications",
    params(InboxParams),
    responses(
        (status = 200, description = "Inbox", body = InboxResponse),
        (status = 400, description = "Invalid limit", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "getNotifications"
)]
pub async fn get_notifications(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    params: web::Query<InboxParams>,
) -> ApiResult<HttpResponse> {
    let viewer = user.id();
    let InboxParams { limit, unread_only } = params.into_inner();
    let limit = InboxLimit::new(limit).ok_or_else(|| {
        invalid_field_error(LIMIT, format!("must be between 1 and {INBOX_MAX_LIMIT}"))
    })?;
    let feed = state
        .notifications
        .list(&viewer, limit, unread_only)
        .await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(InboxResponse {
            notifications: feed.notifications,
            unread_count: feed.unread_count,
        }))
}

/// Mark one notification read.
#[utoipa::path(
    put,
    path = "/api/read-notification",
    request_body = ReadNotificationRequest,
    responses(
        (status = 204, description = "Marked read"),
        (status = 400, description = "Invalid id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "No such notification", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "readNotification"
)]
pub async fn read_notification(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    payload: web::Json<ReadNotificationRequest>,
) -> ApiResult<HttpResponse> {
    let viewer = user.id();
    let id = parse_uuid(payload.into_inner().notification_id, NOTIFICATION_ID)?;
    state.notifications.mark_read(&viewer, id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Mark every notification read.
#[utoipa::path(
    put,
    path = "/api/read-all-notifications",
    responses(
        (status = 200, description = "Number marked read", body = ReadAllResponse),
        (status = 401, description = "Unauthorised", body = ErrorSchema)
    ),
    tags = ["notifications"],
    operation_id = "readAllNotifications"
)]
pub async fn read_all_notifications(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let viewer = user.id();
    let updated = state.notifications.mark_all_read(&viewer).await?;
    Ok(HttpResponse::Ok()
        .insert_header(private_no_cache_header())
        .json(ReadAllResponse { updated }))
}
