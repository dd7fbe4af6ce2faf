//! `DeviceUser` extractor: resolves the calling device to a user.
//!
//! Resolution order: `X-Device-Id` header, `deviceId` query parameter,
//! first `X-Forwarded-For` hop, `X-Real-IP`, then the peer address. IP-based
//! ids take the form `ip-<address>` with `.` and `:` replaced by `-`.
//! This is attribution, not authentication.

use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts, Query};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use serde::Deserialize;

use lifeline_core::types::UserId;
use lifeline_entity::user::User;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying a client-generated device id.
pub const DEVICE_ID_HEADER: &str = "x-device-id";

/// The user behind the current request, created on first sight.
#[derive(Debug, Clone)]
pub struct DeviceUser(pub User);

impl DeviceUser {
    /// The resolved user id.
    pub fn id(&self) -> &UserId {
        &self.0.id
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeviceQuery {
    device_id: Option<String>,
}

impl FromRequestParts<AppState> for DeviceUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let query_device = Query::<DeviceQuery>::try_from_uri(&parts.uri)
            .map(|Query(q)| q.device_id)
            .unwrap_or_default();
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        let user_id = resolve_user_id(&parts.headers, query_device.as_deref(), peer);
        let user = state.user_service.identify(&user_id).await?;
        Ok(DeviceUser(user))
    }
}

/// Pick the user id for a request.
pub fn resolve_user_id(
    headers: &HeaderMap,
    query_device: Option<&str>,
    peer: Option<SocketAddr>,
) -> UserId {
    let header_device = header_str(headers, DEVICE_ID_HEADER);
    if let Some(id) = header_device
        .into_iter()
        .chain(query_device)
        .find_map(|raw| UserId::parse(raw).ok())
    {
        return id;
    }

    let forwarded = header_str(headers, "x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    let real_ip = header_str(headers, "x-real-ip")
        .map(str::trim)
        .filter(|v| !v.is_empty());

    match forwarded.or(real_ip) {
        Some(ip) => UserId::from_ip(ip),
        None => match peer {
            Some(addr) => UserId::from_ip(&addr.ip().to_string()),
            None => UserId::from_ip("unknown"),
        },
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}
