//! REST API helpers for the identity service and profile documents.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs, since these endpoints are only meaningful in
//! the browser.
//!
//! ERROR HANDLING
//! ==============
//! Failures map onto `funb_gate` error types so the browser adapters can
//! hand them straight to the gate, which degrades instead of crashing
//! hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use funb_gate::provider::DocumentResult;
use funb_gate::{AuthError, StoreError};

use super::types::User;

#[cfg(any(test, feature = "hydrate"))]
fn document_endpoint(collection: &str, id: &str) -> String {
    format!("/api/{collection}/{id}/profile")
}

/// Map a non-OK document response status onto a store outcome.
#[cfg(any(test, feature = "hydrate"))]
fn document_status(collection: &str, id: &str, status: u16) -> DocumentResult {
    match status {
        404 => Ok(None),
        401 | 403 => Err(StoreError::PermissionDenied { collection: collection.to_owned(), id: id.to_owned() }),
        _ => Err(StoreError::Unavailable(format!("profile request failed: {status}"))),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn auth_failed_message(action: &str, status: u16) -> String {
    format!("{action} failed: {status}")
}

/// Fetch the currently authenticated user from `/api/auth/me`.
///
/// `Ok(None)` means signed out (401).
///
/// # Errors
///
/// Returns `AuthError::Unavailable` if the request fails or the server
/// responds with any other non-OK status.
pub async fn fetch_current_user() -> Result<Option<User>, AuthError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::get("/api/auth/me")
            .send()
            .await
            .map_err(|e| AuthError::Unavailable(e.to_string()))?;
        if resp.status() == 401 {
            return Ok(None);
        }
        if !resp.ok() {
            return Err(AuthError::Unavailable(auth_failed_message("session lookup", resp.status())));
        }
        resp.json::<User>()
            .await
            .map(Some)
            .map_err(|e| AuthError::Unavailable(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(AuthError::Unavailable("not available on server".to_owned()))
    }
}

/// End the current session via `POST /api/auth/logout`.
///
/// # Errors
///
/// Returns `AuthError::SignOutRejected` if the request fails or is refused.
pub async fn logout() -> Result<(), AuthError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/auth/logout")
            .send()
            .await
            .map_err(|e| AuthError::SignOutRejected(e.to_string()))?;
        if !resp.ok() {
            return Err(AuthError::SignOutRejected(auth_failed_message("logout", resp.status())));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err(AuthError::SignOutRejected("not available on server".to_owned()))
    }
}

/// Sign in with email and password via `POST /api/auth/login`.
///
/// # Errors
///
/// Returns an error string if the HTTP request fails or the credentials are rejected.
pub async fn sign_in_with_password(email: &str, password: &str) -> Result<(), String> {
    credentials_request("/api/auth/login", "sign in", email, password).await
}

/// Create an account via `POST /api/auth/signup`.
///
/// # Errors
///
/// Returns an error string if the HTTP request fails or the server refuses the account.
pub async fn sign_up(email: &str, password: &str) -> Result<(), String> {
    credentials_request("/api/auth/signup", "sign up", email, password).await
}

async fn credentials_request(url: &str, action: &str, email: &str, password: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let body = super::types::Credentials { email, password };
        let resp = gloo_net::http::Request::post(url)
            .json(&body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(auth_failed_message(action, resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (url, email, password);
        Err(format!("{action} not available on server"))
    }
}

/// Read one profile document from `/api/{collection}/{id}/profile`.
pub async fn fetch_document(collection: &str, id: &str) -> DocumentResult {
    #[cfg(feature = "hydrate")]
    {
        let url = document_endpoint(collection, id);
        let resp = gloo_net::http::Request::get(&url)
            .send()
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        if !resp.ok() {
            return document_status(collection, id, resp.status());
        }
        resp.json::<serde_json::Value>()
            .await
            .map(Some)
            .map_err(|e| StoreError::Decode(e.to_string()))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (collection, id);
        Err(StoreError::Unavailable("not available on server".to_owned()))
    }
}
