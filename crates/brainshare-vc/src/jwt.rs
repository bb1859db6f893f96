//! Unverified extraction of a credential from a compact `vc+jwt` token.
//!
//! Free-text messages may embed credentials as compact JWTs. This module
//! maps the token's payload (the `vc` claim plus the registered claims that
//! mirror envelope fields) back onto a [`VerifiableCredential`], with the
//! original token preserved as a `JwtProof2020` proof. No signature check
//! happens here; verification goes through the [`crate::CredentialEngine`].

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::credential::VerifiableCredential;
use crate::engine::VcError;

/// Decode the payload of a compact JWT and normalize it into a credential.
///
/// # Errors
///
/// Returns [`VcError::MalformedJwt`] when the token is not three dot-joined
/// base64url segments, or the payload is not JSON with a `vc` claim that
/// maps onto the credential envelope.
pub fn credential_from_jwt(token: &str) -> Result<VerifiableCredential, VcError> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(VcError::MalformedJwt(
            "expected three dot-separated segments".to_string(),
        ));
    };

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| VcError::MalformedJwt(format!("payload is not base64url: {e}")))?;
    let claims: Value = serde_json::from_slice(&payload_bytes)
        .map_err(|e| VcError::MalformedJwt(format!("payload is not JSON: {e}")))?;

    let Some(vc) = claims.get("vc") else {
        return Err(VcError::MalformedJwt("missing `vc` claim".to_string()));
    };
    let mut vc = vc.clone();
    let Some(obj) = vc.as_object_mut() else {
        return Err(VcError::MalformedJwt("`vc` claim is not an object".to_string()));
    };

    // Registered claims override the mirrored envelope fields.
    if let Some(iss) = claims.get("iss").and_then(Value::as_str) {
        obj.insert("issuer".to_string(), json!({ "id": iss }));
    }
    if let Some(jti) = claims.get("jti").and_then(Value::as_str) {
        obj.insert("id".to_string(), Value::String(jti.to_string()));
    }
    if let Some(seconds) = claims
        .get("nbf")
        .or_else(|| claims.get("iat"))
        .and_then(Value::as_i64)
    {
        if let Some(issued) = DateTime::<Utc>::from_timestamp(seconds, 0) {
            obj.insert(
                "issuanceDate".to_string(),
                Value::String(issued.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)),
            );
        }
    }
    if let Some(sub) = claims.get("sub").and_then(Value::as_str) {
        let subject = obj
            .entry("credentialSubject".to_string())
            .or_insert_with(|| json!({}));
        if let Some(subject) = subject.as_object_mut() {
            subject
                .entry("id".to_string())
                .or_insert_with(|| Value::String(sub.to_string()));
        }
    }
    obj.insert(
        "proof".to_string(),
        json!({ "type": "JwtProof2020", "jwt": token }),
    );

    Ok(serde_json::from_value(vc)?)
}
