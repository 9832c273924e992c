//! Wire format of the identity service profile endpoint.
//!
//! Deployments disagree on field names (`rol` vs `role`, `subRole` vs
//! `sub_role`) and on whether the profile is wrapped in `data` or `user`;
//! all of those shapes decode.

use serde_json::{Map, Value};

use acadmin_core::domain::CallerProfile;
use acadmin_core::ports::IdentityError;

const ID_KEYS: &[&str] = &["id", "user_id", "userId", "sub"];
const NAME_KEYS: &[&str] = &["name", "full_name", "fullName"];
const GIVEN_NAME_KEYS: &[&str] = &["given_name", "first_name", "firstName"];
const FAMILY_NAME_KEYS: &[&str] = &["family_name", "last_name", "lastName"];
const ROLE_KEYS: &[&str] = &["role", "rol"];
const SUB_ROLE_KEYS: &[&str] = &["sub_role", "subRole", "subrole", "sub_rol"];

/// First non-empty value among `keys`, in order. Numbers are rendered as text.
///
/// Payloads may carry a canonical key and its alias side by side (`id` and
/// `sub`); the earlier key in the list wins.
fn first_text(map: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match map.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Decode a profile response into a [`CallerProfile`].
pub(crate) fn parse_profile(body: Value) -> Result<CallerProfile, IdentityError> {
    let Value::Object(map) = unwrap_envelope(body) else {
        return Err(IdentityError::InvalidResponse(
            "profile is not a JSON object".to_string(),
        ));
    };

    let role = first_text(&map, ROLE_KEYS)
        .ok_or_else(|| IdentityError::InvalidResponse("profile has no role".to_string()))?;
    let email = first_text(&map, &["email"]);

    let user_id = first_text(&map, ID_KEYS)
        .or_else(|| email.clone())
        .ok_or_else(|| {
            IdentityError::InvalidResponse("profile has neither id nor email".to_string())
        })?;

    let name = first_text(&map, NAME_KEYS).or_else(|| {
        let parts: Vec<_> = [
            first_text(&map, GIVEN_NAME_KEYS),
            first_text(&map, FAMILY_NAME_KEYS),
        ]
        .into_iter()
        .flatten()
        .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    });

    Ok(CallerProfile {
        user_id,
        email,
        name,
        role,
        sub_role: first_text(&map, SUB_ROLE_KEYS),
    })
}

fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(mut map) => {
            for key in ["data", "user"] {
                if map.get(key).is_some_and(Value::is_object) {
                    if let Some(inner) = map.remove(key) {
                        return inner;
                    }
                }
            }
            Value::Object(map)
        }
        other => other,
    }
}
