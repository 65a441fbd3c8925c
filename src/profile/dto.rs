use serde::{Deserialize, Serialize};

use crate::profile::repo::Profile;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub profile: Profile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_request_accepts_camel_case_fields() {
        let req: UpdateProfileRequest =
            serde_json::from_str(r#"{"displayName":"Ada","bio":"loves shapes"}"#).unwrap();
        assert_eq!(req.display_name.as_deref(), Some("Ada"));
        assert_eq!(req.bio.as_deref(), Some("loves shapes"));
    }

    #[test]
    fn update_request_fields_are_optional() {
        let req: UpdateProfileRequest = serde_json::from_str("{}").unwrap();
        assert!(req.display_name.is_none());
        assert!(req.bio.is_none());
    }
}
