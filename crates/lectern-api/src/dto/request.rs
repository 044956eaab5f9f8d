//! Request DTOs.

use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use lectern_entity::material::MaterialKind;

/// Login credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body for creating a material node.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMaterialRequest {
    pub display_name: String,
    pub kind: MaterialKind,
    #[serde(default)]
    pub parent_id: Option<Uuid>,
}

/// Body for updating a material node.
///
/// `parent_id` distinguishes "field absent" (keep the current parent)
/// from an explicit `null` (move to root); the double `Option` captures
/// that tri-state.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMaterialRequest {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub is_favorite: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<Uuid>>,
}

/// Body for presigning a PDF upload.
#[derive(Debug, Clone, Deserialize)]
pub struct PdfPresignRequest {
    pub file_name: String,
    pub file_size: u64,
}

/// Body for saving a page's HTML overlay.
#[derive(Debug, Clone, Deserialize)]
pub struct HtmlLayerRequest {
    pub html_content: String,
}

/// Deserializes a present-but-possibly-null field into `Some(Option<T>)`,
/// leaving `None` for an absent field (via `#[serde(default)]`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_parent_id_is_none() {
        let req: UpdateMaterialRequest =
            serde_json::from_str(r#"{"display_name": "Math"}"#).unwrap();
        assert_eq!(req.parent_id, None);
        assert_eq!(req.display_name.as_deref(), Some("Math"));
    }

    #[test]
    fn null_parent_id_means_move_to_root() {
        let req: UpdateMaterialRequest = serde_json::from_str(r#"{"parent_id": null}"#).unwrap();
        assert_eq!(req.parent_id, Some(None));
    }

    #[test]
    fn concrete_parent_id_means_move_under_it() {
        let id = Uuid::new_v4();
        let req: UpdateMaterialRequest =
            serde_json::from_str(&format!(r#"{{"parent_id": "{id}"}}"#)).unwrap();
        assert_eq!(req.parent_id, Some(Some(id)));
    }
}
