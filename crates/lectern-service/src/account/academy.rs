//! Affiliated academy management.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use lectern_core::error::AppError;
use lectern_core::result::AppResult;
use lectern_database::repositories::academy::AcademyRepository;
use lectern_entity::academy::Academy;

use crate::context::RequestContext;

/// Request to register an academy.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct CreateAcademyRequest {
    /// Campus name, 2 to 100 characters.
    pub campus_name: String,
    /// Region label, 2 to 255 characters.
    pub region: String,
    /// Contact number in `010-XXXX-XXXX` form.
    pub contact_number: Option<String>,
}

/// Field changes for an existing academy.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct UpdateAcademyRequest {
    pub campus_name: Option<String>,
    pub region: Option<String>,
    pub contact_number: Option<String>,
    pub is_active: Option<bool>,
}

/// Manages affiliated academies.
#[derive(Debug, Clone)]
pub struct AcademyService {
    academies: Arc<AcademyRepository>,
}

impl AcademyService {
    /// Creates a new academy service.
    pub fn new(academies: Arc<AcademyRepository>) -> Self {
        Self { academies }
    }

    /// Gets an existing academy by ID.
    pub async fn get_academy(&self, id: Uuid) -> AppResult<Academy> {
        self.academies
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Academy not found"))
    }

    /// Lists existing academies, newest first.
    pub async fn list(&self) -> AppResult<Vec<Academy>> {
        self.academies.list().await
    }

    /// Registers a new academy.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateAcademyRequest,
    ) -> AppResult<Academy> {
        ctx.require_admin()?;
        let campus_name = validate_length("Campus name", &req.campus_name, 2, 100)?;
        let region = validate_length("Region", &req.region, 2, 255)?;
        if let Some(number) = &req.contact_number {
            validate_contact_number(number)?;
        }

        let academy = self
            .academies
            .insert(&campus_name, &region, req.contact_number.as_deref())
            .await?;

        info!(
            admin_id = %ctx.user_id,
            academy_id = %academy.id,
            campus_name = %academy.campus_name,
            "Academy created"
        );
        Ok(academy)
    }

    /// Updates fields of an academy.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: UpdateAcademyRequest,
    ) -> AppResult<Academy> {
        ctx.require_admin()?;
        let mut academy = self.get_academy(id).await?;

        if let Some(campus_name) = &req.campus_name {
            academy.campus_name = validate_length("Campus name", campus_name, 2, 100)?;
        }
        if let Some(region) = &req.region {
            academy.region = validate_length("Region", region, 2, 255)?;
        }
        if let Some(number) = req.contact_number {
            validate_contact_number(&number)?;
            academy.contact_number = Some(number);
        }
        if let Some(is_active) = req.is_active {
            academy.is_active = is_active;
        }

        let academy = self.academies.update(&academy).await?;
        info!(admin_id = %ctx.user_id, academy_id = %id, "Academy updated");
        Ok(academy)
    }

    /// Soft-deletes an academy.
    pub async fn delete(&self, ctx: &RequestContext, id: Uuid) -> AppResult<()> {
        ctx.require_admin()?;
        if !self.academies.soft_delete(id).await? {
            return Err(AppError::not_found("Academy not found"));
        }
        info!(admin_id = %ctx.user_id, academy_id = %id, "Academy deleted");
        Ok(())
    }
}

fn validate_length(field: &str, value: &str, min: usize, max: usize) -> AppResult<String> {
    let trimmed = value.trim();
    let chars = trimmed.chars().count();
    if chars < min || chars > max {
        return Err(AppError::validation(format!(
            "{field} must be {min} to {max} characters"
        )));
    }
    Ok(trimmed.to_string())
}

/// Checks the `010-XXXX-XXXX` contact number form.
fn validate_contact_number(number: &str) -> AppResult<()> {
    let parts: Vec<&str> = number.split('-').collect();
    let well_formed = parts.len() == 3
        && parts[0] == "010"
        && parts[1].len() == 4
        && parts[2].len() == 4
        && parts[1..].iter().all(|p| p.chars().all(|c| c.is_ascii_digit()));
    if !well_formed {
        return Err(AppError::validation(
            "Contact number must look like 010-1234-5678",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contact_number_format() {
        assert!(validate_contact_number("010-1234-5678").is_ok());
        assert!(validate_contact_number("011-1234-5678").is_err());
        assert!(validate_contact_number("010-123-5678").is_err());
        assert!(validate_contact_number("010-12a4-5678").is_err());
        assert!(validate_contact_number("01012345678").is_err());
    }

    #[test]
    fn length_validation_trims_first() {
        assert_eq!(
            validate_length("Campus name", "  Gangnam  ", 2, 100).unwrap(),
            "Gangnam"
        );
        assert!(validate_length("Campus name", " a ", 2, 100).is_err());
    }
}
