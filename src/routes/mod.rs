pub mod applications;
pub mod assignments;
pub mod docs;
pub mod documents;
pub mod health;
pub mod job_postings;
pub mod profiles;
pub mod sliders;
pub mod storage;

use crate::error::Result;
use crate::middleware::auth::Claims;
use crate::models::profile::{Profile, UserRole};
use crate::AppState;

/// Resolves the caller's profile, checking its role when `allowed` is non-empty.
pub(crate) async fn acting_profile(
    state: &AppState,
    claims: &Claims,
    allowed: &[UserRole],
) -> Result<Profile> {
    let user_id = claims.user_id()?;
    state.profile_service.require_role(user_id, allowed).await
}
