//! Validation helpers for DTOs.

use uuid::Uuid;
use validator::ValidationError;

/// Validates that a game id was actually provided.
///
/// A request without `game_id` deserializes to the nil UUID, which no game ever carries.
///
/// # Examples
///
/// ```ignore
/// validate_game_id(&Uuid::new_v4()) // Ok
/// validate_game_id(&Uuid::nil())    // Err - missing
/// ```
pub fn validate_game_id(id: &Uuid) -> Result<(), ValidationError> {
    if id.is_nil() {
        let mut err = ValidationError::new("game_id_missing");
        err.message = Some("Game ID must be provided".into());
        return Err(err);
    }

    Ok(())
}
