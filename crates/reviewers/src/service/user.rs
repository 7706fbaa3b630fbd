//! User activity toggling.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::{ReviewError, User, UserId, UserRepository};

pub struct UserService {
    users: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// Sets the user's active flag. No other field changes.
    #[instrument(skip_all, fields(user_id = %id, is_active = is_active))]
    pub async fn set_is_active(&self, id: UserId, is_active: bool) -> Result<User, ReviewError> {
        let mut user = self.users.get_user(id).await?;
        user.is_active = is_active;
        self.users.update_user(user.clone()).await?;

        info!("user active status updated");
        Ok(user)
    }
}
