use sea_orm::{DatabaseConnection, SqlErr};
use serde_json::json;

use crate::server::{
    data::{friendship::FriendshipRepository, user::UserRepository},
    error::AppError,
    model::{
        feed::{FRIEND_ADDED, FRIEND_REQUEST_RECEIVED},
        friend::{FriendRequest, Friendship, STATUS_ACCEPTED, STATUS_PENDING},
        user::User,
    },
    service::feed::FeedService,
};

pub struct FriendService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> FriendService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Sends a friend request from `requester` to `addressee_id`.
    ///
    /// # Returns
    /// - `Ok(Friendship)` - The new pending request
    /// - `Err(AppError::Forbidden)` - Request to oneself
    /// - `Err(AppError::NotFound)` - Addressee does not exist
    /// - `Err(AppError::Conflict)` - A request or friendship already exists either way
    pub async fn send_request(&self, requester: &User, addressee_id: i32) -> Result<Friendship, AppError> {
        if requester.id == addressee_id {
            return Err(AppError::Forbidden("You cannot add yourself".to_string()));
        }

        if UserRepository::new(self.db)
            .find_by_id(addressee_id)
            .await?
            .is_none()
        {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        let created = FriendshipRepository::new(self.db)
            .create_request(requester.id, addressee_id)
            .await;
        let friendship = match created {
            Ok(Some(friendship)) => friendship,
            Ok(None) => return Err(pair_exists()),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(pair_exists());
            }
            Err(e) => return Err(e.into()),
        };

        FeedService::new(self.db)
            .add_event_logged(
                addressee_id,
                FRIEND_REQUEST_RECEIVED,
                json!({
                    "friendship_id": friendship.id,
                    "from_user_id": requester.id,
                    "from_name": requester.name,
                }),
            )
            .await;

        Ok(friendship)
    }

    /// Accepts a pending request addressed to the caller.
    pub async fn accept(&self, caller_id: i32, friendship_id: i32) -> Result<Friendship, AppError> {
        let repo = FriendshipRepository::new(self.db);

        let Some(friendship) = repo.find_by_id(friendship_id).await? else {
            return Err(AppError::NotFound("Request not found".to_string()));
        };
        if friendship.addressee_id != caller_id {
            return Err(AppError::Forbidden(
                "Only the addressee can accept a request".to_string(),
            ));
        }
        if friendship.status == STATUS_ACCEPTED {
            return Ok(friendship);
        }

        let accepted = repo
            .accept(friendship_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Request not found".to_string()))?;

        let feed = FeedService::new(self.db);
        for (user_id, friend_id) in [
            (accepted.requester_id, accepted.addressee_id),
            (accepted.addressee_id, accepted.requester_id),
        ] {
            feed.add_event_logged(
                user_id,
                FRIEND_ADDED,
                json!({ "friendship_id": accepted.id, "friend_id": friend_id }),
            )
            .await;
        }

        Ok(accepted)
    }

    /// Declines a request or removes a friend. Either party may do so.
    pub async fn remove(&self, caller_id: i32, friendship_id: i32) -> Result<(), AppError> {
        let repo = FriendshipRepository::new(self.db);

        let Some(friendship) = repo.find_by_id(friendship_id).await? else {
            return Err(AppError::NotFound("Friendship not found".to_string()));
        };
        if !friendship.involves(caller_id) {
            return Err(AppError::Forbidden(
                "You are not part of this friendship".to_string(),
            ));
        }

        repo.delete(friendship_id).await?;

        Ok(())
    }

    /// Accepted friends of the caller.
    pub async fn list_friends(&self, caller_id: i32) -> Result<Vec<User>, AppError> {
        let friend_ids = FriendshipRepository::new(self.db)
            .get_friend_ids(caller_id)
            .await?;

        let mut users: Vec<User> = UserRepository::new(self.db)
            .find_by_ids(&friend_ids)
            .await?
            .into_values()
            .collect();
        users.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(users)
    }

    /// Pending requests the caller sent or received, with both users.
    pub async fn list_requests(&self, caller_id: i32) -> Result<Vec<FriendRequest>, AppError> {
        let pending = FriendshipRepository::new(self.db)
            .get_for_user(caller_id, Some(STATUS_PENDING))
            .await?;

        let mut user_ids: Vec<i32> = pending
            .iter()
            .flat_map(|f| [f.requester_id, f.addressee_id])
            .collect();
        user_ids.sort_unstable();
        user_ids.dedup();
        let users = UserRepository::new(self.db).find_by_ids(&user_ids).await?;

        Ok(pending
            .into_iter()
            .filter_map(|friendship| {
                let requester = users.get(&friendship.requester_id)?.clone();
                let addressee = users.get(&friendship.addressee_id)?.clone();
                Some(FriendRequest {
                    friendship,
                    requester,
                    addressee,
                })
            })
            .collect())
    }
}

fn pair_exists() -> AppError {
    AppError::Conflict("A request already exists or you are already friends".to_string())
}
