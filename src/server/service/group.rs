use sea_orm::DatabaseConnection;

use crate::{
    model::group::CreateGroupDto,
    server::{
        data::{group::GroupRepository, user::UserRepository},
        error::AppError,
        model::group::{Group, GroupMember, GroupMembership, ROLE_MEMBER, ROLE_OWNER},
    },
};

pub struct GroupService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GroupService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a group with the creator as its owner.
    pub async fn create(&self, owner_id: i32, dto: CreateGroupDto) -> Result<Group, AppError> {
        let title = dto.title.trim();
        if title.is_empty() {
            return Err(AppError::BadRequest("Group title is required".to_string()));
        }

        let repo = GroupRepository::new(self.db);
        let group = repo.create(title.to_string(), dto.description).await?;
        repo.add_member(group.id, owner_id, ROLE_OWNER).await?;

        Ok(group)
    }

    /// Joins a group as a member. Joining a group twice returns the existing membership.
    pub async fn join(&self, user_id: i32, group_id: i32) -> Result<GroupMembership, AppError> {
        let repo = GroupRepository::new(self.db);

        if repo.find_by_id(group_id).await?.is_none() {
            return Err(AppError::NotFound("Group not found".to_string()));
        }

        if let Some(existing) = repo.find_membership(group_id, user_id).await? {
            return Ok(existing);
        }

        let membership = repo.add_member(group_id, user_id, ROLE_MEMBER).await?;

        Ok(membership)
    }

    pub async fn mine(&self, user_id: i32) -> Result<Vec<GroupMembership>, AppError> {
        let memberships = GroupRepository::new(self.db)
            .get_memberships_for_user(user_id)
            .await?;

        Ok(memberships)
    }

    /// Members of a group with their profiles, in join order.
    pub async fn members(&self, group_id: i32) -> Result<Vec<GroupMember>, AppError> {
        let repo = GroupRepository::new(self.db);
        if repo.find_by_id(group_id).await?.is_none() {
            return Err(AppError::NotFound("Group not found".to_string()));
        }

        let memberships = repo.get_members(group_id).await?;
        let user_ids: Vec<i32> = memberships.iter().map(|m| m.user_id).collect();
        let mut users = UserRepository::new(self.db).find_by_ids(&user_ids).await?;

        Ok(memberships
            .into_iter()
            .filter_map(|m| {
                let user = users.remove(&m.user_id)?;
                Some(GroupMember {
                    id: m.id,
                    role: m.role,
                    joined_at: m.joined_at,
                    user,
                })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::prelude::*;
    use test_utils::{builder::TestBuilder, factory};

    fn group_dto(title: &str) -> CreateGroupDto {
        CreateGroupDto {
            title: title.to_string(),
            description: None,
        }
    }

    /// Tests that the creator owns the group and joining is idempotent.
    ///
    /// Expected: owner plus one member, second join returns the same membership
    #[tokio::test]
    async fn create_and_join() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(User)
            .with_table(Group)
            .with_table(GroupMember)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let owner = factory::create_user(db).await?;
        let member = factory::create_user(db).await?;

        let service = GroupService::new(db);
        let group = service.create(owner.id, group_dto("  Runners  ")).await?;
        assert_eq!(group.title, "Runners");

        let first = service.join(member.id, group.id).await?;
        let second = service.join(member.id, group.id).await?;
        assert_eq!(first.id, second.id);

        let members = service.members(group.id).await?;
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].role, ROLE_OWNER);
        assert_eq!(members[0].user.id, owner.id);
        assert_eq!(members[1].role, ROLE_MEMBER);

        let mine = service.mine(member.id).await?;
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].group.as_ref().map(|g| g.id), Some(group.id));

        Ok(())
    }

    /// Tests joining a group that does not exist.
    ///
    /// Expected: Err(NotFound)
    #[tokio::test]
    async fn join_unknown_group() -> Result<(), AppError> {
        let test = TestBuilder::new()
            .with_table(User)
            .with_table(Group)
            .with_table(GroupMember)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();
        let user = factory::create_user(db).await?;

        let result = GroupService::new(db).join(user.id, 42).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));

        Ok(())
    }
}
