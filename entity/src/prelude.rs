pub use super::achievement::Entity as Achievement;
pub use super::achievement_on_user::Entity as AchievementOnUser;
pub use super::ai_message::Entity as AiMessage;
pub use super::event::Entity as Event;
pub use super::feed_event::Entity as FeedEvent;
pub use super::friendship::Entity as Friendship;
pub use super::goal::Entity as Goal;
pub use super::group::Entity as Group;
pub use super::group_member::Entity as GroupMember;
pub use super::step::Entity as Step;
pub use super::subtask::Entity as Subtask;
pub use super::team_goal::Entity as TeamGoal;
pub use super::team_goal_contributor::Entity as TeamGoalContributor;
pub use super::team_goal_step::Entity as TeamGoalStep;
pub use super::user::Entity as User;
pub use super::workspace::Entity as Workspace;
pub use super::workspace_invite::Entity as WorkspaceInvite;
pub use super::workspace_member::Entity as WorkspaceMember;
