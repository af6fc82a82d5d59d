use crate::server::{
    data::{workspace::WorkspaceRepository, workspace_member::WorkspaceMemberRepository},
    model::workspace::{CreateWorkspaceParam, WorkspaceRole, DEFAULT_PLAN},
};
use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use test_utils::{builder::TestBuilder, factory};

mod create;
mod delete;
mod members;
