mod achievement;
mod ai_message;
mod event;
mod friendship;
mod goal;
mod step;
mod team_goal;
mod user;
mod workspace;
mod workspace_invite;
