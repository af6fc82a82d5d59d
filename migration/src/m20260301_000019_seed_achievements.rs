use sea_orm_migration::prelude::*;

use super::m20260301_000005_create_achievement_table::Achievement;

/// `(code, title, description, icon, kind, requirement)`
const ACHIEVEMENTS: &[(&str, &str, &str, &str, &str, &str)] = &[
    // goals created
    ("first_goal", "First Step", "Create your first goal", "🎯", "goal_count", r#"{"count":1}"#),
    ("goal_5", "Goal Getter", "Create 5 goals", "🎪", "goal_count", r#"{"count":5}"#),
    ("goal_10", "Planner", "Create 10 goals", "📋", "goal_count", r#"{"count":10}"#),
    ("goal_25", "Master Planner", "Create 25 goals", "🗂️", "goal_count", r#"{"count":25}"#),
    ("goal_50", "Goal Legend", "Create 50 goals", "👑", "goal_count", r#"{"count":50}"#),
    // goals completed
    ("first_completion", "Winner", "Complete your first goal", "🏅", "completion", r#"{"count":1}"#),
    ("completion_5", "Doer", "Complete 5 goals", "⭐", "completion", r#"{"count":5}"#),
    ("completion_10", "Achiever", "Complete 10 goals", "🌟", "completion", r#"{"count":10}"#),
    ("completion_25", "Champion", "Complete 25 goals", "🏆", "completion", r#"{"count":25}"#),
    ("completion_50", "Master of Achievement", "Complete 50 goals", "💎", "completion", r#"{"count":50}"#),
    ("completion_100", "Legend", "Complete 100 goals", "🔥", "completion", r#"{"count":100}"#),
    // streaks
    ("streak_3", "Off the Blocks", "Keep a 3 day streak", "🌱", "streak", r#"{"days":3}"#),
    ("streak_7", "Week of Power", "Keep a 7 day streak", "💪", "streak", r#"{"days":7}"#),
    ("streak_14", "Two Weeks", "Keep a 14 day streak", "🔥", "streak", r#"{"days":14}"#),
    ("streak_30", "Month of Grit", "Keep a 30 day streak", "⚡", "streak", r#"{"days":30}"#),
    ("streak_60", "Two Months", "Keep a 60 day streak", "🌟", "streak", r#"{"days":60}"#),
    ("streak_100", "Hundred", "Keep a 100 day streak", "💯", "streak", r#"{"days":100}"#),
    ("streak_365", "A Year Nonstop", "Keep a 365 day streak", "🏆", "streak", r#"{"days":365}"#),
    // education
    ("education_first", "Student", "Create your first education goal", "📖", "sphere_goal", r#"{"sphere":"education","count":1}"#),
    ("education_5", "Bookworm", "Complete 5 education goals", "📚", "sphere_completion", r#"{"sphere":"education","count":5}"#),
    ("education_expert", "Knowledge Expert", "Complete 20 education goals", "🎓", "sphere_completion", r#"{"sphere":"education","count":20}"#),
    // sport
    ("sport_first", "Gym Rookie", "Create your first sport goal", "🏃", "sphere_goal", r#"{"sphere":"sport","count":1}"#),
    ("sport_5", "Athlete", "Complete 5 sport goals", "💪", "sphere_completion", r#"{"sphere":"sport","count":5}"#),
    ("sport_warrior", "Sport Warrior", "Complete 20 sport goals", "🥇", "sphere_completion", r#"{"sphere":"sport","count":20}"#),
    // hobby
    ("hobby_first", "Creative Start", "Create your first hobby goal", "🎨", "sphere_goal", r#"{"sphere":"hobby","count":1}"#),
    ("hobby_5", "Hobby Master", "Complete 5 hobby goals", "🎭", "sphere_completion", r#"{"sphere":"hobby","count":5}"#),
    ("hobby_artist", "Artist of Life", "Complete 20 hobby goals", "🌈", "sphere_completion", r#"{"sphere":"hobby","count":20}"#),
    // work
    ("work_first", "Careerist", "Create your first work goal", "💼", "sphere_goal", r#"{"sphere":"work","count":1}"#),
    ("work_professional", "Professional", "Complete 10 work goals", "👔", "sphere_completion", r#"{"sphere":"work","count":10}"#),
    // finance
    ("finance_first", "Financial Literacy", "Create your first finance goal", "💰", "sphere_goal", r#"{"sphere":"finance","count":1}"#),
    ("finance_investor", "Investor", "Complete 5 finance goals", "💎", "sphere_completion", r#"{"sphere":"finance","count":5}"#),
    // health
    ("health_first", "Self Care", "Create your first health goal", "🏥", "sphere_goal", r#"{"sphere":"health","count":1}"#),
    ("health_wellness", "Healthy Living", "Complete 10 health goals", "💚", "sphere_completion", r#"{"sphere":"health","count":10}"#),
    // relationships
    ("relationships_first", "Social", "Create your first relationships goal", "❤️", "sphere_goal", r#"{"sphere":"relationships","count":1}"#),
    ("relationships_harmony", "Harmony", "Complete 5 relationships goals", "💕", "sphere_completion", r#"{"sphere":"relationships","count":5}"#),
    // activity
    ("steps_100", "First Hundred", "Log 100 steps", "👣", "steps_count", r#"{"count":100}"#),
    ("steps_500", "Active", "Log 500 steps", "🚶", "steps_count", r#"{"count":500}"#),
    ("steps_1000", "Thousander", "Log 1000 steps", "🏃", "steps_count", r#"{"count":1000}"#),
    // special
    ("early_bird", "Early Bird", "Log a step before 6:00", "🌅", "special", r#"{"type":"early_morning"}"#),
    ("night_owl", "Night Owl", "Log a step after 23:00", "🦉", "special", r#"{"type":"late_night"}"#),
    ("weekend_warrior", "Weekend Warrior", "Complete 5 goals on weekends", "🎉", "special", r#"{"type":"weekend_completions","count":5}"#),
    ("speed_demon", "Speed Demon", "Complete a goal within 1 day", "⚡", "special", r#"{"type":"fast_completion","days":1}"#),
    ("marathon_runner", "Marathon Runner", "Work on a single goal for 90 days", "🏃‍♂️", "special", r#"{"type":"long_goal","days":90}"#),
    ("multitasker", "Multitasker", "Work on 10 goals at once", "🤹", "special", r#"{"type":"active_goals","count":10}"#),
    ("perfectionist", "Perfectionist", "Complete 10 goals at 100% progress", "💯", "special", r#"{"type":"perfect_completions","count":10}"#),
    // holidays
    ("new_year_goal", "New Year Resolution", "Create a goal on January 1st", "🎆", "holiday", r#"{"date":"01-01"}"#),
    ("birthday_achievement", "Birthday", "Complete a goal on your birthday", "🎂", "holiday", r#"{"type":"birthday"}"#),
    // meta
    ("achievement_hunter", "Achievement Hunter", "Unlock 10 achievements", "🎖️", "meta", r#"{"achievements":10}"#),
    ("achievement_master", "Achievement Master", "Unlock 25 achievements", "🏵️", "meta", r#"{"achievements":25}"#),
    ("completionist", "Collector", "Unlock 50 achievements", "👑", "meta", r#"{"achievements":50}"#),
];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let mut insert = Query::insert();
        insert
            .into_table(Achievement::Table)
            .columns([
                Achievement::Code,
                Achievement::Title,
                Achievement::Description,
                Achievement::Icon,
                Achievement::Kind,
                Achievement::Requirement,
            ])
            .on_conflict(
                OnConflict::column(Achievement::Code)
                    .update_columns([
                        Achievement::Title,
                        Achievement::Description,
                        Achievement::Icon,
                        Achievement::Kind,
                        Achievement::Requirement,
                    ])
                    .to_owned(),
            );

        for (code, title, description, icon, kind, requirement) in ACHIEVEMENTS {
            insert
                .values([
                    (*code).into(),
                    (*title).into(),
                    (*description).into(),
                    (*icon).into(),
                    (*kind).into(),
                    (*requirement).into(),
                ])
                .map_err(|e| DbErr::Custom(format!("Invalid achievement seed row: {}", e)))?;
        }

        manager.exec_stmt(insert).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let codes = ACHIEVEMENTS.iter().map(|row| row.0);

        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Achievement::Table)
                    .and_where(Expr::col(Achievement::Code).is_in(codes))
                    .to_owned(),
            )
            .await
    }
}
