pub mod child_queries;
pub mod contributor_queries;
pub mod gift_queries;
pub mod holding_queries;
pub mod investment_queries;
pub mod recurring_contribution_queries;
pub mod sprout_request_queries;
pub mod user_queries;
