pub mod auth_service;
pub mod child_service;
pub mod contributor_service;
pub mod gift_service;
pub mod investment_service;
pub mod market_data;
pub mod portfolio_service;
pub mod recurring_contribution_service;
pub mod sprout_request_service;
pub mod user_service;
