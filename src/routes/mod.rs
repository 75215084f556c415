pub(crate) mod auth;
pub(crate) mod children;
pub(crate) mod contributors;
pub(crate) mod gifts;
pub(crate) mod health;
pub(crate) mod investments;
pub(crate) mod portfolio;
pub(crate) mod profile;
pub(crate) mod recurring_contributions;
pub(crate) mod sprout_requests;
