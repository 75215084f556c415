mod child;
mod contributor;
mod gift;
mod holding;
mod investment;
mod recurring_contribution;
mod sprout_request;
mod user;

pub use child::{Child, CreateChild, GiftLinkChild};
pub use contributor::{Contributor, ContributorAuthResponse, ContributorProfile, CreateContributor};
pub use gift::{CreateGift, Gift, GiftStatus, GiftWithInvestment};
pub use holding::{HoldingWithInvestment, PortfolioHolding, PortfolioView};
pub use investment::{Investment, InvestmentSearchResult, InvestmentType};
pub use recurring_contribution::{CreateRecurringContribution, Frequency, RecurringContribution};
pub use sprout_request::{CreateSproutRequest, RespondSproutRequest, SproutRequest, SproutRequestStatus};
pub use user::{AuthResponse, CreateUser, LoginRequest, UpdateProfile, User, UserProfile};
