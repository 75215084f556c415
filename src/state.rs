use sqlx::PgPool;

use crate::services::auth_service::AuthService;
use crate::services::market_data::MarketDataService;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub market_data: MarketDataService,
    pub auth: AuthService,
}
