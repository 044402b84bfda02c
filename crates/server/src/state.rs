use axum::extract::FromRef;
use deadpool_sqlite::Pool;

/// Everything the handlers share. Built once in `main` and handed to the router
#[derive(Debug, Clone)]
pub struct AppState {
    pub pool: Pool,
}

impl AppState {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

impl FromRef<AppState> for Pool {
    fn from_ref(state: &AppState) -> Self {
        // pool uses an Arc internally so clone is cheap
        state.pool.clone()
    }
}
