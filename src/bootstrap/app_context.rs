use std::sync::Arc;

use crate::application::ports::account_repository::AccountRepository;
use crate::application::ports::token_codec::TokenCodec;
use crate::bootstrap::config::Config;
use crate::infrastructure::crypto::jwt::JwtTokenCodec;
use crate::infrastructure::memory::InMemoryAccountRepository;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

#[derive(Clone)]
pub struct AppServices {
    account_repo: Arc<dyn AccountRepository>,
    tokens: Arc<dyn TokenCodec>,
}

impl AppServices {
    pub fn new(account_repo: Arc<dyn AccountRepository>, tokens: Arc<dyn TokenCodec>) -> Self {
        Self {
            account_repo,
            tokens,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    /// Context backed by the in-memory store and a codec keyed by `cfg.jwt_secret`.
    pub fn in_memory(cfg: Config) -> Self {
        let tokens = Arc::new(JwtTokenCodec::new(
            cfg.jwt_secret.as_bytes(),
            cfg.jwt_expires_secs,
        ));
        let services = AppServices::new(Arc::new(InMemoryAccountRepository::new()), tokens);
        Self::new(cfg, services)
    }

    pub fn account_repo(&self) -> Arc<dyn AccountRepository> {
        self.services.account_repo.clone()
    }

    pub fn tokens(&self) -> Arc<dyn TokenCodec> {
        self.services.tokens.clone()
    }
}
