//! Account route handlers
//!
//! This module contains all account endpoints:
//! - Registration and login
//! - Profile read and update
//! - Password change
//! - Logout

pub mod login;
pub mod logout;
pub mod password;
pub mod profile;
pub mod register;

use std::sync::Arc;

use acct_core::repositories::{IdentityRepository, RevocationRepository};
use acct_core::services::{AccountService, TokenService};

/// Application state that holds shared services
pub struct AppState<I, R>
where
    I: IdentityRepository,
    R: RevocationRepository,
{
    pub account_service: Arc<AccountService<I, R>>,
    pub token_service: Arc<TokenService<R>>,
}

impl<I, R> AppState<I, R>
where
    I: IdentityRepository,
    R: RevocationRepository,
{
    /// Build the state around an account service, sharing its token service
    pub fn new(account_service: Arc<AccountService<I, R>>) -> Self {
        let token_service = Arc::clone(account_service.token_service());
        Self {
            account_service,
            token_service,
        }
    }
}
