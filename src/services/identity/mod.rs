pub mod factory;
pub mod gotrue;
pub mod provider;
pub mod types;

pub use factory::build_identity_client;
pub use gotrue::GoTrueClient;
pub use provider::{TokenVerifier, UserAdmin};
pub use types::{AuthenticatedUser, IdentityError};
