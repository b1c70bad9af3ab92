//! Bearer-token issuance and the authentication middleware that guards the
//! protected routes.

pub(crate) mod middleware;
pub(crate) mod token;
