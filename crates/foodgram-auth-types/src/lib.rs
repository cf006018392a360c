//! Auth types shared across Foodgram services.
//!
//! Credentials and tokens are handled by the gateway; services only see the
//! identity headers it injects, parsed by [`identity::IdentityHeaders`].

pub mod identity;
