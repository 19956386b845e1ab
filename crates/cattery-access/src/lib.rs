//! Admin and capability-grant authority sets for the Cattery engine.
//!
//! Every privileged check in the workspace routes through
//! [`AccessControl`]: there is no ambient authority state anywhere else.
//! The component owns two independent sets:
//!
//! - the **admin set** of [`Account`]s (always containing the root admin),
//! - the **grantee set** of [`CallerId`]s holding a capability to invoke
//!   privileged registry mutations.
//!
//! Membership in one set never implies membership in the other. Grants are
//! checked by membership, not by count, and re-granting an existing member
//! succeeds idempotently without emitting an event.
//!
//! [`Account`]: cattery_types::Account
//! [`CallerId`]: cattery_types::CallerId

pub mod access;

pub use access::AccessControl;

use cattery_types::Account;

/// Errors that can occur during access-control operations.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// The caller lacks the admin status required for this operation.
    #[error("unauthorized: account {caller} is not an admin")]
    Unauthorized {
        /// The rejected caller.
        caller: Account,
    },

    /// The caller is an admin but not the root admin, and the operation is
    /// restricted to the root admin (capability grant/revoke).
    #[error("unauthorized: account {caller} is not the root admin")]
    NotRootAdmin {
        /// The rejected caller.
        caller: Account,
    },
}
