//! Capability bitflags for role-based access control
//!
//! Roles never get compared as strings; every authorization decision asks
//! whether a role's capability set covers the capability a route requires.

use bitflags::bitflags;

bitflags! {
    /// Marketplace capability flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u32 {
        /// Read the caller's own profile
        const READ_OWN_PROFILE  = 1 << 0;
        /// Look up other principals
        const MANAGE_PRINCIPALS = 1 << 1;
        /// Bypass all capability checks
        const ADMINISTRATOR     = 1 << 2;

        /// Capabilities of a regular customer account
        const CUSTOMER = Self::READ_OWN_PROFILE.bits();
    }
}

impl Capabilities {
    /// Check if the capability set covers a required capability
    ///
    /// Administrators bypass all capability checks.
    #[inline]
    pub fn has(&self, required: Capabilities) -> bool {
        if self.contains(Capabilities::ADMINISTRATOR) {
            return true;
        }
        self.contains(required)
    }
}
