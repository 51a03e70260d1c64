//! Call permission adapters.

use crate::ports::CallPermission;

/// Permission gate for hosts without a runtime permission model.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrantedCallPermission;

impl CallPermission for GrantedCallPermission {
    fn can_place_calls(&self) -> bool {
        true
    }
}
