use serde::{Deserialize, Serialize};

/// permission state of the device location sensor.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthorizationState {
    #[default]
    NotDetermined,
    Denied,
    Restricted,
    Authorized,
}

impl AuthorizationState {
    pub fn is_authorized(&self) -> bool {
        matches!(self, AuthorizationState::Authorized)
    }

    /// true when the sensor must not deliver position updates in this state.
    pub fn blocks_updates(&self) -> bool {
        matches!(
            self,
            AuthorizationState::Denied | AuthorizationState::Restricted
        )
    }
}

impl std::fmt::Display for AuthorizationState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AuthorizationState::NotDetermined => "not determined",
            AuthorizationState::Denied => "denied",
            AuthorizationState::Restricted => "restricted",
            AuthorizationState::Authorized => "authorized",
        };
        write!(f, "{s}")
    }
}
