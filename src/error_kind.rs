//! Classification of bridge error codes.

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// The kind of rejection a bridge reported, keyed by its numeric error type.
///
/// [`BridgeErrorKind::Bridge`] (code 0) is the generic kind and the fallback
/// for any code not listed here.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Display)]
#[repr(u32)]
pub enum BridgeErrorKind {
    Bridge = 0,
    UnauthorizedUser = 1,
    InvalidJsonBody = 2,
    ResourceUnavailable = 3,
    MethodUnavailable = 4,
    MissingParameter = 5,
    ParameterUnavailable = 6,
    InvalidValue = 7,
    ParameterUnmodifiable = 8,
    TooManyItemsInList = 11,
    PortalConnectionRequired = 12,
    LinkButton = 101,
    DisablingDhcpProhibited = 110,
    InvalidUpdateState = 111,
    DeviceParameterUnmodifiable = 201,
    GroupTableFull = 301,
    LightGroupTableFull = 302,
    DeviceUnreachable = 304,
    GroupUnmodifiable = 305,
    SceneCreationInProgress = 401,
    SceneBufferFull = 402,
    SensorCreationProhibited = 501,
    SensorListFull = 502,
    RuleListFull = 601,
    RuleCondition = 607,
    RuleAction = 608,
    RuleActivation = 609,
    ScheduleListFull = 701,
    InvalidScheduleTimeZone = 702,
    ScheduleTimeUpdate = 703,
    InvalidScheduleTag = 704,
    ScheduleTimeInPast = 705,
    InternalError = 901,
}

impl BridgeErrorKind {
    /// The bridge error type this kind is registered under.
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Look up the kind for a bridge error type.
    ///
    /// # Examples
    ///
    /// ```
    /// use hue_bridge_rs::BridgeErrorKind;
    ///
    /// assert_eq!(BridgeErrorKind::from_code(101), BridgeErrorKind::LinkButton);
    /// assert_eq!(BridgeErrorKind::from_code(42), BridgeErrorKind::Bridge);
    /// ```
    pub fn from_code(code: u32) -> Self {
        BridgeErrorKind::iter()
            .find(|kind| kind.code() == code)
            .unwrap_or(BridgeErrorKind::Bridge)
    }
}
