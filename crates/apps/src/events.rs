//! Event types and attribute keys emitted by the staking message handler.

/// Emitted when an application is staked.
pub const EVENT_TYPE_CREATE_APPLICATION: &str = "create_application";

/// Emitted with the amount of every stake.
pub const EVENT_TYPE_STAKE: &str = "stake";

/// Emitted when an application begins unstaking.
pub const EVENT_TYPE_BEGIN_UNSTAKE: &str = "begin_unstake";

/// Attribute key for the address of the application.
pub const ATTRIBUTE_KEY_APPLICATION: &str = "application";

/// Value of the module attribute for events of this module.
pub const ATTRIBUTE_VALUE_CATEGORY: &str = "application";
